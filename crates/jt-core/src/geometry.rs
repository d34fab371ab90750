//! Octahedron pose for a given distortion progress.
//!
//! The molecular z axis (the Jahn-Teller elongation axis) is drawn along the
//! scene's +Y so it stands upright on screen; the equatorial ligands lie in
//! the scene's XZ plane.

use crate::constants::*;
use crate::model::clamp01;
use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

/// Convert a packed `0xRRGGBB` sRGB color into linear RGB.
pub fn srgb_hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.040_45 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Bond lengths for a (clamped) distortion progress.
#[inline]
pub fn bond_lengths(progress: f32) -> (f32, f32) {
    let p = clamp01(progress);
    let z_dist = BASE_BOND + p * MAX_ELONGATION;
    let xy_dist = BASE_BOND - p * MAX_ELONGATION * XY_COMP_RATIO;
    (z_dist, xy_dist)
}

/// Everything the renderer needs to place one frame of the complex.
#[derive(Clone, Debug, PartialEq)]
pub struct OctahedronPose {
    pub progress: f32,
    pub z_dist: f32,
    pub xy_dist: f32,
    pub axial: [Vec3; 2],
    pub equatorial: [Vec3; 4],
    /// Linear RGB.
    pub axial_bond_color: Vec3,
    /// Linear RGB.
    pub equatorial_bond_color: Vec3,
    pub lobe_length: f32,
    pub lobe_opacity: f32,
}

impl OctahedronPose {
    pub fn from_progress(progress: f32) -> Self {
        let p = clamp01(progress);
        let (z_dist, xy_dist) = bond_lengths(p);
        let white = srgb_hex_to_linear(BOND_BASE_COLOR);
        Self {
            progress: p,
            z_dist,
            xy_dist,
            axial: [Vec3::new(0.0, z_dist, 0.0), Vec3::new(0.0, -z_dist, 0.0)],
            equatorial: [
                Vec3::new(xy_dist, 0.0, 0.0),
                Vec3::new(-xy_dist, 0.0, 0.0),
                Vec3::new(0.0, 0.0, xy_dist),
                Vec3::new(0.0, 0.0, -xy_dist),
            ],
            axial_bond_color: white.lerp(srgb_hex_to_linear(BOND_AXIAL_ACCENT), p),
            equatorial_bond_color: white.lerp(srgb_hex_to_linear(BOND_EQUATORIAL_ACCENT), p),
            lobe_length: LOBE_BASE_LENGTH * (1.0 + LOBE_LENGTH_GAIN * p),
            lobe_opacity: LOBE_BASE_OPACITY + LOBE_OPACITY_GAIN * p,
        }
    }
}

/// Cosmetic slow spin: constant yaw drift plus a small pitch/roll wobble.
pub fn idle_orientation(elapsed_ms: f64) -> Quat {
    let yaw = (elapsed_ms / 1000.0) as f32 * IDLE_YAW_RAD_PER_SEC;
    let pitch = (elapsed_ms * IDLE_PITCH_RATE_PER_MS).sin() as f32 * IDLE_PITCH_AMPLITUDE;
    let roll = (elapsed_ms * IDLE_ROLL_RATE_PER_MS).cos() as f32 * IDLE_ROLL_AMPLITUDE;
    Quat::from_euler(EulerRot::XYZ, pitch, yaw, roll)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshKind {
    Sphere,
    Cylinder,
}

/// One drawable: a shared mesh, its world transform and a linear RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneInstance {
    pub mesh: MeshKind,
    pub transform: Mat4,
    pub color: Vec4,
    pub translucent: bool,
}

/// Transform placing the unit cylinder (height 1 along +Y, radius 1) between two points.
pub fn bond_transform(from: Vec3, to: Vec3, radius: f32) -> Mat4 {
    let axis = to - from;
    let length = axis.length();
    let rotation = if length > f32::EPSILON {
        Quat::from_rotation_arc(Vec3::Y, axis / length)
    } else {
        Quat::IDENTITY
    };
    Mat4::from_scale_rotation_translation(
        Vec3::new(radius, length, radius),
        rotation,
        (from + to) * 0.5,
    )
}

/// Build the full instance list for one frame.
///
/// Order: metal, two axial ligands, four equatorial ligands, two axial bonds,
/// four equatorial bonds, then the translucent dz² lobe last.
pub fn scene_instances(pose: &OctahedronPose, orientation: Quat) -> Vec<SceneInstance> {
    let group = Mat4::from_quat(orientation);
    let ligand_color = srgb_hex_to_linear(LIGAND_COLOR).extend(1.0);
    let sphere = |center: Vec3, scale: f32, color: Vec4| SceneInstance {
        mesh: MeshKind::Sphere,
        transform: group
            * Mat4::from_scale_rotation_translation(Vec3::splat(scale), Quat::IDENTITY, center),
        color,
        translucent: false,
    };
    let bond = |to: Vec3, color: Vec3| SceneInstance {
        mesh: MeshKind::Cylinder,
        transform: group * bond_transform(Vec3::ZERO, to, BOND_RADIUS),
        color: color.extend(1.0),
        translucent: false,
    };

    let mut out = Vec::with_capacity(14);
    out.push(sphere(
        Vec3::ZERO,
        METAL_SCALE,
        srgb_hex_to_linear(METAL_COLOR).extend(1.0),
    ));
    out.extend(pose.axial.iter().map(|&p| sphere(p, LIGAND_SCALE, ligand_color)));
    out.extend(pose.equatorial.iter().map(|&p| sphere(p, LIGAND_SCALE, ligand_color)));
    out.extend(pose.axial.iter().map(|&p| bond(p, pose.axial_bond_color)));
    out.extend(
        pose.equatorial
            .iter()
            .map(|&p| bond(p, pose.equatorial_bond_color)),
    );
    out.push(SceneInstance {
        mesh: MeshKind::Cylinder,
        transform: group
            * Mat4::from_scale(Vec3::new(LOBE_RADIUS, pose.lobe_length, LOBE_RADIUS)),
        color: srgb_hex_to_linear(LOBE_COLOR).extend(pose.lobe_opacity),
        translucent: true,
    });
    out
}
