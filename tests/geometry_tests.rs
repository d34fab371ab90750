// Scene pose, instance list and draw batching.

use glam::{Quat, Vec3};
use jt_core::geometry::{
    bond_transform, idle_orientation, scene_instances, srgb_hex_to_linear, MeshKind,
    OctahedronPose,
};
use jt_core::render::batch_instances;
use jt_core::{LOBE_BASE_LENGTH, LOBE_BASE_OPACITY, LOBE_OPACITY_GAIN};

#[test]
fn pose_places_axial_ligands_on_vertical_axis() {
    let pose = OctahedronPose::from_progress(1.0);
    assert!((pose.axial[0].y - 3.40).abs() < 1e-4);
    assert!((pose.axial[1].y + 3.40).abs() < 1e-4);
    for p in pose.equatorial {
        assert_eq!(p.y, 0.0);
        assert!((p.length() - 2.051).abs() < 1e-4);
    }
}

#[test]
fn bond_colors_blend_from_white() {
    let rest = OctahedronPose::from_progress(0.0);
    assert!(rest.axial_bond_color.abs_diff_eq(Vec3::ONE, 1e-5));
    assert!(rest.equatorial_bond_color.abs_diff_eq(Vec3::ONE, 1e-5));

    let full = OctahedronPose::from_progress(1.0);
    assert!(full
        .axial_bond_color
        .abs_diff_eq(srgb_hex_to_linear(0x93c5fd), 1e-5));
    assert!(full
        .equatorial_bond_color
        .abs_diff_eq(srgb_hex_to_linear(0xfdba74), 1e-5));
}

#[test]
fn lobe_grows_and_brightens_with_distortion() {
    let rest = OctahedronPose::from_progress(0.0);
    let full = OctahedronPose::from_progress(1.0);
    assert_eq!(rest.lobe_length, LOBE_BASE_LENGTH);
    assert!((full.lobe_length - LOBE_BASE_LENGTH * 1.48).abs() < 1e-4);
    assert_eq!(rest.lobe_opacity, LOBE_BASE_OPACITY);
    assert!((full.lobe_opacity - (LOBE_BASE_OPACITY + LOBE_OPACITY_GAIN)).abs() < 1e-6);
}

#[test]
fn srgb_conversion_endpoints() {
    assert_eq!(srgb_hex_to_linear(0x000000), Vec3::ZERO);
    assert!(srgb_hex_to_linear(0xffffff).abs_diff_eq(Vec3::ONE, 1e-6));
    let mid = srgb_hex_to_linear(0x808080);
    assert!(mid.x > 0.2 && mid.x < 0.23);
}

#[test]
fn instance_list_has_atoms_bonds_and_lobe_last() {
    let pose = OctahedronPose::from_progress(0.5);
    let list = scene_instances(&pose, Quat::IDENTITY);
    assert_eq!(list.len(), 14);
    assert_eq!(
        list.iter().filter(|i| i.mesh == MeshKind::Sphere).count(),
        7
    );
    let last = list.last().unwrap();
    assert!(last.translucent);
    assert_eq!(last.mesh, MeshKind::Cylinder);
    assert!((last.color.w - pose.lobe_opacity).abs() < 1e-6);
    assert_eq!(list.iter().filter(|i| i.translucent).count(), 1);
}

#[test]
fn orientation_rotates_whole_group() {
    let pose = OctahedronPose::from_progress(1.0);
    let q = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
    let list = scene_instances(&pose, q);
    // first axial ligand (index 1) moves from +Y to -X
    let center = list[1].transform.transform_point3(Vec3::ZERO);
    assert!(center.abs_diff_eq(Vec3::new(-pose.z_dist, 0.0, 0.0), 1e-4));
}

#[test]
fn bond_transform_spans_endpoints() {
    let to = Vec3::new(0.0, 0.0, 2.0);
    let m = bond_transform(Vec3::ZERO, to, 0.08);
    let top = m.transform_point3(Vec3::new(0.0, 0.5, 0.0));
    let bottom = m.transform_point3(Vec3::new(0.0, -0.5, 0.0));
    assert!(top.abs_diff_eq(to, 1e-5));
    assert!(bottom.abs_diff_eq(Vec3::ZERO, 1e-5));
}

#[test]
fn idle_orientation_starts_level_and_drifts() {
    let q0 = idle_orientation(0.0);
    let (_, yaw0, _) = q0.to_euler(glam::EulerRot::XYZ);
    assert!(yaw0.abs() < 1e-5);
    let q1 = idle_orientation(1000.0);
    assert!(q0.angle_between(q1) > 0.1);
}

#[test]
fn batches_draw_opaque_before_translucent() {
    let pose = OctahedronPose::from_progress(0.3);
    let list = scene_instances(&pose, Quat::IDENTITY);
    let (raw, batches) = batch_instances(&list);
    assert_eq!(raw.len(), list.len());
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].mesh, MeshKind::Sphere);
    assert_eq!(batches[0].instances, 0..7);
    assert_eq!(batches[1].mesh, MeshKind::Cylinder);
    assert!(!batches[1].translucent);
    assert_eq!(batches[1].instances, 7..13);
    assert!(batches[2].translucent);
    assert_eq!(batches[2].instances, 13..14);
}

#[test]
fn camera_tracks_viewport_and_sees_origin() {
    let mut cam = jt_core::Camera::default();
    cam.set_viewport(1600, 800);
    assert_eq!(cam.aspect, 2.0);
    cam.set_viewport(0, 800);
    assert_eq!(cam.aspect, 2.0);
    let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    assert!((0.0..1.0).contains(&ndc.z));
}
