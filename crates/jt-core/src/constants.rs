// Shared model/visual tuning constants used by both web and native frontends.

// Octahedral crystal-field baseline (pedagogical units)
pub const OCTAHEDRAL_EG: f32 = 110.0;
pub const OCTAHEDRAL_T2G: f32 = 250.0;

// Vibronic coupling strength per orbital set
pub const COUPLING_EG: f32 = 55.0;
pub const COUPLING_T2G: f32 = 22.0;

// Parameter ranges
pub const DISTORTION_MIN: f32 = 0.0;
pub const DISTORTION_MAX: f32 = 1.0;
pub const COUPLING_MIN: f32 = 0.5;
pub const COUPLING_MAX: f32 = 1.5;
pub const DEFAULT_COUPLING: f32 = 1.0;

// MnO6 geometry
pub const BASE_BOND: f32 = 2.45; // regular octahedron metal-ligand distance
pub const MAX_ELONGATION: f32 = 0.95; // axial stretch at full distortion
pub const XY_COMP_RATIO: f32 = 0.42; // equatorial compression relative to axial stretch

// Smoothing: fraction of the remaining gap closed per frame
pub const SMOOTHING_ALPHA: f32 = 0.08;

// Auto-scan: phase = elapsed_ms / SCAN_TIME_CONSTANT_MS
pub const SCAN_TIME_CONSTANT_MS: f64 = 1800.0;

// Visual sizing
pub const METAL_SCALE: f32 = 0.62;
pub const LIGAND_SCALE: f32 = 0.40;
pub const BOND_RADIUS: f32 = 0.08;
pub const LOBE_RADIUS: f32 = 0.42;
pub const LOBE_BASE_LENGTH: f32 = 4.0;
pub const LOBE_LENGTH_GAIN: f32 = 0.48;
pub const LOBE_BASE_OPACITY: f32 = 0.24;
pub const LOBE_OPACITY_GAIN: f32 = 0.28;

// Palette (sRGB hex)
pub const METAL_COLOR: u32 = 0x8b5cf6; // violet
pub const LIGAND_COLOR: u32 = 0xef4444; // red
pub const LOBE_COLOR: u32 = 0x3b82f6; // blue
pub const BOND_BASE_COLOR: u32 = 0xffffff;
pub const BOND_AXIAL_ACCENT: u32 = 0x93c5fd; // light blue
pub const BOND_EQUATORIAL_ACCENT: u32 = 0xfdba74; // light orange

// Camera
pub const CAMERA_EYE: [f32; 3] = [4.0, 3.2, 6.2];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const KEY_LIGHT_POS: [f32; 3] = [8.0, 10.0, 10.0];
pub const KEY_LIGHT_INTENSITY: f32 = 1.4;
pub const FILL_LIGHT_POS: [f32; 3] = [-10.0, -8.0, -8.0];
pub const FILL_LIGHT_INTENSITY: f32 = 0.45;

// Idle rotation (cosmetic)
pub const IDLE_YAW_RAD_PER_SEC: f32 = 0.24;
pub const IDLE_PITCH_AMPLITUDE: f32 = 0.12;
pub const IDLE_PITCH_RATE_PER_MS: f64 = 0.0011;
pub const IDLE_ROLL_AMPLITUDE: f32 = 0.04;
pub const IDLE_ROLL_RATE_PER_MS: f64 = 0.0007;

// Mesh tessellation
pub const SPHERE_SEGMENTS: u32 = 36;
pub const CYLINDER_SEGMENTS: u32 = 20;

// Keyboard/nudge step for both parameters
pub const NUDGE_STEP: f32 = 0.05;
