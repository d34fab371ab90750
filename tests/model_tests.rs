// Energy-level model and geometry mapping.

use jt_core::geometry::bond_lengths;
use jt_core::model::{clamp01, clamp_coupling};
use jt_core::{compute_energy_levels, OCTAHEDRAL_EG, OCTAHEDRAL_T2G};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn stabilization_is_linear_in_distortion_and_coupling() {
    for &d in &[0.0, 0.25, 0.5, 1.0] {
        for &c in &[0.5, 1.0, 1.5] {
            let l = compute_energy_levels(d, c);
            assert!(approx(l.stabilization_energy, 55.0 * d * c), "d={d} c={c}");
        }
    }
}

#[test]
fn stabilization_is_monotone() {
    let mut prev = -1.0;
    for i in 0..=20 {
        let e = compute_energy_levels(i as f32 / 20.0, 1.0).stabilization_energy;
        assert!(e >= prev);
        prev = e;
    }
    let mut prev = -1.0;
    for i in 0..=20 {
        let c = 0.5 + i as f32 / 20.0;
        let e = compute_energy_levels(0.7, c).stabilization_energy;
        assert!(e >= prev);
        prev = e;
    }
}

#[test]
fn eg_gap_is_twice_the_stabilization() {
    for &(d, c) in &[(0.1, 0.5), (0.5, 1.0), (0.9, 1.3), (1.0, 1.5)] {
        let l = compute_energy_levels(d, c);
        assert!(approx(l.eg_splitting(), 2.0 * l.stabilization_energy));
        assert!(approx(l.t2g_splitting(), 2.0 * 22.0 * d * c));
    }
}

#[test]
fn undistorted_levels_match_octahedral() {
    let l = compute_energy_levels(0.0, 1.3);
    assert_eq!(l.oh.eg, OCTAHEDRAL_EG);
    assert_eq!(l.oh.t2g, OCTAHEDRAL_T2G);
    assert_eq!(l.d4h.eg.dx2y2, l.oh.eg);
    assert_eq!(l.d4h.eg.dz2, l.oh.eg);
    assert_eq!(l.d4h.t2g.dxy, l.oh.t2g);
    assert_eq!(l.d4h.t2g.dxzdyz, l.oh.t2g);
    assert_eq!(l.stabilization_energy, 0.0);
}

#[test]
fn full_distortion_reference_values() {
    let l = compute_energy_levels(1.0, 1.0);
    assert!(approx(l.stabilization_energy, 55.0));
    assert!(approx(l.d4h.eg.dz2, 165.0));
    assert!(approx(l.d4h.eg.dx2y2, 55.0));
    assert!(approx(l.d4h.t2g.dxy, 228.0));
    assert!(approx(l.d4h.t2g.dxzdyz, 272.0));
}

#[test]
fn out_of_range_distortion_is_clamped() {
    assert_eq!(clamp01(-0.3), 0.0);
    assert_eq!(clamp01(1.7), 1.0);
    assert_eq!(
        compute_energy_levels(-0.3, 1.0),
        compute_energy_levels(0.0, 1.0)
    );
    assert_eq!(
        compute_energy_levels(1.7, 1.0),
        compute_energy_levels(1.0, 1.0)
    );
}

#[test]
fn coupling_helper_clamps_to_slider_range() {
    assert_eq!(clamp_coupling(0.1), 0.5);
    assert_eq!(clamp_coupling(2.0), 1.5);
    assert_eq!(clamp_coupling(1.2), 1.2);
}

#[test]
fn bond_lengths_at_extremes() {
    let (z, xy) = bond_lengths(0.0);
    assert!(approx(z, 2.45) && approx(xy, 2.45));
    let (z, xy) = bond_lengths(1.0);
    assert!(approx(z, 3.40));
    assert!(approx(xy, 2.051));
    assert_eq!(bond_lengths(2.0), bond_lengths(1.0));
}
