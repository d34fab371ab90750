// Auto-scan oscillator and distortion smoothing.

use jt_core::scan::AutoScan;
use jt_core::SmoothedDistortion;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const TC: f64 = 1800.0;

#[test]
fn scan_starts_at_midpoint() {
    let scan = AutoScan::new(500.0);
    assert!((scan.sample(500.0) - 0.5).abs() < 1e-6);
}

#[test]
fn scan_reaches_extremes_at_quarter_phases() {
    let scan = AutoScan::new(0.0);
    assert!((scan.sample(FRAC_PI_2 * TC) - 1.0).abs() < 1e-5);
    assert!(scan.sample(3.0 * FRAC_PI_2 * TC).abs() < 1e-5);
    assert!((scan.sample(PI * TC) - 0.5).abs() < 1e-5);
}

#[test]
fn scan_is_periodic() {
    let scan = AutoScan::new(100.0);
    assert!((scan.period_ms() - TAU * TC).abs() < 1e-9);
    for t in [0.0, 777.0, 4321.0, 9000.0] {
        let a = scan.sample(100.0 + t);
        let b = scan.sample(100.0 + t + scan.period_ms());
        assert!((a - b).abs() < 1e-5, "t={t}");
    }
}

#[test]
fn scan_stays_in_unit_range() {
    let scan = AutoScan::new(0.0);
    for i in 0..2000 {
        let v = scan.sample(i as f64 * 13.7);
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn scan_restart_resets_phase() {
    let mut scan = AutoScan::new(0.0);
    assert!(scan.phase(5000.0) > 0.0);
    scan.restart(5000.0);
    assert_eq!(scan.phase(5000.0), 0.0);
    assert!((scan.sample(5000.0) - 0.5).abs() < 1e-6);
}

#[test]
fn scan_phase_handles_clock_before_start() {
    let scan = AutoScan::new(1000.0);
    let phase = scan.phase(0.0);
    assert!((0.0..TAU).contains(&phase));
}

#[test]
fn custom_time_constant_scales_period() {
    let scan = AutoScan::with_time_constant(0.0, 900.0);
    assert!((scan.period_ms() - TAU * 900.0).abs() < 1e-9);
    assert!((scan.sample(FRAC_PI_2 * 900.0) - 1.0).abs() < 1e-5);
}

#[test]
fn smoothing_starts_at_rest() {
    let mut s = SmoothedDistortion::new(0.4);
    assert_eq!(s.current(), 0.4);
    assert_eq!(s.step(), 0.4);
}

#[test]
fn smoothing_moves_a_fixed_fraction_per_step() {
    let mut s = SmoothedDistortion::new(0.0);
    s.set_target(1.0);
    assert!((s.step() - 0.08).abs() < 1e-6);
    assert!((s.step() - (0.08 + 0.92 * 0.08)).abs() < 1e-6);
}

#[test]
fn smoothing_converges_without_overshoot() {
    let mut s = SmoothedDistortion::new(0.0);
    s.set_target(0.9);
    let mut prev = 0.0;
    for _ in 0..300 {
        let v = s.step();
        assert!(v >= prev && v <= 0.9);
        prev = v;
    }
    assert!((prev - 0.9).abs() < 1e-4);

    s.set_target(0.1);
    for _ in 0..300 {
        let v = s.step();
        assert!(v <= prev && v >= 0.1);
        prev = v;
    }
    assert!((prev - 0.1).abs() < 1e-4);
}

#[test]
fn smoothing_clamps_targets() {
    let mut s = SmoothedDistortion::new(0.5);
    s.set_target(3.0);
    assert_eq!(s.target(), 1.0);
    s.set_target(-1.0);
    assert_eq!(s.target(), 0.0);
}

#[test]
fn smoothing_alpha_one_snaps() {
    let mut s = SmoothedDistortion::new(0.0).with_alpha(1.0);
    s.set_target(0.7);
    assert_eq!(s.step(), 0.7);
}
