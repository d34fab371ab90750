// Controller state machine: manual input, auto-scan and reset.

use jt_core::{ControlAction, Controller, VisualizerConfig};
use std::f64::consts::FRAC_PI_2;

fn manual() -> Controller {
    Controller::new(
        &VisualizerConfig {
            auto_play: false,
            ..VisualizerConfig::default()
        },
        0.0,
    )
}

#[test]
fn defaults_start_scanning() {
    let c = Controller::default();
    assert_eq!(c.distortion(), 0.0);
    assert_eq!(c.coupling(), 1.0);
    assert!(c.auto_play());
    assert_eq!(c.toggle_caption(), "Stop auto-scan");
}

#[test]
fn manual_input_ignored_while_scanning() {
    let mut c = Controller::default();
    assert!(!c.set_distortion(0.8));
    assert_eq!(c.distortion(), 0.0);
    assert!(!c.apply(ControlAction::SetDistortion(0.8), 0.0));
    assert!(!c.apply(ControlAction::DISTORTION_UP, 0.0));
    assert_eq!(c.distortion(), 0.0);
}

#[test]
fn manual_input_clamps_when_idle() {
    let mut c = manual();
    assert!(c.set_distortion(1.7));
    assert_eq!(c.distortion(), 1.0);
    assert!(c.set_distortion(-0.3));
    assert_eq!(c.distortion(), 0.0);
}

#[test]
fn coupling_works_regardless_of_auto_play() {
    let mut c = Controller::default();
    assert!(c.apply(ControlAction::SetCoupling(1.3), 0.0));
    assert!((c.coupling() - 1.3).abs() < 1e-6);
    c.set_coupling(9.0);
    assert_eq!(c.coupling(), 1.5);
    assert!(!c.apply(ControlAction::COUPLING_UP, 0.0));
}

#[test]
fn tick_drives_distortion_only_when_scanning() {
    let mut c = Controller::new(&VisualizerConfig::default(), 1000.0);
    let v = c.tick(1000.0 + FRAC_PI_2 * 1800.0).unwrap();
    assert!((v - 1.0).abs() < 1e-5);
    assert_eq!(c.distortion(), v);

    let mut m = manual();
    m.set_distortion(0.3);
    assert_eq!(m.tick(12345.0), None);
    assert_eq!(m.distortion(), 0.3);
}

#[test]
fn enabling_scan_restarts_clock() {
    let mut c = manual();
    assert!(c.toggle_auto_play(5000.0));
    assert_eq!(c.scan().phase(5000.0), 0.0);
    let v = c.tick(5000.0).unwrap();
    assert!((v - 0.5).abs() < 1e-6);
    assert_eq!(c.toggle_caption(), "Stop auto-scan");
}

#[test]
fn disabling_scan_keeps_last_value() {
    let mut c = Controller::default();
    c.tick(FRAC_PI_2 * 1800.0);
    assert!(c.apply(ControlAction::ToggleAutoScan, 3000.0));
    assert!(!c.auto_play());
    assert!((c.distortion() - 1.0).abs() < 1e-5);
    assert_eq!(c.toggle_caption(), "Start auto-scan");
    assert!(c.set_distortion(0.2));
}

#[test]
fn reset_restores_configured_defaults() {
    let cfg = VisualizerConfig {
        initial_distortion: 0.25,
        coupling: 0.8,
        auto_play: false,
        ..VisualizerConfig::default()
    };
    let mut c = Controller::new(&cfg, 0.0);
    c.set_distortion(0.9);
    c.set_coupling(1.4);
    c.set_auto_play(true, 10.0);
    assert!(c.apply(ControlAction::Reset, 20.0));
    assert_eq!(c.distortion(), 0.25);
    assert_eq!(c.coupling(), 0.8);
    assert!(!c.auto_play());
}

#[test]
fn reset_restarts_scan_when_default_is_on() {
    let mut c = Controller::default();
    c.toggle_auto_play(100.0);
    assert!(!c.auto_play());
    c.apply(ControlAction::Reset, 7000.0);
    assert!(c.auto_play());
    assert_eq!(c.scan().phase(7000.0), 0.0);
}

#[test]
fn levels_follow_current_parameters() {
    let mut c = manual();
    c.set_distortion(1.0);
    c.set_coupling(1.0);
    assert!((c.levels().stabilization_energy - 55.0).abs() < 1e-4);
    c.set_coupling(0.5);
    assert!((c.levels().stabilization_energy - 27.5).abs() < 1e-4);
}

#[test]
fn labels_format_current_state() {
    let mut c = manual();
    c.set_distortion(0.5);
    c.set_coupling(1.2);
    assert_eq!(c.distortion_label(), "Q3 distortion: 0.50");
    assert_eq!(c.coupling_label(), "Coupling λ: 1.20");
    assert_eq!(c.stabilization_label(), "ΔE ≈ -33.0");
}
