// Startup configuration parsing.

use jt_core::{ConfigError, VisualizerConfig};

#[test]
fn empty_input_yields_defaults() {
    let cfg = VisualizerConfig::from_pairs(std::iter::empty::<(&str, &str)>()).unwrap();
    assert_eq!(cfg, VisualizerConfig::default());
    assert_eq!(cfg.initial_distortion, 0.0);
    assert_eq!(cfg.coupling, 1.0);
    assert!(cfg.auto_play);
    assert_eq!(cfg.scan_time_constant_ms, 1800.0);
    assert_eq!(cfg.smoothing, 0.08);
}

#[test]
fn recognised_keys_override_defaults() {
    let cfg = VisualizerConfig::from_pairs([
        ("distortion", "0.4"),
        ("coupling", "1.2"),
        ("auto", "false"),
        ("scan_ms", "900"),
        ("smoothing", "0.2"),
    ])
    .unwrap();
    assert_eq!(cfg.initial_distortion, 0.4);
    assert_eq!(cfg.coupling, 1.2);
    assert!(!cfg.auto_play);
    assert_eq!(cfg.scan_time_constant_ms, 900.0);
    assert_eq!(cfg.smoothing, 0.2);
}

#[test]
fn out_of_range_parameters_are_clamped() {
    let cfg = VisualizerConfig::from_pairs([("distortion", "1.7"), ("coupling", "0.1")]).unwrap();
    assert_eq!(cfg.initial_distortion, 1.0);
    assert_eq!(cfg.coupling, 0.5);
    let cfg = VisualizerConfig::from_pairs([("distortion", "-0.3")]).unwrap();
    assert_eq!(cfg.initial_distortion, 0.0);
}

#[test]
fn unknown_keys_are_ignored() {
    let cfg = VisualizerConfig::from_pairs([("theme", "dark"), ("coupling", "0.9")]).unwrap();
    assert_eq!(cfg.coupling, 0.9);
}

#[test]
fn malformed_values_are_errors() {
    assert_eq!(
        VisualizerConfig::from_pairs([("coupling", "lots")]),
        Err(ConfigError::InvalidNumber {
            key: "coupling".into(),
            value: "lots".into()
        })
    );
    assert!(matches!(
        VisualizerConfig::from_pairs([("auto", "sometimes")]),
        Err(ConfigError::InvalidBool { .. })
    ));
    assert!(matches!(
        VisualizerConfig::from_pairs([("scan_ms", "0")]),
        Err(ConfigError::InvalidScanTimeConstant(_))
    ));
    assert!(matches!(
        VisualizerConfig::from_pairs([("smoothing", "1.5")]),
        Err(ConfigError::InvalidSmoothing(_))
    ));
}

#[test]
fn errors_render_readable_messages() {
    let err = VisualizerConfig::from_pairs([("smoothing", "0")]).unwrap_err();
    assert_eq!(err.to_string(), "`smoothing` must lie in (0, 1], got 0");
}
