use ph_config::{
    ConfigError, ProviderKind, SimulatorConfig, from_yaml_str, load_yaml, save_yaml,
};

#[test]
fn yaml_file_round_trip() {
    let name = format!("ph_config_roundtrip_{}.yaml", std::process::id());
    let path = std::env::temp_dir().join(name);
    let mut config = SimulatorConfig::default();
    config.provider = ProviderKind::Surrogate;
    config.defaults.superheat_f = 12.5;
    config.axes.pressure_ticks_psia = vec![20.0, 100.0, 300.0];

    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded, config);

    std::fs::remove_file(&path).ok();
}

#[test]
fn partial_document_fills_defaults() {
    let yaml = r#"
provider: surrogate
defaults:
  evaporating_psia: 50.0
  condensing_psia: 150.0
"#;
    let config = from_yaml_str(yaml).unwrap();
    assert_eq!(config.provider, ProviderKind::Surrogate);
    assert_eq!(config.defaults.evaporating_psia, 50.0);
    assert_eq!(config.defaults.efficiency, 0.75);
    assert_eq!(config.axes, SimulatorConfig::default().axes);
    assert_eq!(config.palette, SimulatorConfig::default().palette);
}

#[test]
fn inverted_axis_range_is_a_validation_error() {
    let yaml = r#"
axes:
  h_min_btu_lb: 210.0
  h_max_btu_lb: 40.0
"#;
    let err = from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)), "{err}");
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let err = from_yaml_str("defaults: [not, a, map]").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn configured_model_runs_on_surrogate() {
    let config = from_yaml_str("provider: surrogate\n").unwrap();
    let model = ph_cycle::CycleModel::new(
        config.provider.build(),
        config.refrigerant().unwrap(),
        config.defaults.to_parameters(),
        config.parameter_limits(),
        config.faults.to_table(),
    )
    .unwrap();
    assert!(model.current_result().is_some());

    let axis = config.axes.to_axis_range().unwrap();
    let viewport = config.window.to_layout().plot_viewport(1300.0, 880.0).unwrap();
    let mapper = ph_diagram::CoordinateMapper::new(axis, viewport, ph_diagram::RangePolicy::Reject);
    assert_eq!(mapper.pressure_ticks(&config.axes.pressure_ticks()).len(), 10);
}
