use voxscribe::infrastructure::observability::TracingConfig;

#[test]
fn given_level_when_building_config_then_default_filter_scopes_crate_and_http() {
    let config = TracingConfig::new("Test", true, "warn");

    assert_eq!(config.environment, "Test");
    assert!(config.json_format);
    assert_eq!(config.default_filter, "warn,voxscribe=debug,tower_http=debug");
}
