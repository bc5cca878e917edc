//! Configuration tests.
//!
//! Verifies baseline defaults and partial JSON deserialization.

use pagestat_core::config::TrackerConfig;

#[test]
fn default_config_baseline() {
    let config = TrackerConfig::default();
    assert_eq!(config.num_cores, 1);
    assert_eq!(config.base_frame, 0x80000);
    assert_eq!(config.page_count, 32 * 1024);
    assert_eq!(config.slow_tier_base, config.base_frame + config.page_count);
}

#[test]
fn partial_json_fills_missing_fields_with_defaults() {
    let config: TrackerConfig =
        serde_json::from_str(r#"{ "num_cores": 8, "slow_tier_base": 4096 }"#).unwrap();
    assert_eq!(config.num_cores, 8);
    assert_eq!(config.slow_tier_base, 4096);
    assert_eq!(config.base_frame, TrackerConfig::default().base_frame);
    assert_eq!(config.page_count, TrackerConfig::default().page_count);
}
