//! End-to-end integration tests

use pet_value::category::{PetType, Variant};
use pet_value::config::Config;
use pet_value::report::ValuationReport;
use pet_value::valuation::{Revision, ValuationEngine, ValuationRequest};
use rust_decimal_macros::dec;

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.valuation.revision, Revision::Current);
    assert_eq!(config.resolver.threshold, 70);
    assert_eq!(config.resolver.max_attempts, 5);
}

#[test]
fn test_config_to_report() {
    let toml = r#"
        [valuation]
        revision = "legacy"
    "#;
    let config: Config = toml::from_str(toml).unwrap();
    let engine = ValuationEngine::new(config.model_table().unwrap());

    let request = ValuationRequest::new()
        .with_exist(1000)
        .with_rarity(dec!(1000000))
        .with_demand(15);
    let value = engine
        .compute(PetType::Limited, Variant::ShinyMythic, &request)
        .unwrap();

    let report = ValuationReport::new(PetType::Limited, Variant::ShinyMythic, value);
    assert!(report.display.ends_with(|c: char| c.is_ascii_digit()));
    assert!(report.display.contains(','));
}
