//! Integration tests for the valuation engine

use pet_value::category::{PetType, Variant};
use pet_value::valuation::{
    compute_value, ModelTable, Param, Revision, ValuationEngine, ValuationError, ValuationRequest,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn full_request() -> ValuationRequest {
    ValuationRequest::new()
        .with_exist(500)
        .with_rarity(dec!(1000))
        .with_demand(5)
        .with_c(dec!(0.5))
        .with_price(100)
        .with_island_chance(dec!(10))
}

fn value(pet_type: PetType, variant: Variant, request: &ValuationRequest) -> f64 {
    compute_value(&ModelTable::current(), pet_type, variant, request)
        .unwrap()
        .to_f64()
        .unwrap()
}

#[test]
fn test_every_combination_is_finite_and_non_negative() {
    for revision in [Revision::Current, Revision::Legacy] {
        let table = revision.table();
        for pet_type in PetType::ALL {
            for variant in Variant::ALL {
                let result = compute_value(&table, pet_type, variant, &full_request());
                let value = result.unwrap_or_else(|e| panic!("{pet_type} {variant}: {e}"));
                assert!(value >= Decimal::ZERO, "{pet_type} {variant} negative");
            }
        }
    }
}

#[test]
fn test_permanent_known_value() {
    let request = ValuationRequest::new()
        .with_exist(500)
        .with_rarity(dec!(1000))
        .with_demand(5);
    let expected = (1000.0f64 / 500.0).sqrt() * (1.0 + 0.1 * (0.25f64 * 5.0).exp());
    let actual = value(PetType::Permanent, Variant::Normal, &request);
    assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
}

#[test]
fn test_limited_known_value() {
    let request = ValuationRequest::new()
        .with_exist(20)
        .with_rarity(dec!(5000))
        .with_demand(8);
    let expected = (5000.0f64 * 80.0 / 20.0).sqrt() * (1.0 + 0.25 * 2f64.exp());
    let actual = value(PetType::Limited, Variant::Mythic, &request);
    assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
}

#[test]
fn test_demand_weight_is_monotonic() {
    let weighted = [
        (PetType::Permanent, Variant::Normal),
        (PetType::Limited, Variant::Shiny),
        (PetType::Rift, Variant::Normal),
        (PetType::RiftLimited, Variant::Mythic),
        (PetType::DefinedPass, Variant::Normal),
    ];
    for (pet_type, variant) in weighted {
        let mut previous = f64::MIN;
        for demand in 1..=10 {
            let request = full_request().with_demand(demand);
            let current = value(pet_type, variant, &request);
            assert!(current > previous, "{pet_type} not increasing at demand {demand}");
            previous = current;
        }
    }
}

#[test]
fn test_zero_rarity_or_exist_rejected_everywhere() {
    for pet_type in PetType::ALL {
        let request = full_request().with_rarity(Decimal::ZERO);
        let err = compute_value(&ModelTable::current(), pet_type, Variant::Normal, &request)
            .unwrap_err();
        assert!(
            matches!(err, ValuationError::InvalidParameter { param: Param::Rarity, .. }),
            "{pet_type}: {err}"
        );

        let request = full_request().with_exist(0);
        let err = compute_value(&ModelTable::current(), pet_type, Variant::Normal, &request)
            .unwrap_err();
        assert!(
            matches!(err, ValuationError::InvalidParameter { param: Param::Exist, .. }),
            "{pet_type}: {err}"
        );
    }
}

#[test]
fn test_negative_parameters_rejected() {
    let request = full_request().with_c(dec!(-0.5));
    let err = compute_value(&ModelTable::current(), PetType::Shop, Variant::Normal, &request)
        .unwrap_err();
    assert!(matches!(err, ValuationError::InvalidParameter { param: Param::C, .. }));

    let request = full_request().with_price(0);
    let err = compute_value(&ModelTable::current(), PetType::Shop, Variant::Normal, &request)
        .unwrap_err();
    assert!(matches!(err, ValuationError::InvalidParameter { param: Param::Price, .. }));

    let request = full_request().with_island_chance(dec!(-1));
    let err = compute_value(&ModelTable::current(), PetType::Rift, Variant::Normal, &request)
        .unwrap_err();
    assert!(matches!(err, ValuationError::InvalidParameter { param: Param::IslandChance, .. }));
}

#[test]
fn test_shiny_at_least_normal() {
    let multiplicative = [
        PetType::Permanent,
        PetType::Limited,
        PetType::Rift,
        PetType::RiftLimited,
        PetType::Pass,
        PetType::PassLimited,
        PetType::Shop,
    ];
    for pet_type in multiplicative {
        let normal = value(pet_type, Variant::Normal, &full_request());
        let shiny = value(pet_type, Variant::Shiny, &full_request());
        assert!(shiny >= normal, "{pet_type}: shiny {shiny} < normal {normal}");
    }
}

#[test]
fn test_repeated_calls_identical() {
    let engine = ValuationEngine::default();
    for pet_type in PetType::ALL {
        let first = engine.compute(pet_type, Variant::ShinyMythic, &full_request()).unwrap();
        let second = engine.compute(pet_type, Variant::ShinyMythic, &full_request()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_demand_range_depends_on_revision() {
    let request = full_request().with_demand(20);
    let current = compute_value(&ModelTable::current(), PetType::Permanent, Variant::Normal, &request);
    assert!(matches!(
        current,
        Err(ValuationError::InvalidParameter { param: Param::Demand, .. })
    ));

    let legacy = compute_value(&ModelTable::legacy(), PetType::Permanent, Variant::Normal, &request);
    assert!(legacy.is_ok());
}

#[test]
fn test_overflowing_weight_is_unevaluable() {
    let mut table = ModelTable::current();
    table.demand.rate = dec!(1000);
    let err = compute_value(&table, PetType::Permanent, Variant::Normal, &full_request()).unwrap_err();
    assert!(matches!(err, ValuationError::UnevaluableExpression(_)));
}

#[test]
fn test_result_beyond_decimal_range_is_unevaluable() {
    let mut table = ModelTable::current();
    table.demand.rate = dec!(15);
    let request = full_request().with_demand(10);
    let err = compute_value(&table, PetType::Permanent, Variant::Normal, &request).unwrap_err();
    assert!(matches!(err, ValuationError::UnevaluableExpression(_)));
}

#[test]
fn test_variant_multi_override_changes_pass_value() {
    let request = full_request();
    let table_multi = value(PetType::Pass, Variant::Shiny, &request);
    let custom = value(PetType::Pass, Variant::Shiny, &request.clone().with_variant_multi(dec!(3)));
    let normal = value(PetType::Pass, Variant::Normal, &request);
    // variant_multi / 3 == 1 leaves the value unscaled
    assert!((custom - normal).abs() < 1e-9);
    assert!(table_multi > custom);
}

#[test]
fn test_variant_multi_ignored_for_normal() {
    let request = full_request().with_variant_multi(dec!(50));
    let with_multi = value(PetType::Shop, Variant::Normal, &request);
    let without = value(PetType::Shop, Variant::Normal, &full_request());
    assert_eq!(with_multi, without);
}

/// Composite Simpson's rule, for reference values only
fn simpson(f: impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    let n = 2000;
    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }
    sum * h / 3.0
}

/// `(1 - e^(-cx)) / c` without cancellation for small `c`
fn saturation(c: f64, x: f64) -> f64 {
    -(-c * x).exp_m1() / c
}

fn f(value: Decimal) -> f64 {
    value.to_f64().unwrap()
}

/// Normal-variant value computed by quadrature straight from the model constants
fn reference_value(table: &ModelTable, pet_type: PetType, rarity: f64, price: f64, demand: f64, c: f64) -> f64 {
    match pet_type {
        PetType::Shop => {
            let model = &table.shop;
            let upper = demand + model.upper_offset as f64;
            let diff = simpson(|x| price * x * saturation(c, x), demand, upper);
            f(model.coefficient) * diff.powf(f(model.exponent)).sqrt()
        }
        PetType::Pass | PetType::PassLimited => {
            let model = if pet_type == PetType::Pass { &table.pass } else { &table.pass_limited };
            let sign = model.sign.as_f64();
            let upper = demand + model.upper_offset as f64;
            // (1 + s e^(-cx)) / (c rarity) == ((1 + s) / c - s (1 - e^(-cx)) / c) / rarity
            let diff = simpson(|x| ((1.0 + sign) / c - sign * saturation(c, x)) / rarity, demand, upper);
            f(model.coefficient) * diff.powf(f(model.exponent)).sqrt()
        }
        other => panic!("no reference for {other}"),
    }
}

#[test]
fn test_saturation_models_across_decay_rates() {
    let rates = [
        Decimal::new(1, 12),
        Decimal::new(1, 9),
        Decimal::new(1, 6),
        Decimal::new(1, 3),
        Decimal::new(1, 1),
        Decimal::ONE,
        Decimal::TEN,
    ];
    for revision in [Revision::Current, Revision::Legacy] {
        let table = revision.table();
        for pet_type in [PetType::Shop, PetType::Pass, PetType::PassLimited] {
            for demand in [table.demand.min, table.demand.max] {
                for c in rates {
                    let request = ValuationRequest::new()
                        .with_rarity(dec!(10))
                        .with_price(100)
                        .with_demand(demand)
                        .with_c(c);
                    let actual = compute_value(&table, pet_type, Variant::Normal, &request)
                        .unwrap_or_else(|e| panic!("{revision:?} {pet_type} c={c} demand={demand}: {e}"));
                    let actual = f(actual);
                    let expected = reference_value(&table, pet_type, 10.0, 100.0, demand as f64, f(c));

                    assert!(actual.is_finite() && actual > 0.0, "{revision:?} {pet_type} c={c}: {actual}");
                    assert!(
                        ((actual - expected) / expected).abs() < 1e-6,
                        "{revision:?} {pet_type} c={c} demand={demand}: {actual} != {expected}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_small_decay_rate_approaches_limit() {
    // c -> 0: shop tends to coefficient * sqrt((price * ((d + 2)^3 - d^3) / 3)^1.15)
    let shop_limit = 0.5 * (100.0 * (125.0 - 27.0) / 3.0f64).powf(1.15).sqrt();
    for c in [Decimal::new(1, 6), Decimal::new(1, 8), Decimal::new(1, 12)] {
        let request = ValuationRequest::new().with_price(100).with_demand(3).with_c(c);
        let actual = value(PetType::Shop, Variant::Normal, &request);
        assert!(((actual - shop_limit) / shop_limit).abs() < 1e-5, "c={c}: {actual}");
    }

    // Legacy pass tends to coefficient * sqrt((integral of x / rarity over [3, 4])^3)
    let pass_limit = 0.5 * (3.5f64 / 10.0).powi(3).sqrt();
    for c in [Decimal::new(1, 6), Decimal::new(1, 8), Decimal::new(1, 10)] {
        let request = ValuationRequest::new().with_rarity(dec!(10)).with_demand(3).with_c(c);
        let actual = compute_value(&ModelTable::legacy(), PetType::Pass, Variant::Normal, &request)
            .unwrap();
        let actual = f(actual);
        assert!(((actual - pass_limit) / pass_limit).abs() < 1e-5, "c={c}: {actual}");
    }
}

#[test]
fn test_result_below_decimal_precision_is_unevaluable() {
    let request = ValuationRequest::new()
        .with_rarity(Decimal::from_i128_with_scale(10i128.pow(28), 0))
        .with_demand(3)
        .with_c(dec!(0.5));
    let err = compute_value(&ModelTable::current(), PetType::Pass, Variant::Normal, &request).unwrap_err();
    assert!(matches!(err, ValuationError::UnevaluableExpression(_)));
}
