//! Valuation metrics
//!
//! Recorded through the `metrics` facade. Without an installed recorder
//! these calls are no-ops.

use std::time::Duration;

use crate::category::PetType;

/// Counter of valuations by pet type and outcome
pub const VALUATIONS_TOTAL: &str = "petvalue_valuations_total";
/// Histogram of valuation wall time in microseconds
pub const VALUATION_DURATION_US: &str = "petvalue_valuation_duration_us";

/// Record one valuation
pub fn record_valuation(pet_type: PetType, success: bool, duration: Duration) {
    let outcome = if success { "ok" } else { "error" };

    ::metrics::counter!(VALUATIONS_TOTAL, "pet_type" => pet_type.label(), "outcome" => outcome)
        .increment(1);
    ::metrics::histogram!(VALUATION_DURATION_US, "pet_type" => pet_type.label())
        .record(duration.as_secs_f64() * 1_000_000.0);

    tracing::trace!(
        metric = VALUATIONS_TOTAL,
        pet_type = pet_type.label(),
        outcome,
        duration_us = duration.as_micros() as u64,
        "Recorded valuation"
    );
}
