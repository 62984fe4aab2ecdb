//! Valuation engine
//!
//! Maps a pet type, variant and numeric parameters to a single estimated
//! value. Every computation is a pure function of its inputs and the model
//! table; nothing is cached between calls.

mod integral;
mod models;
mod table;
mod types;

pub use integral::Integrand;
pub use models::{model_for, ModelFn, ModelInputs, ModelSpec, MODELS};
pub use table::{
    DefinedPassModel, DemandConfig, ModelTable, PassModel, Revision, RiftModel, Root,
    SaturationSign, ScarcityForm, ScarcityModel, ShopModel, VariantMultipliers,
};
pub use types::{Param, ValuationError, ValuationRequest};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::time::Instant;

use crate::category::{PetType, Variant};
use crate::telemetry;

/// Largest relative error accepted when a result is converted to `Decimal`
pub const MAX_CONVERSION_ERROR: f64 = 1e-6;

/// Compute the estimated value for one pet
///
/// The result keeps full precision; round only for display. `Decimal`
/// holds at most 28 fractional digits, so a positive result too small to
/// be represented within [`MAX_CONVERSION_ERROR`] of itself is reported as
/// [`ValuationError::UnevaluableExpression`] rather than rounded to zero.
pub fn compute_value(
    table: &ModelTable,
    pet_type: PetType,
    variant: Variant,
    request: &ValuationRequest,
) -> Result<Decimal, ValuationError> {
    let spec = model_for(pet_type);
    let inputs = ModelInputs::prepare(spec, table, variant, request)?;
    let value = (spec.evaluate)(&inputs)?;

    if !value.is_finite() {
        return Err(ValuationError::unevaluable("result is not finite"));
    }
    if value < 0.0 {
        return Err(ValuationError::unevaluable(format!(
            "result {value} is negative"
        )));
    }
    let decimal = Decimal::try_from(value)
        .map_err(|_| ValuationError::unevaluable(format!("result {value} exceeds decimal range")))?;

    let represented = decimal.to_f64().unwrap_or(0.0);
    if value > 0.0 && (represented - value).abs() > value * MAX_CONVERSION_ERROR {
        return Err(ValuationError::unevaluable(format!(
            "result {value} is below decimal precision"
        )));
    }
    Ok(decimal)
}

/// [`compute_value`] for exact category labels
pub fn compute_value_from_labels(
    table: &ModelTable,
    pet_type: &str,
    variant: &str,
    request: &ValuationRequest,
) -> Result<Decimal, ValuationError> {
    let pet_type: PetType = pet_type.parse()?;
    let variant: Variant = variant.parse()?;
    compute_value(table, pet_type, variant, request)
}

/// Valuation engine bound to one model table
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    table: ModelTable,
}

impl ValuationEngine {
    pub fn new(table: ModelTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ModelTable {
        &self.table
    }

    /// Required parameters for a pet type
    pub fn required_params(&self, pet_type: PetType) -> &'static [Param] {
        model_for(pet_type).required
    }

    /// Compute a value, logging and recording the outcome
    pub fn compute(
        &self,
        pet_type: PetType,
        variant: Variant,
        request: &ValuationRequest,
    ) -> Result<Decimal, ValuationError> {
        let started = Instant::now();
        let result = compute_value(&self.table, pet_type, variant, request);
        telemetry::record_valuation(pet_type, result.is_ok(), started.elapsed());

        match &result {
            Ok(value) => tracing::debug!(
                pet_type = %pet_type,
                variant = %variant,
                value = %value,
                "Computed valuation"
            ),
            Err(e) => tracing::warn!(
                pet_type = %pet_type,
                variant = %variant,
                error = %e,
                "Valuation failed"
            ),
        }
        result
    }
}
