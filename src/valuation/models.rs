//! Per-type valuation models
//!
//! Each pet type maps to one pure function plus the list of parameters it
//! requires. Inputs are validated and converted to `f64` once, in
//! [`ModelInputs::prepare`], before any model runs.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::integral::Integrand;
use super::table::{ModelTable, PassModel, RiftModel, Root, ScarcityForm, ScarcityModel};
use super::{Param, ValuationError, ValuationRequest};
use crate::category::{PetType, Variant};

/// Model function signature
pub type ModelFn = fn(&ModelInputs<'_>) -> Result<f64, ValuationError>;

/// A pet type's model and its required-parameter schema
pub struct ModelSpec {
    pub pet_type: PetType,
    pub required: &'static [Param],
    pub evaluate: ModelFn,
}

const SCARCITY_PARAMS: &[Param] = &[Param::Exist, Param::Rarity, Param::Demand];
const RIFT_PARAMS: &[Param] = &[Param::Exist, Param::Rarity, Param::Demand, Param::IslandChance];
const PASS_PARAMS: &[Param] = &[Param::Rarity, Param::Demand, Param::C];
const SHOP_PARAMS: &[Param] = &[Param::Price, Param::Demand, Param::C];

/// Lookup table from pet type to model, in [`PetType::ALL`] order
pub static MODELS: [ModelSpec; 8] = [
    ModelSpec {
        pet_type: PetType::Permanent,
        required: SCARCITY_PARAMS,
        evaluate: permanent,
    },
    ModelSpec {
        pet_type: PetType::Limited,
        required: SCARCITY_PARAMS,
        evaluate: limited,
    },
    ModelSpec {
        pet_type: PetType::Pass,
        required: PASS_PARAMS,
        evaluate: pass,
    },
    ModelSpec {
        pet_type: PetType::PassLimited,
        required: PASS_PARAMS,
        evaluate: pass_limited,
    },
    ModelSpec {
        pet_type: PetType::DefinedPass,
        required: SCARCITY_PARAMS,
        evaluate: defined_pass,
    },
    ModelSpec {
        pet_type: PetType::Shop,
        required: SHOP_PARAMS,
        evaluate: shop,
    },
    ModelSpec {
        pet_type: PetType::Rift,
        required: RIFT_PARAMS,
        evaluate: rift,
    },
    ModelSpec {
        pet_type: PetType::RiftLimited,
        required: RIFT_PARAMS,
        evaluate: rift_limited,
    },
];

/// Model spec for a pet type
pub fn model_for(pet_type: PetType) -> &'static ModelSpec {
    match pet_type {
        PetType::Permanent => &MODELS[0],
        PetType::Limited => &MODELS[1],
        PetType::Pass => &MODELS[2],
        PetType::PassLimited => &MODELS[3],
        PetType::DefinedPass => &MODELS[4],
        PetType::Shop => &MODELS[5],
        PetType::Rift => &MODELS[6],
        PetType::RiftLimited => &MODELS[7],
    }
}

/// Validated model inputs, in `f64`
///
/// Absent optional parameters are zero; the schema check guarantees every
/// required one is present and positive.
#[derive(Debug, Clone)]
pub struct ModelInputs<'a> {
    pub table: &'a ModelTable,
    pub variant: Variant,
    /// Table multiplier for the variant
    pub multiplier: f64,
    /// User multiplier if supplied, otherwise the table multiplier
    pub variant_multi: f64,
    pub exist: f64,
    pub rarity: f64,
    pub demand: f64,
    pub c: f64,
    pub price: f64,
    pub island_chance: f64,
}

impl<'a> ModelInputs<'a> {
    /// Check `request` against the schema for `spec` and convert to `f64`
    pub fn prepare(
        spec: &ModelSpec,
        table: &'a ModelTable,
        variant: Variant,
        request: &ValuationRequest,
    ) -> Result<Self, ValuationError> {
        for param in spec.required {
            if !request.has(*param) {
                return Err(ValuationError::invalid(
                    *param,
                    format!("required for {} pets", spec.pet_type),
                ));
            }
        }

        if let Some(exist) = request.exist {
            if exist == 0 {
                return Err(ValuationError::invalid(Param::Exist, "must be greater than zero"));
            }
        }
        if let Some(price) = request.price {
            if price == 0 {
                return Err(ValuationError::invalid(Param::Price, "must be greater than zero"));
            }
        }
        if let Some(demand) = request.demand {
            if !table.demand.contains(demand) {
                return Err(ValuationError::invalid(
                    Param::Demand,
                    format!(
                        "must be between {} and {}, got {demand}",
                        table.demand.min, table.demand.max
                    ),
                ));
            }
        }

        let multiplier = positive(
            Param::VariantMulti,
            Some(table.variant_multipliers.get(variant)),
        )?;
        let variant_multi = match request.variant_multi {
            Some(_) => positive(Param::VariantMulti, request.variant_multi)?,
            None => multiplier,
        };

        Ok(Self {
            table,
            variant,
            multiplier,
            variant_multi,
            exist: request.exist.unwrap_or(0) as f64,
            rarity: positive(Param::Rarity, request.rarity)?,
            demand: request.demand.unwrap_or(0) as f64,
            c: positive(Param::C, request.c)?,
            price: request.price.unwrap_or(0) as f64,
            island_chance: positive(Param::IslandChance, request.island_chance)?,
        })
    }

    /// `1 + k * e^(rate * demand)`
    fn demand_weight(&self, k: Decimal) -> Result<f64, ValuationError> {
        let k = constant(k)?;
        let rate = constant(self.table.demand.rate)?;
        finite(1.0 + k * (rate * self.demand).exp(), "demand weight")
    }
}

/// Positive decimal parameter as `f64`; absent means zero
fn positive(param: Param, value: Option<Decimal>) -> Result<f64, ValuationError> {
    let Some(value) = value else {
        return Ok(0.0);
    };
    if value <= Decimal::ZERO {
        return Err(ValuationError::invalid(
            param,
            format!("must be greater than zero, got {value}"),
        ));
    }
    value
        .to_f64()
        .ok_or_else(|| ValuationError::invalid(param, "not representable as a float"))
}

fn constant(value: Decimal) -> Result<f64, ValuationError> {
    value
        .to_f64()
        .ok_or_else(|| ValuationError::unevaluable(format!("model constant {value} out of range")))
}

fn finite(value: f64, what: &str) -> Result<f64, ValuationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::unevaluable(format!("{what} is not finite")))
    }
}

/// `base^exponent`, refusing to take fractional powers of negative numbers
fn real_pow(base: f64, exponent: f64) -> Result<f64, ValuationError> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(ValuationError::unevaluable(format!(
            "negative base {base} raised to fractional power {exponent}"
        )));
    }
    finite(base.powf(exponent), "power")
}

fn real_root(value: f64, root: Root) -> Result<f64, ValuationError> {
    match root {
        Root::Square if value < 0.0 => Err(ValuationError::unevaluable(format!(
            "square root of negative value {value}"
        ))),
        Root::Square => Ok(value.sqrt()),
        Root::Cube => Ok(value.cbrt()),
    }
}

/// `∫_lower^{upper} sqrt(k / upper) dx`, the constant-integrand form the
/// scarcity models are built from
fn scarcity_integral(k: f64, lower: f64, upper: f64) -> Result<f64, ValuationError> {
    let value = real_root(k / upper, Root::Square)?;
    Integrand::Constant { value }.integrate(lower, upper)
}

/// Difference of the scarcity integrals over the shifted and plain intervals
fn scarcity_difference(k: f64, exist: f64, lower: f64, upper_offset: u64) -> Result<f64, ValuationError> {
    let shifted = scarcity_integral(k, lower, exist + upper_offset as f64)?;
    let plain = scarcity_integral(k, lower, exist)?;
    Ok(shifted - plain)
}

fn scarcity(inputs: &ModelInputs<'_>, model: &ScarcityModel) -> Result<f64, ValuationError> {
    let k = inputs.rarity * inputs.multiplier;
    let base = match model.form {
        ScarcityForm::ClosedForm => real_root(k / inputs.exist, Root::Square)?,
        ScarcityForm::Integral { upper_offset } => {
            scarcity_difference(k, inputs.exist, 0.0, upper_offset)?
        }
    };
    finite(base * inputs.demand_weight(model.demand_weight)?, "scarcity value")
}

fn permanent(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    scarcity(inputs, &inputs.table.permanent)
}

fn limited(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    scarcity(inputs, &inputs.table.limited)
}

fn rift_value(inputs: &ModelInputs<'_>, model: &RiftModel) -> Result<f64, ValuationError> {
    let lower = constant(model.lower_bound)?;
    if inputs.exist <= lower {
        return Err(ValuationError::invalid(
            Param::Exist,
            format!("must exceed the lower integration bound {}", model.lower_bound),
        ));
    }
    let k = inputs.rarity * inputs.multiplier * (inputs.island_chance / 100.0);
    let diff = scarcity_difference(k, inputs.exist, lower, model.upper_offset)?;
    finite(diff * inputs.demand_weight(model.demand_weight)?, "rift value")
}

fn rift(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    rift_value(inputs, &inputs.table.rift)
}

fn rift_limited(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    rift_value(inputs, &inputs.table.rift_limited)
}

fn pass_value(inputs: &ModelInputs<'_>, model: &PassModel) -> Result<f64, ValuationError> {
    // ((1 ± e^(-cx)) / c) / rarity
    let curve = Integrand::Saturation {
        scale: 1.0 / (inputs.c * inputs.rarity),
        rate: inputs.c,
        sign: model.sign.as_f64(),
    };
    let diff = curve.integrate(inputs.demand, inputs.demand + model.upper_offset as f64)?;

    let mut value = real_pow(diff, constant(model.exponent)?)?;
    if !inputs.variant.is_normal() {
        value = value / (1.0 / (inputs.variant_multi / constant(model.variant_divisor)?));
    }
    finite(constant(model.coefficient)? * real_root(value, Root::Square)?, "pass value")
}

fn pass(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    pass_value(inputs, &inputs.table.pass)
}

fn pass_limited(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    pass_value(inputs, &inputs.table.pass_limited)
}

fn defined_pass(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    let model = &inputs.table.defined_pass;
    let coefficient = constant(model.coefficient)?;

    if inputs.variant.is_normal() {
        let k = inputs.rarity * inputs.rarity;
        let diff = scarcity_difference(k, inputs.exist, 0.0, model.upper_offset)?;
        return finite(
            coefficient * diff * inputs.demand_weight(model.demand_weight)?,
            "defined pass value",
        );
    }

    let scaled = inputs.rarity * inputs.variant_multi;
    let diff = scarcity_difference(scaled * scaled, inputs.exist, 0.0, model.upper_offset)?;
    let raised = real_pow(diff, constant(model.variant_exponent)?)?;
    let divided = raised / (inputs.variant_multi / constant(model.variant_divisor)?);
    finite(
        coefficient * real_root(divided, model.variant_root)?,
        "defined pass value",
    )
}

fn shop(inputs: &ModelInputs<'_>) -> Result<f64, ValuationError> {
    let model = &inputs.table.shop;
    // price * (1 - e^(-cx)) / (c / x)
    let curve = Integrand::RampSaturation {
        scale: inputs.price / inputs.c,
        rate: inputs.c,
    };
    let diff = curve.integrate(inputs.demand, inputs.demand + model.upper_offset as f64)?;

    let mut value = real_pow(diff, constant(model.exponent)?)?;
    if !inputs.variant.is_normal() {
        value = value / (1.0 / (inputs.variant_multi / constant(model.variant_divisor)?));
    }
    finite(constant(model.coefficient)? * real_root(value, Root::Square)?, "shop value")
}
