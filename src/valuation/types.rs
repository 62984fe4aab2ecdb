//! Valuation request and error types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Valuation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Type or variant label outside the fixed vocabulary
    #[error("Unrecognized category: {0}")]
    UnrecognizedCategory(String),
    /// Parameter missing, non-positive or out of range
    #[error("Invalid parameter {param}: {reason}")]
    InvalidParameter { param: Param, reason: String },
    /// Expression does not reduce to a finite real number
    #[error("Expression could not be evaluated: {0}")]
    UnevaluableExpression(String),
}

impl ValuationError {
    pub(crate) fn invalid(param: Param, reason: impl Into<String>) -> Self {
        ValuationError::InvalidParameter {
            param,
            reason: reason.into(),
        }
    }

    pub(crate) fn unevaluable(reason: impl Into<String>) -> Self {
        ValuationError::UnevaluableExpression(reason.into())
    }
}

/// Name of a request parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Exist,
    Rarity,
    Demand,
    C,
    Price,
    VariantMulti,
    IslandChance,
}

impl Param {
    pub fn name(&self) -> &'static str {
        match self {
            Param::Exist => "exist",
            Param::Rarity => "rarity",
            Param::Demand => "demand",
            Param::C => "c",
            Param::Price => "price",
            Param::VariantMulti => "variant_multi",
            Param::IslandChance => "island_chance",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric inputs for one valuation
///
/// Which fields are required depends on the pet type; see
/// [`super::models::ModelSpec::required`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    /// Number of copies in existence
    pub exist: Option<u64>,
    /// Rarity at acquisition time
    pub rarity: Option<Decimal>,
    /// Market demand score
    pub demand: Option<i64>,
    /// Decay rate for the saturation curves
    pub c: Option<Decimal>,
    /// Shop price
    pub price: Option<u64>,
    /// User-supplied variant multiplier
    pub variant_multi: Option<Decimal>,
    /// Island chance, in percent
    pub island_chance: Option<Decimal>,
}

impl ValuationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exist(mut self, exist: u64) -> Self {
        self.exist = Some(exist);
        self
    }

    pub fn with_rarity(mut self, rarity: Decimal) -> Self {
        self.rarity = Some(rarity);
        self
    }

    pub fn with_demand(mut self, demand: i64) -> Self {
        self.demand = Some(demand);
        self
    }

    pub fn with_c(mut self, c: Decimal) -> Self {
        self.c = Some(c);
        self
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_variant_multi(mut self, variant_multi: Decimal) -> Self {
        self.variant_multi = Some(variant_multi);
        self
    }

    pub fn with_island_chance(mut self, island_chance: Decimal) -> Self {
        self.island_chance = Some(island_chance);
        self
    }

    /// Whether a value was supplied for `param`
    pub fn has(&self, param: Param) -> bool {
        match param {
            Param::Exist => self.exist.is_some(),
            Param::Rarity => self.rarity.is_some(),
            Param::Demand => self.demand.is_some(),
            Param::C => self.c.is_some(),
            Param::Price => self.price.is_some(),
            Param::VariantMulti => self.variant_multi.is_some(),
            Param::IslandChance => self.island_chance.is_some(),
        }
    }
}
