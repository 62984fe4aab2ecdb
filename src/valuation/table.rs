//! Model constant table
//!
//! All per-type constants live here so a revision can be audited and
//! reproduced from configuration. Two presets exist: `current` and
//! `legacy` (the earlier revision, with the 320 shiny-mythic multiplier,
//! integral-form permanent/limited models and the `1 - e^(-cx)` pass curve).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::category::Variant;

/// Named preset of the model table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    #[default]
    Current,
    Legacy,
}

impl Revision {
    pub fn table(&self) -> ModelTable {
        match self {
            Revision::Current => ModelTable::current(),
            Revision::Legacy => ModelTable::legacy(),
        }
    }
}

/// Fixed multiplier per variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantMultipliers {
    pub normal: Decimal,
    pub shiny: Decimal,
    pub mythic: Decimal,
    pub shiny_mythic: Decimal,
}

impl VariantMultipliers {
    pub fn get(&self, variant: Variant) -> Decimal {
        match variant {
            Variant::Normal => self.normal,
            Variant::Shiny => self.shiny,
            Variant::Mythic => self.mythic,
            Variant::ShinyMythic => self.shiny_mythic,
        }
    }
}

/// Accepted demand range and the rate of the demand weight
/// `1 + k * e^(rate * demand)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandConfig {
    pub min: i64,
    pub max: i64,
    pub rate: Decimal,
}

impl DemandConfig {
    pub fn contains(&self, demand: i64) -> bool {
        (self.min..=self.max).contains(&demand)
    }
}

/// How the permanent/limited model turns rarity and exist into a base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScarcityForm {
    /// `sqrt(rarity * multiplier / exist)`
    ClosedForm,
    /// Difference of integrals over `[0, exist + upper_offset]` and `[0, exist]`
    Integral { upper_offset: u64 },
}

/// Permanent and limited pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScarcityModel {
    pub form: ScarcityForm,
    /// Demand weight coefficient `k`
    pub demand_weight: Decimal,
}

/// Rift pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiftModel {
    /// Lower integration bound, keeps the integrand away from zero
    pub lower_bound: Decimal,
    pub upper_offset: u64,
    pub demand_weight: Decimal,
}

/// Sign in front of the exponential in the pass integrand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaturationSign {
    Plus,
    Minus,
}

impl SaturationSign {
    pub fn as_f64(&self) -> f64 {
        match self {
            SaturationSign::Plus => 1.0,
            SaturationSign::Minus => -1.0,
        }
    }
}

/// Root taken after the power step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Root {
    Square,
    Cube,
}

/// Pass pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassModel {
    pub sign: SaturationSign,
    pub upper_offset: u64,
    pub exponent: Decimal,
    /// Non-normal variants scale by `variant_multi / variant_divisor`
    pub variant_divisor: Decimal,
    pub coefficient: Decimal,
}

/// Defined pass pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinedPassModel {
    pub upper_offset: u64,
    pub coefficient: Decimal,
    /// Demand weight `k`, normal variant only
    pub demand_weight: Decimal,
    pub variant_exponent: Decimal,
    pub variant_divisor: Decimal,
    pub variant_root: Root,
}

/// Shop pets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopModel {
    pub upper_offset: u64,
    pub exponent: Decimal,
    pub variant_divisor: Decimal,
    pub coefficient: Decimal,
}

/// Every constant the valuation models read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTable {
    pub variant_multipliers: VariantMultipliers,
    pub demand: DemandConfig,
    pub permanent: ScarcityModel,
    pub limited: ScarcityModel,
    pub rift: RiftModel,
    pub rift_limited: RiftModel,
    pub pass: PassModel,
    pub pass_limited: PassModel,
    pub defined_pass: DefinedPassModel,
    pub shop: ShopModel,
}

impl Default for ModelTable {
    fn default() -> Self {
        Self::current()
    }
}

impl ModelTable {
    /// The later revision
    pub fn current() -> Self {
        Self {
            variant_multipliers: VariantMultipliers {
                normal: dec!(1),
                shiny: dec!(40),
                mythic: dec!(80),
                shiny_mythic: dec!(400),
            },
            demand: DemandConfig {
                min: 1,
                max: 10,
                rate: dec!(0.25),
            },
            permanent: ScarcityModel {
                form: ScarcityForm::ClosedForm,
                demand_weight: dec!(0.1),
            },
            limited: ScarcityModel {
                form: ScarcityForm::ClosedForm,
                demand_weight: dec!(0.25),
            },
            rift: RiftModel {
                lower_bound: dec!(0.000001),
                upper_offset: 1,
                demand_weight: dec!(0.1),
            },
            rift_limited: RiftModel {
                lower_bound: dec!(0.000001),
                upper_offset: 1,
                demand_weight: dec!(0.15),
            },
            pass: PassModel {
                sign: SaturationSign::Plus,
                upper_offset: 1,
                exponent: dec!(2.5),
                variant_divisor: dec!(3),
                coefficient: dec!(0.5),
            },
            pass_limited: PassModel {
                sign: SaturationSign::Plus,
                upper_offset: 1,
                exponent: dec!(2.5),
                variant_divisor: dec!(3),
                coefficient: dec!(0.75),
            },
            defined_pass: DefinedPassModel {
                upper_offset: 1,
                coefficient: dec!(2),
                demand_weight: dec!(0.1),
                variant_exponent: dec!(2),
                variant_divisor: dec!(3),
                variant_root: Root::Cube,
            },
            shop: ShopModel {
                upper_offset: 2,
                exponent: dec!(1.15),
                variant_divisor: dec!(1),
                coefficient: dec!(0.5),
            },
        }
    }

    /// The earlier revision
    pub fn legacy() -> Self {
        let mut table = Self::current();
        table.variant_multipliers.shiny_mythic = dec!(320);
        table.demand.max = 20;
        table.permanent.form = ScarcityForm::Integral { upper_offset: 2 };
        table.limited = ScarcityModel {
            form: ScarcityForm::Integral { upper_offset: 2 },
            demand_weight: dec!(0.5),
        };
        table.rift_limited.demand_weight = dec!(0.1);

        let legacy_pass = PassModel {
            sign: SaturationSign::Minus,
            upper_offset: 1,
            exponent: dec!(3),
            variant_divisor: dec!(10),
            coefficient: dec!(0.5),
        };
        table.pass_limited = PassModel {
            coefficient: dec!(0.75),
            ..legacy_pass.clone()
        };
        table.pass = legacy_pass;
        table
    }
}
