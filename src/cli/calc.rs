//! Calc command implementation
//!
//! Single-shot valuation: the type and variant come from fixed choices and
//! only the fields the type needs are read.

use anyhow::Context;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use crate::category::{PetType, Variant};
use crate::report::ValuationReport;
use crate::valuation::{ValuationEngine, ValuationRequest};

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Pet type (permanent, limited, pass, pass-limited, defined-pass, shop, rift, rift-limited)
    #[arg(long = "type", value_name = "TYPE")]
    pub pet_type: PetType,

    /// Variant (normal, shiny, mythic, shiny-mythic)
    #[arg(long, default_value = "normal")]
    pub variant: Variant,

    /// Number of copies in existence
    #[arg(long)]
    pub exist: Option<u64>,

    /// Rarity
    #[arg(long)]
    pub rarity: Option<Decimal>,

    /// Demand score
    #[arg(long, allow_negative_numbers = true)]
    pub demand: Option<i64>,

    /// Decay rate for pass and shop curves
    #[arg(long = "c", value_name = "C")]
    pub c: Option<Decimal>,

    /// Shop price
    #[arg(long)]
    pub price: Option<u64>,

    /// Variant multiplier override for pass, defined pass and shop pets
    #[arg(long)]
    pub variant_multi: Option<Decimal>,

    /// Island chance in percent, for rift pets
    #[arg(long)]
    pub island_chance: Option<Decimal>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl CalcArgs {
    /// Request built from the supplied fields
    pub fn request(&self) -> ValuationRequest {
        ValuationRequest {
            exist: self.exist,
            rarity: self.rarity,
            demand: self.demand,
            c: self.c,
            price: self.price,
            variant_multi: self.variant_multi,
            island_chance: self.island_chance,
        }
    }

    /// Compute and format the valuation
    pub fn render(&self, engine: &ValuationEngine) -> anyhow::Result<String> {
        let value = engine
            .compute(self.pet_type, self.variant, &self.request())
            .with_context(|| format!("Could not value {} {} pet", self.variant, self.pet_type))?;

        let report = ValuationReport::new(self.pet_type, self.variant, value);
        let rendered = match self.format {
            OutputFormat::Table => report.format_table(),
            OutputFormat::Json => report.to_json()?,
        };
        Ok(rendered)
    }

    pub fn execute(&self, engine: &ValuationEngine) -> anyhow::Result<()> {
        println!("{}", self.render(engine)?);
        Ok(())
    }
}
