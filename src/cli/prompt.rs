//! Interactive prompt loop
//!
//! Every question is a bounded retry loop: an invalid answer re-asks the
//! same question, and running out of attempts restarts the calculation.

use clap::Args;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

use super::input::{is_yes, parse_count, parse_in_range, parse_positive_decimal, InputError};
use crate::category::{PetType, Variant};
use crate::config::Config;
use crate::report::{format_input, format_value};
use crate::resolver::FuzzyResolver;
use crate::valuation::{Param, ValuationEngine, ValuationRequest};

#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Attempts per question before starting over (overrides config)
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

impl PromptArgs {
    pub fn execute(&self, config: &Config, engine: ValuationEngine) -> anyhow::Result<()> {
        let resolver = FuzzyResolver::new(config.resolver.threshold);
        let max_attempts = self.max_attempts.unwrap_or(config.resolver.max_attempts);

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut session = PromptSession::new(stdin.lock(), stdout.lock(), engine, resolver, max_attempts);
        session.run()?;
        Ok(())
    }
}

/// Interactive valuation session over any line reader and writer
pub struct PromptSession<R, W> {
    input: R,
    output: W,
    engine: ValuationEngine,
    resolver: FuzzyResolver,
    max_attempts: u32,
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    pub fn new(
        input: R,
        output: W,
        engine: ValuationEngine,
        resolver: FuzzyResolver,
        max_attempts: u32,
    ) -> Self {
        Self {
            input,
            output,
            engine,
            resolver,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Run until the user declines to continue or input ends
    pub fn run(&mut self) -> Result<(), InputError> {
        loop {
            match self.run_once() {
                Ok(true) => continue,
                Ok(false) | Err(InputError::EndOfInput) => return Ok(()),
                Err(InputError::RetriesExhausted(field)) => {
                    writeln!(self.output, "Too many invalid entries for {field}. Starting over.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One valuation; returns whether the user wants another
    fn run_once(&mut self) -> Result<bool, InputError> {
        let pet_type = self.ask_pet_type()?;

        let (request, variant) = loop {
            let request = self.collect_params(pet_type)?;
            if let Some(rarity) = request.rarity {
                let answer = self.ask(&format!(
                    "Rarity = {}. Is this correct? (Y/N): ",
                    format_input(rarity)
                ))?;
                if !is_yes(&answer) {
                    writeln!(self.output, "Let's try again.")?;
                    continue;
                }
            }
            let variant = self.ask_variant()?;
            break (request, variant);
        };

        let request = if pet_type.accepts_variant_multi() && !variant.is_normal() {
            match self.ask_variant_multi(variant)? {
                Some(multi) => request.with_variant_multi(multi),
                None => request,
            }
        } else {
            request
        };

        match self.engine.compute(pet_type, variant, &request) {
            Ok(value) => writeln!(self.output, "Estimated Value: {}", format_value(value))?,
            Err(e) => writeln!(self.output, "Warning: {e}")?,
        }

        let answer = self.ask("Would you like to continue? Y/N: ")?;
        Ok(is_yes(&answer))
    }

    fn ask_pet_type(&mut self) -> Result<PetType, InputError> {
        let question = format!("Is the pet {}? ", menu(&PetType::LABELS));
        for _ in 0..self.max_attempts {
            let answer = self.ask(&question)?;
            if let Some(pet_type) = self.resolver.resolve_pet_type(&answer) {
                return Ok(pet_type);
            }
            writeln!(self.output, "Unrecognized pet type. Please try again.")?;
        }
        Err(InputError::RetriesExhausted("pet type".to_string()))
    }

    fn ask_variant(&mut self) -> Result<Variant, InputError> {
        let question = format!("Is the pet {}? ", menu(&Variant::LABELS));
        for _ in 0..self.max_attempts {
            let answer = self.ask(&question)?;
            if let Some(variant) = self.resolver.resolve_variant(&answer) {
                return Ok(variant);
            }
            writeln!(self.output, "Could not recognize variant. Try again.")?;
        }
        Err(InputError::RetriesExhausted("variant".to_string()))
    }

    /// Blank answer keeps the table multiplier
    fn ask_variant_multi(&mut self, variant: Variant) -> Result<Option<Decimal>, InputError> {
        let default = self.engine.table().variant_multipliers.get(variant);
        let question = format!("Enter a variant multiplier (blank for {default}): ");
        self.ask_valid(&question, Param::VariantMulti, |raw| {
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                parse_positive_decimal(raw).map(Some)
            }
        })
    }

    fn collect_params(&mut self, pet_type: PetType) -> Result<ValuationRequest, InputError> {
        let mut request = ValuationRequest::new();
        for &param in self.engine.required_params(pet_type) {
            request = match param {
                Param::Exist => request.with_exist(self.ask_valid("Enter # of exist: ", param, parse_count)?),
                Param::Rarity => {
                    request.with_rarity(self.ask_valid("Enter rarity: ", param, parse_positive_decimal)?)
                }
                Param::Demand => {
                    let (min, max) = (self.engine.table().demand.min, self.engine.table().demand.max);
                    let question = format!("Enter demand ({min}-{max}): ");
                    request.with_demand(self.ask_valid(&question, param, |raw| parse_in_range(raw, min, max))?)
                }
                Param::C => request.with_c(self.ask_valid("Enter c value: ", param, parse_positive_decimal)?),
                Param::Price => request.with_price(self.ask_valid("Enter price: ", param, parse_count)?),
                Param::IslandChance => request
                    .with_island_chance(self.ask_valid("Enter island chance: ", param, parse_positive_decimal)?),
                Param::VariantMulti => request,
            };
        }
        Ok(request)
    }

    /// Ask until `parse` accepts the answer, at most `max_attempts` times
    fn ask_valid<T>(
        &mut self,
        question: &str,
        param: Param,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T, InputError> {
        for _ in 0..self.max_attempts {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(InputError::InvalidNumericInput(reason)) => {
                    tracing::debug!(field = %param, %reason, "Rejected input");
                    writeln!(self.output, "Please enter a valid number: {reason}.")?;
                }
                Err(e) => return Err(e),
            }
        }
        Err(InputError::RetriesExhausted(param.to_string()))
    }

    fn ask(&mut self, question: &str) -> Result<String, InputError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }
}

/// "a, b or c"
fn menu(labels: &[&str]) -> String {
    match labels.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}
