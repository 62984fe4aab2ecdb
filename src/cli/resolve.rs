//! Resolve command implementation

use clap::{Args, ValueEnum};

use crate::category::{PetType, Variant};
use crate::config::Config;
use crate::resolver::FuzzyResolver;

/// Vocabulary to match against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryKind {
    Type,
    Variant,
}

impl CategoryKind {
    fn labels(&self) -> &'static [&'static str] {
        match self {
            CategoryKind::Type => &PetType::LABELS,
            CategoryKind::Variant => &Variant::LABELS,
        }
    }
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Free text to match
    pub text: String,

    /// Vocabulary to match against
    #[arg(long, value_enum, default_value = "type")]
    pub kind: CategoryKind,

    /// Minimum similarity score, 0-100 (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,
}

impl ResolveArgs {
    /// Matched label with its score, or `no match`
    pub fn render(&self, config: &Config) -> String {
        let resolver = FuzzyResolver::new(self.threshold.unwrap_or(config.resolver.threshold));
        let labels = self.kind.labels();
        match (resolver.resolve(&self.text, labels), resolver.best_match(&self.text, labels)) {
            (Some(label), Some((_, score))) => format!("{label} (score {score})"),
            _ => "no match".to_string(),
        }
    }

    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        println!("{}", self.render(config));
        Ok(())
    }
}
