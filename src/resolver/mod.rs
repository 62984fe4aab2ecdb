//! Category resolver
//!
//! Maps free text onto a fixed vocabulary of labels. The similarity
//! algorithm is a [`SimilarityScorer`] so it can be swapped without touching
//! the valuation engine.

mod similarity;

pub use similarity::{normalize, partial_ratio, ratio, token_sort_ratio, SimilarityScorer, WeightedRatio};

use crate::category::{PetType, Variant};

/// Default minimum score for a match
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Fuzzy resolver over a scoring strategy
#[derive(Debug, Clone)]
pub struct FuzzyResolver<S = WeightedRatio> {
    scorer: S,
    threshold: u8,
}

impl FuzzyResolver<WeightedRatio> {
    pub fn new(threshold: u8) -> Self {
        Self::with_scorer(WeightedRatio, threshold)
    }
}

impl Default for FuzzyResolver<WeightedRatio> {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl<S: SimilarityScorer> FuzzyResolver<S> {
    pub fn with_scorer(scorer: S, threshold: u8) -> Self {
        Self { scorer, threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Best-scoring label and its score, regardless of threshold
    ///
    /// Ties keep the first label in `labels`; callers should not rely on
    /// that order.
    pub fn best_match<'a>(&self, input: &str, labels: &[&'a str]) -> Option<(&'a str, u8)> {
        let mut best: Option<(&'a str, u8)> = None;
        for &label in labels {
            let score = self.scorer.score(input, label);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((label, score));
            }
        }
        best
    }

    /// Best label scoring at least the threshold, if any
    pub fn resolve<'a>(&self, input: &str, labels: &[&'a str]) -> Option<&'a str> {
        let (label, score) = self.best_match(input, labels)?;
        tracing::trace!(input, label, score, threshold = self.threshold, "Best category match");
        (score >= self.threshold).then_some(label)
    }

    pub fn resolve_pet_type(&self, input: &str) -> Option<PetType> {
        let label = self.resolve(input, &PetType::LABELS)?;
        label.parse().ok()
    }

    pub fn resolve_variant(&self, input: &str) -> Option<Variant> {
        let label = self.resolve(input, &Variant::LABELS)?;
        label.parse().ok()
    }
}

/// Resolve `input` against `labels` with the default scorer
pub fn resolve<'a>(input: &str, labels: &[&'a str], threshold: u8) -> Option<&'a str> {
    FuzzyResolver::new(threshold).resolve(input, labels)
}

/// Resolve free text to a pet type with the default threshold
pub fn resolve_pet_type(input: &str) -> Option<PetType> {
    FuzzyResolver::new(DEFAULT_THRESHOLD).resolve_pet_type(input)
}

/// Resolve free text to a variant with the default threshold
pub fn resolve_variant(input: &str) -> Option<Variant> {
    FuzzyResolver::new(DEFAULT_THRESHOLD).resolve_variant(input)
}
