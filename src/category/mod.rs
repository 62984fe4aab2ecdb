//! Pet categories
//!
//! The fixed vocabularies for pet types and variants. Exact label parsing
//! lives here; free-text matching is the resolver's job.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::valuation::ValuationError;

/// Category of pet, selecting the valuation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetType {
    Permanent,
    Limited,
    Pass,
    PassLimited,
    DefinedPass,
    Shop,
    Rift,
    RiftLimited,
}

impl PetType {
    /// Every pet type, in menu order
    pub const ALL: [PetType; 8] = [
        PetType::Permanent,
        PetType::Limited,
        PetType::Pass,
        PetType::PassLimited,
        PetType::DefinedPass,
        PetType::Shop,
        PetType::Rift,
        PetType::RiftLimited,
    ];

    /// Canonical labels, same order as [`PetType::ALL`]
    pub const LABELS: [&'static str; 8] = [
        "permanent",
        "limited",
        "pass",
        "pass limited",
        "defined pass",
        "shop",
        "rift",
        "rift limited",
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PetType::Permanent => "permanent",
            PetType::Limited => "limited",
            PetType::Pass => "pass",
            PetType::PassLimited => "pass limited",
            PetType::DefinedPass => "defined pass",
            PetType::Shop => "shop",
            PetType::Rift => "rift",
            PetType::RiftLimited => "rift limited",
        }
    }

    /// Whether the variant multiplier can be overridden by a user-supplied value
    pub fn accepts_variant_multi(&self) -> bool {
        matches!(
            self,
            PetType::Pass | PetType::PassLimited | PetType::DefinedPass | PetType::Shop
        )
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PetType {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_label(s);
        // Labels from the earlier revision
        match normalized.as_str() {
            "aura" => return Ok(PetType::Rift),
            "non secret" => return Ok(PetType::Pass),
            _ => {}
        }
        PetType::ALL
            .into_iter()
            .find(|t| t.label() == normalized)
            .ok_or_else(|| ValuationError::UnrecognizedCategory(s.to_string()))
    }
}

/// Cosmetic variant of a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Normal,
    Shiny,
    Mythic,
    ShinyMythic,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Normal,
        Variant::Shiny,
        Variant::Mythic,
        Variant::ShinyMythic,
    ];

    pub const LABELS: [&'static str; 4] = ["normal", "shiny", "mythic", "shiny mythic"];

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Normal => "normal",
            Variant::Shiny => "shiny",
            Variant::Mythic => "mythic",
            Variant::ShinyMythic => "shiny mythic",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Variant::Normal)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_label(s);
        Variant::ALL
            .into_iter()
            .find(|v| v.label() == normalized)
            .ok_or_else(|| ValuationError::UnrecognizedCategory(s.to_string()))
    }
}

/// Lowercase, map `_`/`-` to spaces, collapse whitespace
fn normalize_label(s: &str) -> String {
    s.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
