//! Valuation output formatting

use rust_decimal::Decimal;
use serde::Serialize;

use crate::category::{PetType, Variant};

/// Round to two decimals and group the integer part with commas
pub fn format_value(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

/// Group a raw input number for confirmation prompts, keeping its decimals
pub fn format_input(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        let whole = format_value(normalized);
        return whole.trim_end_matches(".00").to_string();
    }
    let text = normalized.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let integer: Decimal = integer.parse().unwrap_or_default();
    let grouped = format_value(integer);
    let sign = if normalized.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{fraction}", grouped.trim_end_matches(".00"))
}

/// One computed valuation, ready for output
#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
    pub pet_type: PetType,
    pub variant: Variant,
    /// Full-precision value
    pub value: Decimal,
    /// Rounded, grouped value
    pub display: String,
}

impl ValuationReport {
    pub fn new(pet_type: PetType, variant: Variant, value: Decimal) -> Self {
        Self {
            pet_type,
            variant,
            value,
            display: format_value(value),
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════
           PET VALUATION
══════════════════════════════════════
Type:             {}
Variant:          {}
Estimated Value:  {}
══════════════════════════════════════
"#,
            self.pet_type, self.variant, self.display
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
