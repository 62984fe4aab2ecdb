//! pet-value: value estimator for collectible pets
//!
//! This library provides:
//! - Pet type and variant vocabularies
//! - Fuzzy category resolution for free-text input
//! - Per-type valuation models with exact integration
//! - Configurable model constants per revision
//! - Result formatting and the CLI front ends

pub mod category;
pub mod cli;
pub mod config;
pub mod report;
pub mod resolver;
pub mod telemetry;
pub mod valuation;
