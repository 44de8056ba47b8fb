use serde::{Deserialize, Serialize};

use crate::constants;

/// Skeleton extractor vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SkeletonConfig {
    /// Currency codes recognized next to amounts. Default: ["sar"].
    pub currency_codes: Vec<String>,
    /// IBAN country prefixes. Default: ["sa"].
    pub iban_countries: Vec<String>,
}

impl SkeletonConfig {
    pub fn effective_currency_codes(&self) -> Vec<String> {
        non_empty_or(&self.currency_codes, &constants::DEFAULT_CURRENCY_CODES)
    }

    pub fn effective_iban_countries(&self) -> Vec<String> {
        non_empty_or(&self.iban_countries, &constants::DEFAULT_IBAN_COUNTRIES)
    }
}

fn non_empty_or(values: &[String], defaults: &[&str]) -> Vec<String> {
    let cleaned: Vec<String> = values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();
    if cleaned.is_empty() {
        defaults.iter().map(|d| d.to_string()).collect()
    } else {
        cleaned
    }
}
