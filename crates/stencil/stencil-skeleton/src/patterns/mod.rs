//! The ordered skeleton rule table.
//!
//! Placeholder patterns overlap (an amount is also a digit run, a datetime
//! contains a date and a time), so rules run in a fixed order, most specific
//! first, each as one left-to-right pass over the output of the previous
//! rule. The order is part of the contract and is pinned by tests.

use stencil_core::config::SkeletonConfig;
use stencil_core::models::Placeholder;

macro_rules! skeleton_pattern {
    ($name:ident, $regex_str:expr) => {
        pub const $name: &str = $regex_str;
    };
}

// ── Amounts ────────────────────────────────────────────────────────────────
// Any decimal number with exactly two fractional digits left over after the
// currency-anchored forms.
skeleton_pattern!(RE_AMOUNT_DECIMAL, r"\b[\d,]+\.\d{2}\b");

// ── Dates and times ────────────────────────────────────────────────────────
skeleton_pattern!(RE_DATETIME, r"\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}");
skeleton_pattern!(RE_DATE_ISO, r"\d{4}-\d{2}-\d{2}");
skeleton_pattern!(RE_DATE_SLASH, r"\d{2}/\d{2}/\d{4}");
skeleton_pattern!(RE_DATE_DASH, r"\d{2}-\d{2}-\d{4}");
skeleton_pattern!(RE_TIME_HMS, r"\d{2}:\d{2}:\d{2}");
skeleton_pattern!(RE_TIME_HM, r"\d{2}:\d{2}");

// ── Identifiers ────────────────────────────────────────────────────────────
skeleton_pattern!(RE_REF, r"(?i)\b[a-z0-9]{15,}\b");
skeleton_pattern!(RE_ACCT, r"\*{3,}\d{4}\b");

// ── Bare numbers ───────────────────────────────────────────────────────────
skeleton_pattern!(RE_CODE, r"\b\d{6}\b");
skeleton_pattern!(RE_NUM, r"\b\d{4,}\b");

// ── Duplicate collapse ─────────────────────────────────────────────────────
skeleton_pattern!(RE_COLLAPSE_AMOUNT, r"<AMOUNT>(?:\s*<AMOUNT>)+");
skeleton_pattern!(RE_COLLAPSE_NUM, r"<NUM>(?:\s*<NUM>)+");

/// One uncompiled rule: a named pattern and the placeholder it emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: &'static str,
    pub pattern: String,
    pub placeholder: Placeholder,
}

impl RuleSpec {
    fn new(name: &'static str, pattern: impl Into<String>, placeholder: Placeholder) -> Self {
        Self {
            name,
            pattern: pattern.into(),
            placeholder,
        }
    }
}

/// All rules in application order.
///
/// Currency codes and IBAN country prefixes come from `config`; everything
/// else is fixed. The exactly-6-digit `<CODE>` rule runs before the general
/// `<NUM>` rule so passcodes are not swallowed as plain numbers.
pub fn rule_specs(config: &SkeletonConfig) -> Vec<RuleSpec> {
    let currencies = alternation(&config.effective_currency_codes());
    let countries = alternation(&config.effective_iban_countries());

    vec![
        RuleSpec::new(
            "amount_currency_prefix",
            format!(r"(?i)\b(?:{currencies})\s*[\d,]+\.?\d*\b"),
            Placeholder::Amount,
        ),
        RuleSpec::new(
            "amount_currency_suffix",
            format!(r"(?i)\b[\d,]+\.?\d*\s*(?:{currencies})\b"),
            Placeholder::Amount,
        ),
        RuleSpec::new("amount_decimal", RE_AMOUNT_DECIMAL, Placeholder::Amount),
        RuleSpec::new("datetime", RE_DATETIME, Placeholder::DateTime),
        RuleSpec::new("date_iso", RE_DATE_ISO, Placeholder::Date),
        RuleSpec::new("date_slash", RE_DATE_SLASH, Placeholder::Date),
        RuleSpec::new("date_dash", RE_DATE_DASH, Placeholder::Date),
        RuleSpec::new("time_hms", RE_TIME_HMS, Placeholder::Time),
        RuleSpec::new("time_hm", RE_TIME_HM, Placeholder::Time),
        RuleSpec::new("reference", RE_REF, Placeholder::Ref),
        RuleSpec::new("masked_account", RE_ACCT, Placeholder::Acct),
        // A leading mask run has no word boundary in front of it, so the
        // anchor is either the mask itself or a boundary.
        RuleSpec::new(
            "iban",
            format!(r"(?i)(?:\*+|\b)(?:{countries})\d{{2}}[a-z0-9*]{{18,}}\b"),
            Placeholder::Iban,
        ),
        RuleSpec::new("code", RE_CODE, Placeholder::Code),
        RuleSpec::new("number", RE_NUM, Placeholder::Num),
        RuleSpec::new("collapse_amount", RE_COLLAPSE_AMOUNT, Placeholder::Amount),
        RuleSpec::new("collapse_number", RE_COLLAPSE_NUM, Placeholder::Num),
    ]
}

fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_is_pinned() {
        let names: Vec<&str> = rule_specs(&SkeletonConfig::default())
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "amount_currency_prefix",
                "amount_currency_suffix",
                "amount_decimal",
                "datetime",
                "date_iso",
                "date_slash",
                "date_dash",
                "time_hms",
                "time_hm",
                "reference",
                "masked_account",
                "iban",
                "code",
                "number",
                "collapse_amount",
                "collapse_number",
            ]
        );
    }

    #[test]
    fn currency_codes_are_escaped_into_alternation() {
        let config = SkeletonConfig {
            currency_codes: vec!["sar".into(), "us$".into()],
            ..Default::default()
        };
        let specs = rule_specs(&config);
        assert!(specs[0].pattern.contains(r"(?:sar|us\$)"));
    }
}
