use serde::{Deserialize, Serialize};

use crate::constants;

/// Reporting and template-stub configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Prefix of template ids. Default: "SAB".
    pub template_prefix: Option<String>,
    /// Examples per cluster in the Markdown report. Default: 3.
    pub report_examples: Option<usize>,
    /// Sample messages per template stub. Default: 3.
    pub template_samples: Option<usize>,
    /// Distinguishing terms per cluster example file. Default: 15.
    pub key_terms: Option<usize>,
}

impl ReportConfig {
    pub fn effective_template_prefix(&self) -> &str {
        self.template_prefix
            .as_deref()
            .unwrap_or(constants::DEFAULT_TEMPLATE_PREFIX)
    }

    pub fn effective_report_examples(&self) -> usize {
        self.report_examples
            .unwrap_or(constants::DEFAULT_REPORT_EXAMPLES)
    }

    pub fn effective_template_samples(&self) -> usize {
        self.template_samples
            .unwrap_or(constants::DEFAULT_TEMPLATE_SAMPLES)
    }

    pub fn effective_key_terms(&self) -> usize {
        self.key_terms.unwrap_or(constants::DEFAULT_KEY_TERMS)
    }
}
