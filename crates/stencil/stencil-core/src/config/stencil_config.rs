//! Top-level Stencil configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    ClusteringConfig, IngestConfig, PathsConfig, ReportConfig, SkeletonConfig, TuningConfig,
};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`STENCIL_*`)
/// 3. Config file (`--config`, else `stencil.toml` in the working directory)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StencilConfig {
    pub paths: PathsConfig,
    pub ingest: IngestConfig,
    pub skeleton: SkeletonConfig,
    pub clustering: ClusteringConfig,
    pub tuning: TuningConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold: Option<f64>,
    pub min_cluster_size: Option<usize>,
    pub sender: Option<String>,
    pub out_dir: Option<PathBuf>,
}

impl StencilConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. Without one, `stencil.toml` in
    /// `root` is used when present.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_path {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(constants::CONFIG_FILE_NAME);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the effective configuration values.
    pub fn validate(config: &StencilConfig) -> Result<(), ConfigError> {
        let threshold = config.clustering.effective_threshold();
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ValidationFailed {
                field: "clustering.threshold".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if config.clustering.effective_min_cluster_size() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "clustering.min_cluster_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        let (ngram_min, ngram_max) = config.clustering.effective_ngram_range();
        if ngram_min == 0 || ngram_min > ngram_max {
            return Err(ConfigError::ValidationFailed {
                field: "clustering.ngram_min".to_string(),
                message: "must satisfy 1 <= ngram_min <= ngram_max".to_string(),
            });
        }
        let (band_min, band_max) = config.tuning.effective_target_band();
        if band_min > band_max {
            return Err(ConfigError::ValidationFailed {
                field: "tuning.target_min".to_string(),
                message: "must not exceed tuning.target_max".to_string(),
            });
        }
        let thresholds = config.tuning.effective_thresholds();
        if thresholds.iter().any(|t| !(0.0..=1.0).contains(t)) {
            return Err(ConfigError::ValidationFailed {
                field: "tuning.thresholds".to_string(),
                message: "every threshold must be between 0.0 and 1.0".to_string(),
            });
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ValidationFailed {
                field: "tuning.thresholds".to_string(),
                message: "must be strictly ascending".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut StencilConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: StencilConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut StencilConfig, other: &StencilConfig) {
        // Paths
        if other.paths.export.is_some() {
            base.paths.export = other.paths.export.clone();
        }
        if other.paths.messages.is_some() {
            base.paths.messages = other.paths.messages.clone();
        }
        if other.paths.normalized.is_some() {
            base.paths.normalized = other.paths.normalized.clone();
        }
        if other.paths.out_dir.is_some() {
            base.paths.out_dir = other.paths.out_dir.clone();
        }
        if other.paths.templates_dir.is_some() {
            base.paths.templates_dir = other.paths.templates_dir.clone();
        }

        // Ingest
        if other.ingest.sender.is_some() {
            base.ingest.sender = other.ingest.sender.clone();
        }
        if other.ingest.dedupe.is_some() {
            base.ingest.dedupe = other.ingest.dedupe;
        }

        // Skeleton
        if !other.skeleton.currency_codes.is_empty() {
            base.skeleton.currency_codes = other.skeleton.currency_codes.clone();
        }
        if !other.skeleton.iban_countries.is_empty() {
            base.skeleton.iban_countries = other.skeleton.iban_countries.clone();
        }

        // Clustering
        if other.clustering.threshold.is_some() {
            base.clustering.threshold = other.clustering.threshold;
        }
        if other.clustering.min_cluster_size.is_some() {
            base.clustering.min_cluster_size = other.clustering.min_cluster_size;
        }
        if other.clustering.ngram_min.is_some() {
            base.clustering.ngram_min = other.clustering.ngram_min;
        }
        if other.clustering.ngram_max.is_some() {
            base.clustering.ngram_max = other.clustering.ngram_max;
        }
        if other.clustering.example_limit.is_some() {
            base.clustering.example_limit = other.clustering.example_limit;
        }

        // Tuning
        if !other.tuning.thresholds.is_empty() {
            base.tuning.thresholds = other.tuning.thresholds.clone();
        }
        if other.tuning.target_min.is_some() {
            base.tuning.target_min = other.tuning.target_min;
        }
        if other.tuning.target_max.is_some() {
            base.tuning.target_max = other.tuning.target_max;
        }

        // Report
        if other.report.template_prefix.is_some() {
            base.report.template_prefix = other.report.template_prefix.clone();
        }
        if other.report.report_examples.is_some() {
            base.report.report_examples = other.report.report_examples;
        }
        if other.report.template_samples.is_some() {
            base.report.template_samples = other.report.template_samples;
        }
        if other.report.key_terms.is_some() {
            base.report.key_terms = other.report.key_terms;
        }
    }

    /// Apply environment variable overrides read through `lookup`.
    /// Pattern: `STENCIL_THRESHOLD`, `STENCIL_MIN_CLUSTER_SIZE`, etc.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides(
        config: &mut StencilConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(v) = lookup("STENCIL_THRESHOLD").and_then(|v| v.parse::<f64>().ok()) {
            config.clustering.threshold = Some(v);
        }
        if let Some(v) = lookup("STENCIL_MIN_CLUSTER_SIZE").and_then(|v| v.parse::<usize>().ok())
        {
            config.clustering.min_cluster_size = Some(v);
        }
        if let Some(v) = lookup("STENCIL_SENDER") {
            config.ingest.sender = Some(v);
        }
        if let Some(v) = lookup("STENCIL_OUT_DIR") {
            config.paths.out_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("STENCIL_TUNING_TARGET_MIN").and_then(|v| v.parse::<usize>().ok())
        {
            config.tuning.target_min = Some(v);
        }
        if let Some(v) = lookup("STENCIL_TUNING_TARGET_MAX").and_then(|v| v.parse::<usize>().ok())
        {
            config.tuning.target_max = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut StencilConfig, cli: &CliOverrides) {
        if let Some(v) = cli.threshold {
            config.clustering.threshold = Some(v);
        }
        if let Some(v) = cli.min_cluster_size {
            config.clustering.min_cluster_size = Some(v);
        }
        if let Some(ref v) = cli.sender {
            config.ingest.sender = Some(v.clone());
        }
        if let Some(ref v) = cli.out_dir {
            config.paths.out_dir = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
