use std::sync::LazyLock;

use regex::{Captures, Regex};
use stencil_core::config::SkeletonConfig;
use stencil_core::errors::{StencilError, StencilResult};
use stencil_core::models::Placeholder;
use stencil_core::traits::{ISkeletonizer, RuleHit, SkeletonTrace};
use tracing::{debug, error};

use crate::patterns::{self, RuleSpec};

/// A compiled skeleton rule.
#[derive(Debug)]
struct CompiledRule {
    name: &'static str,
    regex: Regex,
    placeholder: Placeholder,
}

/// Skeleton extractor: an explicit ordered list of `(matcher, placeholder)`
/// rules applied to a single working string.
///
/// Implements `ISkeletonizer` from stencil-core. Construction compiles every
/// rule up front; a rule that fails to compile is a defect and fails
/// construction instead of silently matching nothing.
#[derive(Debug)]
pub struct SkeletonExtractor {
    rules: Vec<CompiledRule>,
}

/// Why a rule table failed to compile, kept so every later caller sees the
/// original reason.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildFailure {
    rule: String,
    reason: String,
}

impl From<StencilError> for BuildFailure {
    fn from(err: StencilError) -> Self {
        match err {
            StencilError::Pattern { rule, reason } => Self { rule, reason },
            other => Self {
                rule: "<standard>".to_string(),
                reason: other.to_string(),
            },
        }
    }
}

static STANDARD: LazyLock<Result<SkeletonExtractor, BuildFailure>> =
    LazyLock::new(|| build_standard(&SkeletonConfig::default()));

fn build_standard(config: &SkeletonConfig) -> Result<SkeletonExtractor, BuildFailure> {
    SkeletonExtractor::new(config).map_err(|e| {
        let failure = BuildFailure::from(e);
        error!(
            rule = %failure.rule,
            reason = %failure.reason,
            "default skeleton rules failed to compile"
        );
        failure
    })
}

impl SkeletonExtractor {
    /// Compile the rule table for `config`.
    pub fn new(config: &SkeletonConfig) -> StencilResult<Self> {
        let rules = patterns::rule_specs(config)
            .into_iter()
            .map(compile)
            .collect::<StencilResult<Vec<_>>>()?;
        debug!(rules = rules.len(), "skeleton rules compiled");
        Ok(Self { rules })
    }

    /// The extractor for the default vocabulary, compiled once per process.
    pub fn standard() -> StencilResult<&'static SkeletonExtractor> {
        STANDARD.as_ref().map_err(|f| StencilError::Pattern {
            rule: f.rule.clone(),
            reason: f.reason.clone(),
        })
    }

    /// Rule names and placeholders in application order.
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, Placeholder)> + '_ {
        self.rules.iter().map(|r| (r.name, r.placeholder))
    }

    fn apply(&self, text_norm: &str, mut on_hit: impl FnMut(&CompiledRule, usize)) -> String {
        let mut working = text_norm.to_string();
        for rule in &self.rules {
            let mut count = 0usize;
            let token = rule.placeholder.token();
            let replaced = rule.regex.replace_all(&working, |_: &Captures<'_>| {
                count += 1;
                token
            });
            if count > 0 {
                working = replaced.into_owned();
                on_hit(rule, count);
            }
        }
        working.trim().to_string()
    }
}

impl ISkeletonizer for SkeletonExtractor {
    fn skeletonize(&self, text_norm: &str) -> String {
        self.apply(text_norm, |_, _| {})
    }

    fn skeletonize_traced(&self, text_norm: &str) -> SkeletonTrace {
        let mut hits = Vec::new();
        let skeleton = self.apply(text_norm, |rule, count| {
            hits.push(RuleHit {
                rule: rule.name.to_string(),
                placeholder: rule.placeholder,
                count,
            });
        });
        SkeletonTrace { skeleton, hits }
    }
}

fn compile(spec: RuleSpec) -> StencilResult<CompiledRule> {
    let regex = Regex::new(&spec.pattern).map_err(|e| StencilError::Pattern {
        rule: spec.name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(CompiledRule {
        name: spec.name,
        regex,
        placeholder: spec.placeholder,
    })
}

/// Skeletonize with the default vocabulary.
///
/// Returns the trimmed input, and logs an error, when the default table
/// failed to compile. `SkeletonExtractor::standard` reports the same failure
/// as a `Pattern` error to callers that check.
pub fn skeletonize(text_norm: &str) -> String {
    match STANDARD.as_ref() {
        Ok(extractor) => extractor.skeletonize(text_norm),
        Err(failure) => {
            error!(
                rule = %failure.rule,
                reason = %failure.reason,
                "no skeleton rules available, text left unchanged"
            );
            text_norm.trim().to_string()
        }
    }
}
