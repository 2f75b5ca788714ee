//! Executor configuration.

use super::chunk::effective_size;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Overrides the strategy with `Concurrent { max_concurrency }`.
pub const CONCURRENCY_ENV: &str = "BOUNDED_BATCH_CONCURRENCY";
/// Overrides the sibling policy (`cancel` or `settle`).
pub const SIBLING_POLICY_ENV: &str = "BOUNDED_BATCH_SIBLING_POLICY";

/// How a collection is cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchStrategy {
    /// Everything in one chunk.
    Parallel,
    /// One entry per chunk; each call sees the previous one finish.
    Sequential,
    /// Chunks of `max_concurrency` entries.
    Concurrent { max_concurrency: usize },
}

impl Default for BatchStrategy {
    fn default() -> Self {
        BatchStrategy::Concurrent { max_concurrency: 5 }
    }
}

impl BatchStrategy {
    /// Conservative default for a collection of `len` entries.
    ///
    /// - Up to 3 entries run one at a time.
    /// - Up to 10 entries run 5 at a time.
    /// - Anything larger runs 10 at a time.
    pub fn for_len(len: usize) -> Self {
        if len <= 3 {
            BatchStrategy::Sequential
        } else if len <= 10 {
            BatchStrategy::Concurrent { max_concurrency: 5 }
        } else {
            BatchStrategy::Concurrent { max_concurrency: 10 }
        }
    }

    /// Concrete chunk size for a collection of `len` entries. Always at least 1.
    pub fn chunk_size(&self, len: usize) -> usize {
        match *self {
            BatchStrategy::Parallel => len.max(1),
            BatchStrategy::Sequential => 1,
            BatchStrategy::Concurrent { max_concurrency } => effective_size(max_concurrency),
        }
    }
}

/// What happens to the other in-flight calls of a chunk once one of them fails.
///
/// Either way the first error observed is returned unchanged and no later
/// chunk is started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingPolicy {
    /// Drop the pending siblings. They stop at their next await point.
    #[default]
    Cancel,
    /// Let the pending siblings run to completion, discard their output,
    /// then return the error.
    Settle,
}

impl FromStr for SiblingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cancel" => Ok(SiblingPolicy::Cancel),
            "settle" => Ok(SiblingPolicy::Settle),
            other => Err(Error::configuration_with_context(
                "unknown sibling policy",
                ErrorContext::new()
                    .with_details(format!("expected 'cancel' or 'settle', got '{}'", other)),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchExecutorConfig {
    pub strategy: BatchStrategy,
    pub sibling_policy: SiblingPolicy,
}

impl BatchExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_strategy(mut self, s: BatchStrategy) -> Self {
        self.strategy = s;
        self
    }
    pub fn with_sibling_policy(mut self, p: SiblingPolicy) -> Self {
        self.sibling_policy = p;
        self
    }

    /// Reject settings the executor would otherwise have to silently adjust.
    pub fn validate(&self) -> Result<()> {
        if let BatchStrategy::Concurrent { max_concurrency: 0 } = self.strategy {
            return Err(Error::configuration_with_context(
                "max_concurrency must be at least 1",
                ErrorContext::new().with_field_path("strategy.max_concurrency"),
            ));
        }
        Ok(())
    }

    /// Parse and validate a YAML document such as:
    ///
    /// ```yaml
    /// strategy:
    ///   kind: concurrent
    ///   max_concurrency: 4
    /// sibling_policy: settle
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with [`CONCURRENCY_ENV`] and [`SIBLING_POLICY_ENV`] applied.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    pub(crate) fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(CONCURRENCY_ENV) {
            let max_concurrency = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| {
                    Error::configuration_with_context(
                        "invalid concurrency override",
                        ErrorContext::new()
                            .with_field_path(CONCURRENCY_ENV)
                            .with_details(format!("expected a positive integer, got '{}'", raw))
                            .with_source("env"),
                    )
                })?;
            self.strategy = BatchStrategy::Concurrent { max_concurrency };
        }
        if let Some(raw) = lookup(SIBLING_POLICY_ENV) {
            self.sibling_policy = raw.parse::<SiblingPolicy>().map_err(|e| match e {
                Error::Configuration { message, context } => Error::Configuration {
                    message,
                    context: context
                        .with_field_path(SIBLING_POLICY_ENV)
                        .with_source("env"),
                },
                other => other,
            })?;
        }
        Ok(self)
    }
}
