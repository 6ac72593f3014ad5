//! Maps raw operating-status values to [`OperationalState`].

use std::collections::HashSet;

use crate::config::StatusConfig;
use crate::models::OperationalState;

/// Whitelist of raw status tokens that mean "working".
///
/// Source feeds use different vocabularies (`M`, `Y`, `정상`, `구동중`, ...).
/// Only listed tokens are operational; unknown, empty and future values are
/// reported as down.
#[derive(Debug, Clone)]
pub struct StatusNormalizer {
    operational: HashSet<String>,
}

impl StatusNormalizer {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let operational = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        Self { operational }
    }

    #[must_use]
    pub fn from_config(config: &StatusConfig) -> Self {
        Self::new(&config.operational_tokens)
    }

    #[must_use]
    pub fn normalize(&self, raw: &str) -> OperationalState {
        if self.operational.contains(raw.trim()) {
            OperationalState::Operational
        } else {
            OperationalState::Down
        }
    }
}

impl Default for StatusNormalizer {
    fn default() -> Self {
        Self::from_config(&StatusConfig::default())
    }
}
