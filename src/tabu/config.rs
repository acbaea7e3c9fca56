//! Tabu Search configuration.

use crate::error::{Result, SearchError};

/// How a visited permutation is identified by the repetition memory.
///
/// The occurrence table and the frequently-encountered set need a key per
/// visited permutation. Keying by score is cheap but approximate: two
/// distinct permutations with the same score count as the same visit.
/// Keying by content is exact and stores a copy of every distinct order.
///
/// The tabu queue itself always compares full content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitIdentity {
    /// Identify visits by score only.
    #[default]
    Score,
    /// Identify visits by the full order.
    Content,
}

/// Tuning parameters for [`TabuImprovement`](super::TabuImprovement).
///
/// # Examples
///
/// ```
/// use u_localsearch::tabu::{TabuConfig, VisitIdentity};
///
/// let config = TabuConfig::default()
///     .with_initial_tenure(7)
///     .with_tt_iterations_wo_modification(20)
///     .with_identity(VisitIdentity::Content);
/// assert_eq!(config.initial_tenure, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Tabu tenure at construction. Adapted during the search, never below 1.
    pub initial_tenure: usize,

    /// Consecutive iterations without a tenure increase after which the
    /// tenure is decreased.
    pub tt_iterations_wo_modification: usize,

    /// Occurrences a visit key must reach to count as frequently encountered.
    pub max_occurrences_frequently_encountered: usize,

    /// Escape is triggered once more than this many keys are frequently
    /// encountered.
    pub max_candidate_trigger_escape: usize,

    /// Upper bound of the number of random moves applied by one escape.
    pub random_steps_escape: usize,

    /// Identity used by the repetition memory.
    pub identity: VisitIdentity,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            initial_tenure: 10,
            tt_iterations_wo_modification: 50,
            max_occurrences_frequently_encountered: 3,
            max_candidate_trigger_escape: 5,
            random_steps_escape: 10,
            identity: VisitIdentity::Score,
        }
    }
}

impl TabuConfig {
    /// Sets the initial tabu tenure.
    pub fn with_initial_tenure(mut self, tenure: usize) -> Self {
        self.initial_tenure = tenure;
        self
    }

    /// Sets the number of stable iterations before the tenure is decreased.
    pub fn with_tt_iterations_wo_modification(mut self, n: usize) -> Self {
        self.tt_iterations_wo_modification = n;
        self
    }

    /// Sets the occurrence threshold for frequently encountered visits.
    pub fn with_max_occurrences_frequently_encountered(mut self, n: usize) -> Self {
        self.max_occurrences_frequently_encountered = n;
        self
    }

    /// Sets the number of frequently encountered visits tolerated before
    /// escaping.
    pub fn with_max_candidate_trigger_escape(mut self, n: usize) -> Self {
        self.max_candidate_trigger_escape = n;
        self
    }

    /// Sets the maximum number of random moves per escape.
    pub fn with_random_steps_escape(mut self, n: usize) -> Self {
        self.random_steps_escape = n;
        self
    }

    /// Sets the visit identity of the repetition memory.
    pub fn with_identity(mut self, identity: VisitIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Validates the configuration.
    ///
    /// Every parameter must be positive: a zero tenure disables the tabu
    /// list, and a zero escape trigger escapes on every repetition.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("initial_tenure", self.initial_tenure),
            (
                "tt_iterations_wo_modification",
                self.tt_iterations_wo_modification,
            ),
            (
                "max_occurrences_frequently_encountered",
                self.max_occurrences_frequently_encountered,
            ),
            (
                "max_candidate_trigger_escape",
                self.max_candidate_trigger_escape,
            ),
            ("random_steps_escape", self.random_steps_escape),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(SearchError::Config(format!("{name} must be positive")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.initial_tenure, 10);
        assert_eq!(config.tt_iterations_wo_modification, 50);
        assert_eq!(config.max_occurrences_frequently_encountered, 3);
        assert_eq!(config.max_candidate_trigger_escape, 5);
        assert_eq!(config.random_steps_escape, 10);
        assert_eq!(config.identity, VisitIdentity::Score);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_initial_tenure(2)
            .with_tt_iterations_wo_modification(3)
            .with_max_occurrences_frequently_encountered(4)
            .with_max_candidate_trigger_escape(5)
            .with_random_steps_escape(6)
            .with_identity(VisitIdentity::Content);

        assert_eq!(config.initial_tenure, 2);
        assert_eq!(config.tt_iterations_wo_modification, 3);
        assert_eq!(config.max_occurrences_frequently_encountered, 4);
        assert_eq!(config.max_candidate_trigger_escape, 5);
        assert_eq!(config.random_steps_escape, 6);
        assert_eq!(config.identity, VisitIdentity::Content);
    }

    #[test]
    fn test_tabu_config_rejects_zero_parameters() {
        let invalid = [
            TabuConfig::default().with_initial_tenure(0),
            TabuConfig::default().with_tt_iterations_wo_modification(0),
            TabuConfig::default().with_max_occurrences_frequently_encountered(0),
            TabuConfig::default().with_max_candidate_trigger_escape(0),
            TabuConfig::default().with_random_steps_escape(0),
        ];
        for config in invalid {
            match config.validate() {
                Err(SearchError::Config(msg)) => assert!(msg.ends_with("must be positive")),
                other => panic!("expected config error, got {other:?}"),
            }
        }
    }
}
