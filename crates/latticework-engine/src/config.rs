//! Automaton configuration.

use latticework_core::ConfigError;

/// Tunables for an [`Automaton`](crate::Automaton).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutomatonConfig {
    /// Maximum number of completed ticks. `None` = unbounded.
    ///
    /// Once reached, `do_step()` and `run()` fail with
    /// [`StepError::StepLimitReached`](crate::StepError::StepLimitReached).
    pub step_limit: Option<u64>,
}

impl AutomatonConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_limit == Some(0) {
            return Err(ConfigError::InvalidStepLimit);
        }
        Ok(())
    }
}
