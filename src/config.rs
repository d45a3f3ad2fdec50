//! Engine timing configuration.
//!
//! Two durations drive the whole engine: the debounce quiet period (how long
//! the list must stay untouched before the pending ordering is submitted)
//! and the notice display duration (how long a save notice stays in the
//! published state before auto-clearing). Both are configurable; neither is
//! a compile-time constant, because tests and hosts want different speeds.

use std::time::Duration;

use crate::store::MovePolicy;

/// Default quiet period between the last drop and the save attempt (5 s).
const DEFAULT_QUIET_PERIOD_MS: u64 = 5_000;

/// Default display duration for save notices (3 s).
const DEFAULT_NOTICE_DURATION_MS: u64 = 3_000;

/// Configuration for a reorder engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long the list must stay untouched before the pending ordering is
    /// submitted.
    ///
    /// Default: 5 seconds. Configure via `SUBJECT_REORDER_QUIET_PERIOD_MS`.
    pub quiet_period: Duration,

    /// How long a save notice stays in the published state before it is
    /// auto-cleared.
    ///
    /// Default: 3 seconds. Configure via `SUBJECT_REORDER_NOTICE_DURATION_MS`.
    pub notice_duration: Duration,

    /// How drops are validated and renumbered.
    ///
    /// Default: [`MovePolicy::GlobalSequence`]. Not read from the
    /// environment; the hierarchy rule is the host's decision, not a
    /// deployment knob.
    pub policy: MovePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        EngineConfig {
            quiet_period: Duration::from_millis(DEFAULT_QUIET_PERIOD_MS),
            notice_duration: Duration::from_millis(DEFAULT_NOTICE_DURATION_MS),
            policy: MovePolicy::default(),
        }
    }

    /// Creates a config from environment variables.
    ///
    /// Reads `SUBJECT_REORDER_QUIET_PERIOD_MS` and
    /// `SUBJECT_REORDER_NOTICE_DURATION_MS`; unset or unparsable values fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        let quiet_ms = std::env::var("SUBJECT_REORDER_QUIET_PERIOD_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_QUIET_PERIOD_MS);
        let notice_ms = std::env::var("SUBJECT_REORDER_NOTICE_DURATION_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_NOTICE_DURATION_MS);

        EngineConfig {
            quiet_period: Duration::from_millis(quiet_ms),
            notice_duration: Duration::from_millis(notice_ms),
            ..Self::new()
        }
    }

    /// Returns the config with the quiet period replaced.
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Returns the config with the notice duration replaced.
    pub fn with_notice_duration(mut self, notice_duration: Duration) -> Self {
        self.notice_duration = notice_duration;
        self
    }

    /// Returns the config with the move policy replaced.
    pub fn with_policy(mut self, policy: MovePolicy) -> Self {
        self.policy = policy;
        self
    }
}
