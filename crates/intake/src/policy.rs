use chrono::{DateTime, Duration, Utc};

use crate::error::{IntakeError, Result};

pub const DEFAULT_RETENTION_DAYS: u32 = 14;

/// Tunable parts of the commit procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakePolicy {
    pub retention_days: u32,
    /// Reject "Done" while nothing is selected.
    pub require_selection: bool,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            require_selection: true,
        }
    }
}

impl IntakePolicy {
    pub fn validate(&self) -> Result<()> {
        if self.retention_days == 0 {
            return Err(IntakeError::InvalidPolicy(
                "retention_days must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn retention(&self) -> Duration {
        Duration::days(i64::from(self.retention_days))
    }

    /// Oldest timestamp that survives a commit made at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.retention()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_two_weeks() {
        let policy = IntakePolicy::default();
        let now = Utc::now();
        assert_eq!(now - policy.cutoff(now), Duration::days(14));
        assert!(policy.require_selection);
    }

    #[test]
    fn zero_retention_is_invalid() {
        let policy = IntakePolicy {
            retention_days: 0,
            require_selection: true,
        };
        assert!(policy.validate().is_err());
    }
}
