//! Interstitial shown when content is judged not relevant. "Go back" is always
//! available; "continue" unlocks after a countdown and then needs a written
//! justification.

#[cfg(test)]
mod tests;

use chrono::{DateTime, Duration, Utc};

pub const OVERRIDE_DELAY_SECONDS: i64 = 120;
pub const MIN_JUSTIFICATION_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    #[error("override is locked for another {0}s")]
    StillLocked(i64),
    #[error("justification must be at least {MIN_JUSTIFICATION_CHARS} characters")]
    JustificationTooShort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideGate {
    url: String,
    shown_at: DateTime<Utc>,
    delay: Duration,
}

impl OverrideGate {
    #[must_use]
    pub fn new(url: &str, shown_at: DateTime<Utc>) -> Self {
        Self {
            url: url.to_string(),
            shown_at,
            delay: Duration::seconds(OVERRIDE_DELAY_SECONDS),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whole seconds left on the countdown, rounded up
    #[must_use]
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        let left = (self.shown_at + self.delay - now).num_milliseconds();
        if left <= 0 {
            0
        } else {
            (left + 999) / 1000
        }
    }

    #[must_use]
    pub fn is_unlocked(&self, now: DateTime<Utc>) -> bool {
        self.remaining_seconds(now) == 0
    }

    /// Accept the user's reason for continuing. The text is logged, nothing
    /// else is done with it.
    ///
    /// # Errors
    ///
    /// Returns an error while the countdown is running or when the trimmed
    /// justification is too short.
    pub fn submit_justification(
        &self,
        now: DateTime<Utc>,
        justification: &str,
    ) -> Result<(), OverrideError> {
        let remaining = self.remaining_seconds(now);
        if remaining > 0 {
            return Err(OverrideError::StillLocked(remaining));
        }
        let justification = justification.trim();
        if justification.chars().count() < MIN_JUSTIFICATION_CHARS {
            return Err(OverrideError::JustificationTooShort);
        }
        log::info!(
            "User justification for accessing {}: {justification}",
            self.url
        );
        Ok(())
    }
}
