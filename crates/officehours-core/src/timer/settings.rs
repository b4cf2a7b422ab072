use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Numeric inputs the timer derives its thresholds from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Nominal length of one individual meeting.
    pub meeting_minutes: u32,
    /// Hand-over time added to every meeting; also the warning-cue threshold.
    pub transition_seconds: u64,
}

impl TimerSettings {
    /// Meeting length plus the transition buffer.
    pub fn max_individual_seconds(&self) -> u64 {
        u64::from(self.meeting_minutes)
            .saturating_mul(60)
            .saturating_add(self.transition_seconds)
    }

    /// Half the meeting length. With a single participant the countdown
    /// freezes here instead of running out.
    pub fn min_empty_waitlist_seconds(&self) -> u64 {
        u64::from(self.meeting_minutes).saturating_mul(30)
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            meeting_minutes: 15,
            transition_seconds: 60,
        }
    }
}

/// Parse operator input for the meeting length. Accepts only a positive
/// whole number written with ASCII digits.
pub fn parse_minutes(input: &str) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidMinutes {
        input: input.to_string(),
    };
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match input.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(minutes) => Ok(minutes),
    }
}
