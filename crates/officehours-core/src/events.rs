use serde::{Deserialize, Serialize};

/// Alert produced by [`MeetingTimer::on_tick`](crate::MeetingTimer::on_tick)
/// when the countdown crosses one of its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// Countdown reached the transition buffer: the session should wrap up.
    Warning,
    /// Countdown reached one second.
    Urgent,
}

/// Consumer of cues. Implementations decide how a cue is made audible or
/// visible; the timer only decides when.
pub trait CueEmitter {
    fn warning(&mut self);

    fn urgent(&mut self);

    fn emit(&mut self, cue: Cue) {
        match cue {
            Cue::Warning => self.warning(),
            Cue::Urgent => self.urgent(),
        }
    }
}

/// Emitter that records cues in order. Useful for tests and for logging
/// front-ends that want to batch cues.
#[derive(Debug, Default, Clone)]
pub struct RecordedCues {
    pub cues: Vec<Cue>,
}

impl CueEmitter for RecordedCues {
    fn warning(&mut self) {
        self.cues.push(Cue::Warning);
    }

    fn urgent(&mut self) {
        self.cues.push(Cue::Urgent);
    }
}
