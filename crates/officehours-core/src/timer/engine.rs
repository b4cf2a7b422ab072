//! Meeting timer implementation.
//!
//! The meeting timer owns the participant queue, both clocks, the mode and
//! the pause flag. It does not use internal threads - the caller is
//! responsible for calling `on_tick()` once per second and for forwarding the
//! returned cue to a [`CueEmitter`](crate::CueEmitter).
//!
//! ## Clocks
//!
//! ```text
//! individual: max_individual_seconds -> ... -> 0      (counts down)
//! group:      0 -> 1 -> 2 -> ...                       (counts up, GROUP mode only)
//! ```
//!
//! With one participant the countdown freezes at `min_empty_waitlist_seconds`
//! unless the mode is INDIVIDUAL with somebody waiting.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = MeetingTimer::new(TimerSettings::default());
//! timer.add("Alice");
//! // Once per second:
//! if let Some(cue) = timer.on_tick() {
//!     emitter.emit(cue);
//! }
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mode::{Mode, ModeLabels};
use super::settings::{parse_minutes, TimerSettings};
use crate::error::ValidationError;
use crate::events::Cue;
use crate::queue::{ParticipantQueue, QueueEntry};

/// What gets persisted: the queue in order plus one shared wait time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub names: Vec<String>,
    /// Current countdown; stored on every row.
    pub seconds: u64,
}

/// Queue, clocks and mode for one office-hours session.
#[derive(Debug, Clone)]
pub struct MeetingTimer {
    settings: TimerSettings,
    queue: ParticipantQueue,
    mode: Mode,
    labels: ModeLabels,
    paused: bool,
    /// Remaining seconds of the current individual meeting.
    individual_seconds: u64,
    max_individual_seconds: u64,
    min_empty_waitlist_seconds: u64,
    /// Countdown value saved by the last rotation, for one level of undo.
    previous_individual_seconds: Option<u64>,
    /// Set after an undo so that a second undo re-applies the rotation.
    undo_applied: bool,
    /// Elapsed seconds of the group meeting.
    group_seconds: u64,
}

impl MeetingTimer {
    /// Create an idle (paused) timer with an empty queue in GROUP mode.
    pub fn new(settings: TimerSettings) -> Self {
        let max_individual_seconds = settings.max_individual_seconds();
        Self {
            settings,
            queue: ParticipantQueue::new(),
            mode: Mode::Group,
            labels: ModeLabels::new(settings.meeting_minutes),
            paused: true,
            individual_seconds: max_individual_seconds,
            max_individual_seconds,
            min_empty_waitlist_seconds: settings.min_empty_waitlist_seconds(),
            previous_individual_seconds: None,
            undo_applied: false,
            group_seconds: 0,
        }
    }

    /// Replace the queue with stored names. A stored countdown replaces the
    /// current one; `None` (nothing stored) keeps it.
    pub fn restore(&mut self, names: Vec<String>, seconds: Option<u64>) {
        self.queue = ParticipantQueue::from_names(names);
        if let Some(seconds) = seconds {
            self.individual_seconds = seconds;
        }
        self.previous_individual_seconds = None;
        self.undo_applied = false;
        self.group_seconds = 0;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn queue(&self) -> &ParticipantQueue {
        &self.queue
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mode_label(&self) -> &str {
        self.labels.label(self.mode)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn individual_seconds(&self) -> u64 {
        self.individual_seconds
    }

    pub fn max_individual_seconds(&self) -> u64 {
        self.max_individual_seconds
    }

    pub fn min_empty_waitlist_seconds(&self) -> u64 {
        self.min_empty_waitlist_seconds
    }

    pub fn previous_individual_seconds(&self) -> Option<u64> {
        self.previous_individual_seconds
    }

    /// Elapsed group time; always 0 while nobody is queued.
    pub fn group_seconds(&self) -> u64 {
        if self.queue.is_empty() {
            0
        } else {
            self.group_seconds
        }
    }

    /// Projected start offset of every waiting entry.
    ///
    /// The first waiting entry starts when the current countdown ends. Each
    /// later entry adds a full meeting, except directly after a scheduled
    /// break, where only the break's own length is added.
    pub fn projected_waits(&self) -> Vec<(&QueueEntry, u64)> {
        let mut next_seconds = self.individual_seconds;
        let mut after_break = false;
        let mut projected = Vec::with_capacity(self.queue.len().saturating_sub(1));
        for (i, entry) in self.queue.waiting().enumerate() {
            if i > 0 && !after_break {
                next_seconds = next_seconds.saturating_add(self.max_individual_seconds);
            }
            projected.push((entry, next_seconds));
            match entry.break_seconds() {
                Some(break_seconds) => {
                    next_seconds = next_seconds.saturating_add(break_seconds);
                    after_break = true;
                }
                None => after_break = false,
            }
        }
        projected
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            names: self.queue.names(),
            seconds: self.individual_seconds,
        }
    }

    // ── Queue commands ───────────────────────────────────────────────

    /// Queue `name` (suffixed with `" II"` if already present) and return
    /// the name as stored. Adding the first participant starts the clocks.
    pub fn add(&mut self, name: &str) -> String {
        let was_empty = self.queue.is_empty();
        let stored = self.queue.push(name).name().to_string();
        if was_empty {
            self.paused = false;
        }
        tracing::debug!(name = %stored, queued = self.queue.len(), "participant added");
        stored
    }

    /// Next participant: front goes to the back and the countdown restarts.
    /// Needs at least two participants.
    pub fn rotate(&mut self) -> bool {
        if !self.queue.rotate_forward() {
            return false;
        }
        self.previous_individual_seconds = Some(self.individual_seconds);
        self.individual_seconds = self.max_individual_seconds;
        self.undo_applied = false;
        tracing::debug!(
            previous_seconds = self.previous_individual_seconds,
            "rotated to next participant"
        );
        true
    }

    /// Undo the last rotation. Calling it again re-applies that rotation, so
    /// there is exactly one level of history.
    pub fn undo_rotate(&mut self) -> bool {
        let Some(previous) = self.previous_individual_seconds else {
            return false;
        };
        if self.undo_applied {
            self.queue.rotate_forward();
        } else {
            self.queue.rotate_backward();
        }
        self.previous_individual_seconds = Some(self.individual_seconds);
        self.individual_seconds = previous;
        self.undo_applied = !self.undo_applied;
        true
    }

    /// Remove the last participant. A sole remaining participant gets a
    /// fresh countdown; an emptied queue resets the group clock.
    pub fn remove_last(&mut self) -> Option<String> {
        let removed = self.queue.pop_back()?;
        match self.queue.len() {
            0 => self.group_seconds = 0,
            1 => self.individual_seconds = self.max_individual_seconds,
            _ => {}
        }
        tracing::debug!(name = %removed, queued = self.queue.len(), "participant removed");
        Some(removed.name().to_string())
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.queue.shuffle(rng);
    }

    // ── Mode commands ────────────────────────────────────────────────

    /// GROUP goes to INDIVIDUAL; every other mode goes to GROUP with a
    /// fresh group clock.
    pub fn toggle_group_individual(&mut self) -> Mode {
        if self.mode == Mode::Group {
            self.mode = Mode::Individual;
        } else {
            self.mode = Mode::Group;
            self.group_seconds = 0;
        }
        self.mode
    }

    pub fn set_start(&mut self) {
        self.mode = Mode::Start;
    }

    pub fn set_end(&mut self) {
        self.mode = Mode::End;
    }

    // ── Clock commands ───────────────────────────────────────────────

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Add or subtract seconds from the current meeting, never below 0.
    pub fn adjust_seconds(&mut self, delta: i64) {
        self.individual_seconds = if delta >= 0 {
            self.individual_seconds.saturating_add(delta.unsigned_abs())
        } else {
            self.individual_seconds.saturating_sub(delta.unsigned_abs())
        };
    }

    pub fn set_individual_seconds(&mut self, seconds: u64) {
        self.individual_seconds = seconds;
    }

    /// Restart the current meeting and pause.
    pub fn reset_current(&mut self) {
        self.individual_seconds = self.max_individual_seconds;
        self.paused = true;
    }

    /// Apply operator input for the meeting length. Invalid input changes
    /// nothing.
    pub fn reconfigure_duration(&mut self, input: &str) -> Result<u32, ValidationError> {
        let minutes = parse_minutes(input)?;
        self.apply_settings(TimerSettings {
            meeting_minutes: minutes,
            ..self.settings
        });
        Ok(minutes)
    }

    /// Recompute every derived threshold and label from new settings. The
    /// running countdown is left as is.
    pub fn apply_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
        self.max_individual_seconds = settings.max_individual_seconds();
        self.min_empty_waitlist_seconds = settings.min_empty_waitlist_seconds();
        self.labels.set_meeting_minutes(settings.meeting_minutes);
        tracing::info!(
            minutes = settings.meeting_minutes,
            max_individual_seconds = self.max_individual_seconds,
            "meeting length changed"
        );
    }

    /// Advance the clocks by one second. Returns a cue when this tick moved
    /// the countdown onto a threshold.
    pub fn on_tick(&mut self) -> Option<Cue> {
        if self.paused || self.queue.is_empty() {
            return None;
        }

        let before = self.individual_seconds;
        let someone_waiting = self.mode == Mode::Individual && self.queue.len() > 1;
        if self.individual_seconds > 0
            && (someone_waiting || self.individual_seconds > self.min_empty_waitlist_seconds)
        {
            self.individual_seconds -= 1;
        }

        if self.mode == Mode::Group {
            self.group_seconds += 1;
        }

        if self.individual_seconds == before {
            return None;
        }
        self.cue_at(self.individual_seconds)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cue_at(&self, seconds: u64) -> Option<Cue> {
        if seconds == self.settings.transition_seconds {
            Some(Cue::Warning)
        } else if seconds == 1 {
            Some(Cue::Urgent)
        } else {
            None
        }
    }
}
