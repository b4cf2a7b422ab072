use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use officehours_core::{
    compose, Config, Cue, DatabaseError, MeetingTimer, QueueSnapshot, QueueStore, TimerMessage,
};

use super::text_input::TextInput;

const NAME_PROMPT: &str = "name: ";
const MINUTES_PROMPT: &str = "minutes: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a name to add to the queue.
    Name,
    /// Typing a new meeting length.
    Minutes,
}

/// A queue save detached from the app so it can run off the event loop.
#[derive(Debug, Clone)]
pub struct SaveJob {
    store: QueueStore,
    snapshot: QueueSnapshot,
}

impl SaveJob {
    /// Write the snapshot; returns how many names were stored.
    pub fn run(self) -> Result<usize, DatabaseError> {
        self.store.save(&self.snapshot)?;
        Ok(self.snapshot.names.len())
    }
}

/// Everything the terminal view shows and mutates. Owned by the event loop;
/// ticks and key presses are applied to it one at a time.
pub struct App {
    timer: MeetingTimer,
    config: Config,
    config_path: PathBuf,
    store: QueueStore,
    input_mode: InputMode,
    text_input: TextInput,
    showing_help: bool,
    status: Option<String>,
    save_in_flight: bool,
    /// A save was asked for while another was running.
    save_requested: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf, store: QueueStore) -> Self {
        Self {
            timer: MeetingTimer::new(config.timer_settings()),
            config,
            config_path,
            store,
            input_mode: InputMode::Normal,
            text_input: TextInput::default(),
            showing_help: false,
            status: None,
            save_in_flight: false,
            save_requested: false,
            should_quit: false,
        }
    }

    /// Load the saved queue, if any. A missing store is a normal first run.
    pub fn restore_queue(&mut self) -> Result<(), DatabaseError> {
        match self.store.load()? {
            Some(stored) => {
                tracing::info!(
                    queued = stored.names.len(),
                    seconds = stored.seconds,
                    "restored saved queue"
                );
                self.timer.restore(stored.names, stored.seconds);
            }
            None => tracing::info!("no saved queue, starting empty"),
        }
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &MeetingTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut MeetingTimer {
        &mut self.timer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn input_line(&self) -> String {
        self.text_input.display()
    }

    pub fn showing_help(&self) -> bool {
        self.showing_help
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn timer_message(&self) -> TimerMessage {
        compose(&self.timer, &self.config.display_text())
    }

    pub fn welcome_text(&self) -> String {
        format!(
            "{}{}",
            "\n".repeat(self.config.display.empty_lines_above),
            self.config.display.welcome_message
        )
    }

    /// Autosave period, `None` when autosave is off.
    pub fn save_interval(&self) -> Option<Duration> {
        match self.config.meeting.save_interval_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    // ── Clock ────────────────────────────────────────────────────────

    pub fn on_tick(&mut self) -> Option<Cue> {
        let cue = self.timer.on_tick();
        if let Some(cue) = cue {
            tracing::info!(?cue, seconds = self.timer.individual_seconds(), "cue");
        }
        cue
    }

    // ── Text entry ───────────────────────────────────────────────────

    pub fn begin_name_input(&mut self) {
        self.input_mode = InputMode::Name;
        self.text_input.begin(NAME_PROMPT);
    }

    pub fn begin_minutes_input(&mut self) {
        self.input_mode = InputMode::Minutes;
        self.text_input.begin(MINUTES_PROMPT);
    }

    pub fn input_char(&mut self, c: char) {
        self.text_input.insert(c);
    }

    pub fn input_backspace(&mut self) {
        self.text_input.backspace();
    }

    pub fn cancel_input(&mut self) {
        self.text_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Apply the entered text. An invalid meeting length keeps the field
    /// open with the text as typed.
    pub fn submit_input(&mut self) {
        match self.input_mode {
            InputMode::Normal => {}
            InputMode::Name => {
                let name = self.text_input.take();
                self.input_mode = InputMode::Normal;
                if name.trim().is_empty() {
                    return;
                }
                self.timer.add(&name);
            }
            InputMode::Minutes => {
                let Ok(minutes) = self.timer.reconfigure_duration(self.text_input.text()) else {
                    tracing::debug!(input = self.text_input.text(), "ignored meeting length");
                    return;
                };
                self.text_input.clear();
                self.input_mode = InputMode::Normal;
                self.config.meeting.minutes = minutes;
                if let Err(e) = self.config.save_to(&self.config_path) {
                    tracing::warn!(error = %e, "failed to persist meeting length");
                    self.status = Some(format!("settings not saved: {e}"));
                }
            }
        }
    }

    // ── Chrome ───────────────────────────────────────────────────────

    pub fn toggle_help(&mut self) {
        self.showing_help = !self.showing_help;
    }

    pub fn open_settings(&mut self) {
        match Config::open_in_editor(&self.config_path) {
            Ok(()) => self.status = Some("opened settings; restart to apply changes".into()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to open settings file");
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ── Saving ───────────────────────────────────────────────────────

    pub fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    /// Snapshot the queue for a save. While another save is running the
    /// request is remembered and handed back by [`App::finish_save`].
    pub fn begin_save(&mut self) -> Option<SaveJob> {
        if self.save_in_flight {
            tracing::debug!("save still running, queued another");
            self.save_requested = true;
            return None;
        }
        self.save_in_flight = true;
        Some(self.save_job())
    }

    /// Snapshot the queue for a save regardless of saves in flight.
    pub fn save_job(&self) -> SaveJob {
        SaveJob {
            store: self.store.clone(),
            snapshot: self.timer.snapshot(),
        }
    }

    /// Record a finished save. Returns the follow-up save if one was asked
    /// for while it ran.
    pub fn finish_save(&mut self, result: Result<usize, String>) -> Option<SaveJob> {
        self.save_in_flight = false;
        match result {
            Ok(count) => {
                tracing::debug!(count, "queue saved");
                self.status = Some(format!(
                    "saved {count} in queue at {}",
                    Local::now().format("%H:%M:%S")
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "queue save failed");
                self.status = Some(format!("save failed: {e}"));
            }
        }
        if std::mem::take(&mut self.save_requested) {
            return self.begin_save();
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let config = Config::load_from(&config_path).unwrap();
        let store = QueueStore::at(dir.path().join("queue.db"));
        (dir, App::new(config, config_path, store))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.input_char(c);
        }
    }

    #[test]
    fn name_entry_adds_participant() {
        let (_dir, mut app) = test_app();
        app.begin_name_input();
        assert_eq!(app.input_line(), "name: ");
        type_text(&mut app, "Alice");
        app.submit_input();
        assert_eq!(app.timer().queue().names(), vec!["Alice"]);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(!app.timer().is_paused());
    }

    #[test]
    fn valid_minutes_apply_and_persist() {
        let (dir, mut app) = test_app();
        app.begin_minutes_input();
        type_text(&mut app, "20");
        app.submit_input();
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.timer().max_individual_seconds(), 20 * 60 + 60);

        let saved = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.meeting.minutes, 20);
    }

    #[test]
    fn invalid_minutes_keep_field_open() {
        let (_dir, mut app) = test_app();
        app.begin_minutes_input();
        type_text(&mut app, "2x");
        app.submit_input();
        assert_eq!(app.input_mode(), InputMode::Minutes);
        assert_eq!(app.input_line(), "minutes: 2x");
        assert_eq!(app.timer().max_individual_seconds(), 15 * 60 + 60);
    }

    #[test]
    fn cancel_discards_entry() {
        let (_dir, mut app) = test_app();
        app.begin_name_input();
        type_text(&mut app, "Bob");
        app.cancel_input();
        assert!(app.timer().queue().is_empty());
        assert_eq!(app.input_line(), "");
    }

    #[test]
    fn save_round_trips_through_store() {
        let (_dir, mut app) = test_app();
        app.timer_mut().add("Alice");
        app.timer_mut().add("Bob");
        let job = app.begin_save().unwrap();
        assert!(app.begin_save().is_none(), "second save while in flight");
        let result = job.run().map_err(|e| e.to_string());
        assert!(app.finish_save(result).is_none());
        assert!(app.status().unwrap().starts_with("saved 2 in queue"));

        app.timer_mut().remove_last();
        app.timer_mut().remove_last();
        app.restore_queue().unwrap();
        assert_eq!(app.timer().queue().names(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn save_requested_during_autosave_runs_afterwards() {
        let (_dir, mut app) = test_app();
        app.timer_mut().add("Alice");
        let autosave = app.begin_save().unwrap();

        app.timer_mut().add("Bob");
        assert!(app.begin_save().is_none());
        assert!(app.save_in_flight());

        let result = autosave.run().map_err(|e| e.to_string());
        let follow_up = app.finish_save(result).expect("follow-up save");
        assert!(app.save_in_flight());
        let result = follow_up.run().map_err(|e| e.to_string());
        assert!(app.finish_save(result).is_none());
        assert!(app.status().unwrap().starts_with("saved 2 in queue"));
        assert!(!app.save_in_flight());

        app.timer_mut().remove_last();
        app.restore_queue().unwrap();
        assert_eq!(app.timer().queue().names(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn blank_name_entry_is_ignored() {
        let (_dir, mut app) = test_app();
        app.begin_name_input();
        type_text(&mut app, "   ");
        app.submit_input();
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(app.timer().queue().is_empty());
        assert!(app.timer().is_paused());
    }

    #[test]
    fn failed_save_is_reported_not_fatal() {
        let (_dir, mut app) = test_app();
        app.begin_save();
        assert!(app.finish_save(Err("disk full".into())).is_none());
        assert_eq!(app.status(), Some("save failed: disk full"));
        assert!(app.begin_save().is_some());
    }

    #[test]
    fn autosave_can_be_disabled() {
        let (_dir, mut app) = test_app();
        assert_eq!(app.save_interval(), Some(Duration::from_secs(60)));
        app.config.meeting.save_interval_seconds = 0;
        assert_eq!(app.save_interval(), None);
    }

    #[test]
    fn welcome_text_is_padded() {
        let (_dir, app) = test_app();
        assert!(app.welcome_text().starts_with("\n\nWelcome"));
    }
}
