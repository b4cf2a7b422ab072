//! Integration tests for a full office-hours session.
//!
//! Drives the meeting timer the way the terminal front-end does: commands,
//! one tick per second, periodic saves, and a restart that reloads the queue.

use officehours_core::{
    compose, Config, Cue, CueEmitter, MeetingTimer, Mode, QueueStore, RecordedCues,
    TimerSettings,
};

fn settings() -> TimerSettings {
    TimerSettings {
        meeting_minutes: 24,
        transition_seconds: 60,
    }
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = QueueStore::at(dir.path().join("queue.db"));

    // First run: nothing stored yet.
    assert!(store.load().unwrap().is_none());

    let mut timer = MeetingTimer::new(settings());
    timer.add("Alice");
    timer.add("Bob");
    timer.add("Alice");
    timer.toggle_group_individual();
    for _ in 0..30 {
        timer.on_tick();
    }
    timer.rotate();
    timer.adjust_seconds(-30);
    store.save(&timer.snapshot()).unwrap();

    // Second run picks up where the first left off.
    let stored = store.load().unwrap().unwrap();
    let mut restored = MeetingTimer::new(settings());
    restored.restore(stored.names, stored.seconds);
    assert_eq!(restored.queue().names(), vec!["Bob", "Alice II", "Alice"]);
    assert_eq!(restored.individual_seconds(), 1470);
    assert!(restored.is_paused());
    assert_eq!(restored.mode(), Mode::Group);
}

#[test]
fn test_countdown_cues_reach_emitter() {
    let mut timer = MeetingTimer::new(settings());
    let mut emitter = RecordedCues::default();
    timer.add("Alice");
    timer.add("Bob");
    timer.toggle_group_individual();

    for _ in 0..1500 {
        if let Some(cue) = timer.on_tick() {
            emitter.emit(cue);
        }
    }

    assert_eq!(timer.individual_seconds(), 0);
    assert_eq!(emitter.cues, vec![Cue::Warning, Cue::Urgent]);
}

#[test]
fn test_break_shifts_projection_in_display() {
    let mut timer = MeetingTimer::new(settings());
    for name in ["Alice", "Bob", "5-minute break", "Carol"] {
        timer.add(name);
    }
    timer.toggle_group_individual();
    timer.set_individual_seconds(60);

    let text = Config::default().display_text();
    let plain = compose(&timer, &text).plain_text();
    assert!(plain.contains("1:00 Bob"), "{plain}");
    assert!(plain.contains("26:00 5-minute break"), "{plain}");
    assert!(plain.contains("31:00 Carol"), "{plain}");
}

#[test]
fn test_duration_change_flows_into_display() {
    let mut timer = MeetingTimer::new(settings());
    timer.add("Alice");
    timer.toggle_group_individual();
    assert!(timer.reconfigure_duration("nope").is_err());
    timer.reconfigure_duration("10").unwrap();
    timer.reset_current();

    let plain = compose(&timer, &Config::default().display_text()).plain_text();
    assert!(plain.contains("10-minute individual meetings"), "{plain}");
    assert!(plain.contains("11:00 Alice"), "{plain}");
}

#[test]
fn test_emptying_queue_clears_group_clock() {
    let mut timer = MeetingTimer::new(settings());
    timer.add("Alice");
    for _ in 0..90 {
        timer.on_tick();
    }
    assert_eq!(timer.group_seconds(), 90);
    timer.remove_last();

    let plain = compose(&timer, &Config::default().display_text()).plain_text();
    assert!(plain.ends_with("(no students in queue)"));
    assert_eq!(timer.group_seconds(), 0);

    timer.add("Bob");
    timer.on_tick();
    assert_eq!(timer.group_seconds(), 1);
}
