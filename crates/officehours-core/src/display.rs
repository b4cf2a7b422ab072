//! Display composer.
//!
//! Turns the timer state into a render-ready message. The message is a list
//! of lines made of toned segments so that any front-end can map tones to
//! its own styles; [`TimerMessage::plain_text`] gives the unstyled text.

use serde::{Deserialize, Serialize};

use crate::timer::{format_time, MeetingTimer, Mode};

/// Placeholder shown while nobody is queued.
pub const EMPTY_QUEUE_MESSAGE: &str = "(no students in queue)";
pub const IN_PROGRESS_HEADER: &str = "meeting in progress with:";
pub const WAITING_HEADER: &str = "waiting:";

/// Gap between the group label and the elapsed group time.
const GROUP_TIME_GAP: &str = "       ";

/// Static text the composer needs from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub empty_lines_above: usize,
    pub starting_message: String,
    pub ending_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Plain,
    /// Labels and clock values.
    Muted,
    /// Section headers.
    Heading,
    /// Whoever is currently in session.
    InSession,
    /// A waiting participant or break.
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLine {
    pub segments: Vec<Segment>,
}

impl MessageLine {
    fn blank() -> Self {
        Self::default()
    }

    fn single(text: impl Into<String>, tone: Tone) -> Self {
        Self::default().push(text, tone)
    }

    fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.segments.push(Segment {
            text: text.into(),
            tone,
        });
        self
    }

    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerMessage {
    pub lines: Vec<MessageLine>,
}

impl TimerMessage {
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(MessageLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn blank_lines(&mut self, count: usize) {
        self.lines
            .extend(std::iter::repeat_with(MessageLine::blank).take(count));
    }

    fn text_block(&mut self, text: &str, tone: Tone) {
        self.lines
            .extend(text.lines().map(|line| MessageLine::single(line, tone)));
    }
}

/// Compose the timer message for the current state.
pub fn compose(timer: &MeetingTimer, text: &DisplayText) -> TimerMessage {
    let mut message = TimerMessage::default();
    message.blank_lines(text.empty_lines_above);

    match timer.mode() {
        Mode::Start => {
            message.text_block(&text.starting_message, Tone::Plain);
            return message;
        }
        Mode::End => {
            message.text_block(&text.ending_message, Tone::Plain);
            return message;
        }
        Mode::Group | Mode::Individual => {}
    }

    let queue = timer.queue();
    let Some(front) = queue.front() else {
        message.lines.push(MessageLine::single(EMPTY_QUEUE_MESSAGE, Tone::Plain));
        return message;
    };

    message.blank_lines(1);
    let mut label = MessageLine::single(timer.mode_label(), Tone::Muted);
    if timer.mode() == Mode::Group {
        label = label
            .push(GROUP_TIME_GAP, Tone::Plain)
            .push(format_time(timer.group_seconds()), Tone::Muted);
    }
    message.lines.push(label);
    message.blank_lines(1);
    message
        .lines
        .push(MessageLine::single(IN_PROGRESS_HEADER, Tone::Heading));

    let mut current = MessageLine::default();
    if timer.mode() == Mode::Individual && queue.len() == 1 {
        current = current
            .push(format_time(timer.individual_seconds()), Tone::Muted)
            .push(" ", Tone::Plain);
    }
    message.lines.push(current.push(front.name(), Tone::InSession));

    if queue.len() < 2 {
        return message;
    }

    match timer.mode() {
        Mode::Group => {
            for entry in queue.waiting() {
                message
                    .lines
                    .push(MessageLine::single(entry.name(), Tone::InSession));
            }
        }
        Mode::Individual => {
            message.blank_lines(1);
            message
                .lines
                .push(MessageLine::single(WAITING_HEADER, Tone::Heading));
            for (i, (entry, seconds)) in timer.projected_waits().into_iter().enumerate() {
                if i > 0 {
                    message.blank_lines(1);
                }
                message.lines.push(
                    MessageLine::single(format_time(seconds), Tone::Muted)
                        .push(" ", Tone::Plain)
                        .push(entry.name(), Tone::Name),
                );
            }
        }
        Mode::Start | Mode::End => {}
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerSettings;

    fn text() -> DisplayText {
        DisplayText {
            empty_lines_above: 0,
            starting_message: "hours start soon".into(),
            ending_message: "hours end soon\nthanks!".into(),
        }
    }

    fn timer(names: &[&str]) -> MeetingTimer {
        let mut timer = MeetingTimer::new(TimerSettings {
            meeting_minutes: 24,
            transition_seconds: 60,
        });
        for name in names {
            timer.add(name);
        }
        timer
    }

    #[test]
    fn start_and_end_ignore_queue() {
        let mut t = timer(&["Alice"]);
        t.set_start();
        assert_eq!(compose(&t, &text()).plain_text(), "hours start soon");
        t.set_end();
        assert_eq!(compose(&t, &text()).plain_text(), "hours end soon\nthanks!");
    }

    #[test]
    fn empty_queue_placeholder_after_padding() {
        let t = timer(&[]);
        let mut display = text();
        display.empty_lines_above = 2;
        assert_eq!(
            compose(&t, &display).plain_text(),
            "\n\n(no students in queue)"
        );
    }

    #[test]
    fn group_mode_lists_everyone_with_elapsed_time() {
        let mut t = timer(&["Alice", "Bob"]);
        for _ in 0..65 {
            t.on_tick();
        }
        assert_eq!(
            compose(&t, &text()).plain_text(),
            "\ngroup meeting       1:05\n\nmeeting in progress with:\nAlice\nBob"
        );
    }

    #[test]
    fn single_individual_shows_countdown() {
        let mut t = timer(&["Alice"]);
        t.toggle_group_individual();
        t.set_individual_seconds(754);
        assert_eq!(
            compose(&t, &text()).plain_text(),
            "\n24-minute individual meetings\n\nmeeting in progress with:\n12:34 Alice"
        );
    }

    #[test]
    fn individual_lists_waiting_with_projections() {
        let mut t = timer(&["Alice", "Bob", "Carol"]);
        t.toggle_group_individual();
        t.set_individual_seconds(120);
        let plain = compose(&t, &text()).plain_text();
        assert!(plain.ends_with("Alice\n\nwaiting:\n2:00 Bob\n\n27:00 Carol"), "{plain}");
    }

    #[test]
    fn front_is_marked_in_session() {
        let mut t = timer(&["Alice", "Bob"]);
        t.toggle_group_individual();
        let message = compose(&t, &text());
        let alice = message
            .lines
            .iter()
            .flat_map(|l| &l.segments)
            .find(|s| s.text == "Alice")
            .unwrap();
        assert_eq!(alice.tone, Tone::InSession);
        let bob = message
            .lines
            .iter()
            .flat_map(|l| &l.segments)
            .find(|s| s.text == "Bob")
            .unwrap();
        assert_eq!(bob.tone, Tone::Name);
    }
}
