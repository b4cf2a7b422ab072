//! Key map.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, InputMode};

const SMALL_STEP: i64 = 5;
const LARGE_STEP: i64 = 30;

/// Work a key asks of the event loop rather than of the app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Save,
    /// Save, then leave.
    Quit,
}

/// Apply one terminal event to the app.
pub fn handle_event(app: &mut App, event: Event) -> Option<Request> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return Some(Request::Quit);
    }

    match app.input_mode() {
        InputMode::Normal => handle_normal(app, key),
        InputMode::Name | InputMode::Minutes => {
            handle_text(app, key);
            None
        }
    }
}

fn handle_text(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) -> Option<Request> {
    let timer = app.timer_mut();
    match key.code {
        KeyCode::Char('h') => app.toggle_help(),
        KeyCode::Char('o') => app.open_settings(),
        KeyCode::Char('a') => app.begin_name_input(),
        KeyCode::Char('d') => app.begin_minutes_input(),
        KeyCode::Char('n') => {
            timer.rotate();
        }
        KeyCode::Char('z') => {
            timer.undo_rotate();
        }
        KeyCode::Char('!') => {
            if let Some(name) = timer.remove_last() {
                tracing::info!(%name, "removed from queue");
            }
        }
        KeyCode::Char('$') => timer.shuffle(),
        KeyCode::Char('m') => {
            let mode = timer.toggle_group_individual();
            tracing::info!(?mode, "mode changed");
        }
        KeyCode::Home => timer.set_start(),
        KeyCode::End => timer.set_end(),
        KeyCode::Char('k') | KeyCode::Char(' ') => {
            timer.toggle_pause();
        }
        KeyCode::Char('j') => timer.adjust_seconds(SMALL_STEP),
        KeyCode::Char('l') => timer.adjust_seconds(-SMALL_STEP),
        KeyCode::Up => timer.adjust_seconds(LARGE_STEP),
        KeyCode::Down => timer.adjust_seconds(-LARGE_STEP),
        KeyCode::Char('r') => timer.reset_current(),
        KeyCode::Char('s') => return Some(Request::Save),
        KeyCode::Char('q') => {
            app.request_quit();
            return Some(Request::Quit);
        }
        _ => {}
    }
    None
}
