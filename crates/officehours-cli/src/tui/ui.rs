use officehours_core::{MessageLine, Tone};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, InputMode};
use super::help::HELP_TEXT;

pub fn draw(frame: &mut Frame, app: &App) {
    let [main, input, status] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(main);

    draw_side_panel(frame, app, left);
    draw_timer(frame, app, right);
    draw_input(frame, app, input);
    draw_status(frame, app, status);
}

fn draw_side_panel(frame: &mut Frame, app: &App, area: Rect) {
    let (title, body) = if app.showing_help() {
        (" keys ", HELP_TEXT.to_string())
    } else {
        (" office hours ", app.welcome_text())
    };
    let panel = Paragraph::new(body)
        .block(Block::default().borders(Borders::RIGHT).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn draw_timer(frame: &mut Frame, app: &App, area: Rect) {
    let message = app.timer_message();
    let lines: Vec<Line> = message.lines.iter().map(to_line).collect();
    let timer = Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
    frame.render_widget(timer, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    if app.input_mode() == InputMode::Normal {
        return;
    }
    let line = app.input_line();
    let cursor_x = area.x + line.chars().count() as u16;
    frame.render_widget(Paragraph::new(line), area);
    frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let timer = app.timer();
    let clock = if timer.is_paused() { "paused" } else { "running" };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", timer.mode_label()),
            Style::default().add_modifier(Modifier::REVERSED),
        ),
        Span::raw(format!(" {clock} ")),
        Span::styled("h: help", Style::default().fg(Color::DarkGray)),
    ];
    if let Some(status) = app.status() {
        spans.push(Span::raw(format!("  {status}")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn to_line(line: &MessageLine) -> Line<'static> {
    line.segments
        .iter()
        .map(|segment| Span::styled(segment.text.clone(), tone_style(segment.tone)))
        .collect::<Vec<_>>()
        .into()
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default(),
        Tone::Muted => Style::default().fg(Color::DarkGray),
        Tone::Heading => Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        Tone::InSession => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        Tone::Name => Style::default().fg(Color::White),
    }
}
