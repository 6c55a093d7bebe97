//! Login and register forms.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{CredentialsForm, Field};

pub fn render(frame: &mut Frame, area: Rect, form: &CredentialsForm, registering: bool) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(13),
        Constraint::Fill(1),
    ])
    .split(area);

    let title = if registering { "NEW ACCOUNT" } else { "MATH QUIZ" };
    let masked = "*".repeat(form.password.chars().count());

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        field_line("Username", &form.username, form.focus == Field::Username),
        field_line("Password", &masked, form.focus == Field::Password),
        Line::from(""),
    ];

    let message = match (&form.error, &form.notice) {
        (Some(err), _) => Span::styled(err.clone(), Style::default().fg(Color::Red)),
        (None, Some(notice)) => Span::styled(notice.clone(), Style::default().fg(Color::Green)),
        (None, None) => Span::raw(""),
    };
    content.push(Line::from(message));
    content.push(Line::from(""));

    let hint = if registering {
        "[Enter] create  ·  [Tab] switch field  ·  [Esc] back"
    } else {
        "[Enter] log in  ·  [Tab] switch field  ·  [F2] register  ·  [Esc] quit"
    };
    content.push(Line::from(hint.fg(Color::DarkGray)));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { " " };

    Line::from(vec![
        Span::styled(format!("{label:>9}: "), Style::default().fg(Color::White)),
        Span::styled(format!("{value:<24}"), style),
        Span::styled(cursor, style),
    ])
}
