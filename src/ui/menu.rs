use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::{leaderboard, render_controls, status_line};
use crate::app::{App, MenuItem};

pub fn render(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(MenuItem::ALL.len() as u16 + 2),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let greeting = format!("Welcome, {}", app.user().unwrap_or("player"));
    let title = Paragraph::new(vec![
        Line::from(Span::styled("MATH QUIZ", Style::default().fg(Color::Cyan).bold())),
        Line::from(greeting.fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_items(frame, chunks[1], selected);
    frame.render_widget(
        Paragraph::new(status_line(app.status())).alignment(Alignment::Center),
        chunks[2],
    );
    leaderboard::render(frame, chunks[3], app.leaderboard(), app.user());
    render_controls(frame, chunks[4], "j/k or arrows to select  ·  Enter to confirm  ·  q quit");
}

fn render_items(frame: &mut Frame, area: Rect, selected: usize) {
    let lines: Vec<Line> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_selected = i == selected;
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(format!("{prefix}{}", item.label()), style))
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}
