//! The in-game screen: header, question, answer box, countdown and the
//! leaderboard beside them.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use super::{leaderboard, render_controls, status_line};
use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::horizontal([Constraint::Fill(2), Constraint::Fill(1)])
        .margin(1)
        .split(area);

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Length(5), // Question
        Constraint::Length(3), // Answer
        Constraint::Length(3), // Countdown
        Constraint::Length(1), // Status
        Constraint::Fill(1),
        Constraint::Length(2), // Controls
    ])
    .split(columns[0]);

    render_header(frame, chunks[0], app);
    render_question(frame, chunks[1], app);
    render_answer(frame, chunks[2], app.answer_input());
    render_countdown(frame, chunks[3], app);
    frame.render_widget(
        Paragraph::new(status_line(app.status())).alignment(Alignment::Center),
        chunks[4],
    );
    render_controls(frame, chunks[6], "Enter to submit  ·  Esc pause  ·  Ctrl+C quit");

    leaderboard::render(frame, columns[1], app.leaderboard(), app.user());
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine();
    let text = format!(
        "Level {} / {}   ·   Score {}   ·   {}/{} this level",
        engine.level().min(engine.rules().max_level),
        engine.rules().max_level,
        engine.score(),
        engine.correct_in_level(),
        engine.rules().questions_per_level,
    );

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());

    frame.render_widget(widget, area);
}

fn render_question(frame: &mut Frame, area: Rect, app: &App) {
    let text = app
        .engine()
        .current_question()
        .map(|question| question.to_string())
        .unwrap_or_default();

    let widget = Paragraph::new(vec![Line::from(""), Line::from(text.bold())])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Question ")
                .title_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(widget, area);
}

fn render_answer(frame: &mut Frame, area: Rect, input: &str) {
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(input, Style::default().fg(Color::Yellow)),
        Span::styled("_", Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Answer ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_countdown(frame: &mut Frame, area: Rect, app: &App) {
    let engine = app.engine();
    let color = if engine.is_low_time() {
        Color::Red
    } else {
        Color::Green
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(engine.time_fraction().clamp(0.0, 1.0))
        .label(format!("{:.0}s", engine.time_remaining()));

    frame.render_widget(gauge, area);
}
