//! Modal dialogs drawn over the menu or game screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;
use crate::app::{EndChoice, PauseChoice, SessionEnd};
use crate::models::ProgressSnapshot;

const DIALOG_WIDTH: u16 = 44;

pub fn render_resume(frame: &mut Frame, area: Rect, saved: &ProgressSnapshot) {
    let content = vec![
        Line::from(""),
        Line::from("A saved game was found".fg(Color::White)),
        Line::from(
            format!("Level {}  ·  Score {}", saved.level, saved.score).fg(Color::Yellow),
        ),
        Line::from(""),
        Line::from("Continue it?  [Y]es / [N]o".fg(Color::DarkGray)),
    ];
    render_box(frame, area, " Resume ", content);
}

pub fn render_pause(frame: &mut Frame, area: Rect, choice: PauseChoice) {
    let content = vec![
        Line::from(""),
        Line::from("PAUSED".fg(Color::Cyan).bold()),
        Line::from(""),
        choices(&[
            ("Continue", choice == PauseChoice::Continue),
            ("Save & quit", choice == PauseChoice::SaveAndQuit),
        ]),
    ];
    render_box(frame, area, " Pause ", content);
}

pub fn render_game_end(
    frame: &mut Frame,
    area: Rect,
    end: SessionEnd,
    score: u32,
    choice: EndChoice,
) {
    let headline_color = match end {
        SessionEnd::Completed => Color::Green,
        _ => Color::Red,
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            end.headline(),
            Style::default().fg(headline_color).bold(),
        )),
    ];
    if let SessionEnd::WrongAnswer { expected } = end {
        content.push(Line::from(
            format!("The answer was {expected}").fg(Color::White),
        ));
    }
    content.push(Line::from(format!("Final score: {score}").fg(Color::Yellow)));
    content.push(Line::from(""));
    content.push(choices(&[
        ("Retry", choice == EndChoice::Retry),
        ("Exit", choice == EndChoice::Exit),
    ]));

    render_box(frame, area, " Game over ", content);
}

fn choices(items: &[(&'static str, bool)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(items.len() * 2);
    for (i, (label, selected)) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("    "));
        }
        let span = if *selected {
            Span::styled(format!("> {label}"), Style::default().fg(Color::Yellow).bold())
        } else {
            Span::styled(format!("  {label}"), Style::default().fg(Color::White))
        };
        spans.push(span);
    }
    Line::from(spans)
}

fn render_box(frame: &mut Frame, area: Rect, title: &'static str, content: Vec<Line<'_>>) {
    let rect = centered_rect(area, DIALOG_WIDTH, content.len() as u16 + 3);
    frame.render_widget(Clear, rect);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(widget, rect);
}
