mod dialog;
mod leaderboard;
mod login;
mod menu;
mod play;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, AppState, StatusKind, StatusMessage};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        AppState::Login(form) => login::render(frame, area, form, false),
        AppState::Register(form) => login::render(frame, area, form, true),
        AppState::Menu { selected } => menu::render(frame, area, app, *selected),
        AppState::ResumePrompt { saved } => {
            menu::render(frame, area, app, 0);
            dialog::render_resume(frame, area, saved);
        }
        AppState::Playing => play::render(frame, area, app),
        AppState::Paused { choice } => {
            play::render(frame, area, app);
            dialog::render_pause(frame, area, *choice);
        }
        AppState::GameEnd { end, score, choice } => {
            play::render(frame, area, app);
            dialog::render_game_end(frame, area, *end, *score, *choice);
        }
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn status_line(status: Option<&StatusMessage>) -> Line<'static> {
    let Some(status) = status else {
        return Line::from("");
    };
    let color = match status.kind {
        StatusKind::Info => Color::Green,
        StatusKind::Warning => Color::Yellow,
        StatusKind::Error => Color::Red,
    };
    Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
}

fn render_controls(frame: &mut Frame, area: Rect, hint: &'static str) {
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(2, 3, 40, 10);
        assert_eq!(centered_rect(area, 20, 4), Rect::new(12, 6, 20, 4));
        assert_eq!(centered_rect(area, 100, 100), area);
    }
}
