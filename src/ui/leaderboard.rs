use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Padding, Row, Table},
};

use crate::models::LeaderboardEntry;

pub fn render(frame: &mut Frame, area: Rect, entries: &[LeaderboardEntry], current: Option<&str>) {
    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            let style = if Some(entry.username.as_str()) == current {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(format!("{}.", entry.rank)),
                Cell::from(entry.username.clone()),
                Cell::from(entry.high_score.to_string()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["#", "Player", "Best"]).style(Style::default().fg(Color::DarkGray)))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Leaderboard ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(table, area);
}
