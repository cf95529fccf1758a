use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ai_worker::MAX_RETRIES;
use crate::models::{QuizStyle, Topic};

/// Progress screen shown while a generation request is in flight. There is
/// no cancel key: the request runs to success or exhausted retries.
pub fn draw_generating(
    f: &mut Frame,
    topic: Topic,
    style: QuizStyle,
    attempt: u32,
    retry_notice: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Generating Questions...")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let mut body = vec![
        Line::from(format!("Topic: {}", topic.label())),
        Line::from(format!("Style: {}", style.label())),
        Line::from(""),
        Line::from(format!("Attempt {} of {}", attempt + 1, MAX_RETRIES + 1)),
    ];
    if let Some(notice) = retry_notice {
        body.push(Line::from(""));
        body.push(Line::from(format!("Retrying: {}", notice)));
    }

    let progress = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(progress, chunks[1]);

    let help = Paragraph::new("Please wait - the request cannot be cancelled")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
