use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::ai::{API_KEY_VAR, DEFAULT_MODEL};
use crate::models::{QuizStyle, Topic};

fn draw_panel_header(area: ratatui::layout::Rect, title: &str, focused: bool, f: &mut Frame) {
    let style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let header = Paragraph::new(title)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default());

    f.render_widget(header, area);
}

pub fn draw_menu(
    f: &mut Frame,
    selected_topic_index: usize,
    selected_style_index: usize,
    focused_panel: usize,
    api_key_set: bool,
    notice: Option<&str>,
) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    let title = Paragraph::new("Indian Law Question Generator")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let topic_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[1]);

    let style_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[2]);

    draw_panel_header(topic_chunks[0], "[1] Topic", focused_panel == 0, f);

    let topic_items: Vec<ListItem> = Topic::ALL
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let style = if i == selected_topic_index && focused_panel == 0 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(topic.label()).style(style)
        })
        .collect();

    let topic_list = List::new(topic_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused_panel == 0 {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(topic_list, topic_chunks[1]);

    draw_panel_header(style_chunks[0], "[2] Question Style", focused_panel == 1, f);

    let style_items: Vec<ListItem> = QuizStyle::ALL
        .iter()
        .enumerate()
        .map(|(i, style)| {
            let item_style = if i == selected_style_index && focused_panel == 1 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(style.label()).style(item_style)
        })
        .collect();

    let style_list = List::new(style_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused_panel == 1 {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(style_list, style_chunks[1]);

    let notice_text = notice.unwrap_or("");
    let notice_widget = Paragraph::new(notice_text)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(notice_widget, chunks[3]);

    let help_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[4]);

    let api_status_content = if api_key_set {
        vec![
            Line::from("API key: Set"),
            Line::from(format!("Model: {}", DEFAULT_MODEL)),
        ]
    } else {
        vec![
            Line::from("API key: Missing"),
            Line::from(format!("Set {}", API_KEY_VAR)),
        ]
    };

    let api_status = Paragraph::new(api_status_content)
        .style(
            Style::default()
                .fg(if api_key_set {
                    Color::Green
                } else {
                    Color::Yellow
                })
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Gemini"));
    f.render_widget(api_status, help_chunks[0]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "1/2",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Focus Panel  "),
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Generate  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, help_chunks[1]);
}
