use crate::models::{Question, QuizSession};
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::option_letter;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_quiz_chunks(f.area());

    let question = &session.questions[session.current_index];
    let selection = session.selections[session.current_index];
    let progress = format!(
        "Question {} / {} - {}",
        session.current_index + 1,
        session.questions.len(),
        session.topic.label()
    );

    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question_widget = Paragraph::new(Text::from(question.text()))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    match question {
        Question::MultipleChoice {
            options, correct, ..
        } => {
            let items: Vec<ListItem> = options
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let marker = if selection == Some(i) { "(•)" } else { "( )" };
                    let text = format!("{} {}) {}", marker, option_letter(i), option);
                    // Correct/incorrect colouring only once an answer is picked.
                    let style = match selection {
                        Some(_) if i == *correct => Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                        Some(picked) if picked == i => Style::default().fg(Color::Red),
                        _ => Style::default(),
                    };
                    ListItem::new(text).style(style)
                })
                .collect();

            let title = match selection {
                Some(picked) if picked == *correct => "Options - Correct!",
                Some(_) => "Options - Incorrect",
                None => "Options",
            };
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(list, layout.options_area);
        }
        Question::Plain { .. } => {
            let hint = Paragraph::new("Open question - no options to pick. Export with c.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Options"));
            f.render_widget(hint, layout.options_area);
        }
    }

    let mut spans = Vec::new();
    if question.is_mcq() {
        spans.extend([
            Span::styled(
                "1-4",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Select Answer  "),
        ]);
    }
    spans.extend([
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
        Span::from(" Next  "),
        Span::styled(
            "c",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Copy All  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit to Menu"),
    ]);

    let mut help_text = vec![Line::from(spans)];
    if let Some(path) = &session.exported_to {
        help_text.push(Line::from(Span::styled(
            format!("Copied to {}", path.display()),
            Style::default().fg(Color::Green),
        )));
    } else if let Some(error) = &session.last_export_error {
        help_text.push(Line::from(Span::styled(
            format!("Export failed: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Discard this question set and return to the menu?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
