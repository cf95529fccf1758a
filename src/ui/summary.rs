use crate::models::{Question, QuizSession};
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::{option_letter, truncate_string};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_summary(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_summary_chunks(f.area());

    let title_text = format!("Quiz Summary - {}", session.topic.label());
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut summary_text = Text::default();
    let mcq_total = session.questions.iter().filter(|q| q.is_mcq()).count();
    if mcq_total > 0 {
        summary_text.push_line(Line::from(format!(
            "Score: {} / {}  (answered {})",
            session.correct_count(),
            mcq_total,
            session.answered_count()
        )));
    } else {
        summary_text.push_line(Line::from(format!(
            "Total Questions: {}",
            session.questions.len()
        )));
    }
    summary_text.push_line(Line::from(""));

    for (i, question) in session.questions.iter().enumerate() {
        let mark = match (question, session.selections[i]) {
            (Question::MultipleChoice { correct, .. }, Some(picked)) if picked == *correct => {
                "[✓]"
            }
            (Question::MultipleChoice { .. }, Some(_)) => "[✗]",
            _ => "[ ]",
        };
        summary_text.push_line(Line::from(format!(
            "{} {}. {}",
            mark,
            i + 1,
            truncate_string(question.text(), 70)
        )));
        if let (Question::MultipleChoice { options, correct, .. }, Some(picked)) =
            (question, session.selections[i])
        {
            summary_text.push_line(Line::from(format!(
                "    Your Answer: {}) {}",
                option_letter(picked),
                truncate_string(&options[picked], 56)
            )));
            if picked != *correct {
                summary_text.push_line(Line::from(format!(
                    "    Correct Answer: {}) {}",
                    option_letter(*correct),
                    truncate_string(&options[*correct], 53)
                )));
            }
        }
        summary_text.push_line(Line::from(""));
    }

    if let Some(path) = &session.exported_to {
        summary_text.push_line(Line::from(Span::styled(
            format!("Copied to {}", path.display()),
            Style::default().fg(Color::Green),
        )));
    } else if let Some(error) = &session.last_export_error {
        summary_text.push_line(Line::from(Span::styled(
            format!("Export failed: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Retake  "),
        Span::styled(
            "c",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Copy All  "),
        Span::styled(
            "m",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Main Menu  "),
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
    f.render_widget(help, layout.footer_area);
}
