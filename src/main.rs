use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::mpsc;
use std::time::Duration;

use lawquiz::models::{AppState, GenRequest, GenResponse, QuizSession, QuizStyle, Topic};
use lawquiz::{ai, ai_worker, logger, session, ui};

/// Progress of the current generation request. One request at a time: the
/// state machine only reaches the menu's Generate key while idle.
#[derive(Default)]
struct GenerationStatus {
    attempt: u32,
    retry_notice: Option<String>,
}

fn main() -> io::Result<()> {
    logger::init();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (req_tx, req_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let _worker = ai_worker::spawn_generation_worker(resp_tx, req_rx);

    let api_key_set = std::env::var(ai::API_KEY_VAR).is_ok();

    let mut app_state = AppState::Menu;
    let mut selected_topic_index: usize = 0;
    let mut selected_style_index: usize = 0;
    let mut focused_panel: usize = 0;
    let mut menu_notice: Option<String> = None;
    let mut generation = GenerationStatus::default();
    let mut in_flight: Option<(Topic, QuizStyle)> = None;
    let mut quiz_session: Option<QuizSession> = None;

    loop {
        terminal.draw(|f| match app_state {
            AppState::Menu => ui::draw_menu(
                f,
                selected_topic_index,
                selected_style_index,
                focused_panel,
                api_key_set,
                menu_notice.as_deref(),
            ),
            AppState::Generating => {
                if let Some((topic, style)) = in_flight {
                    ui::draw_generating(
                        f,
                        topic,
                        style,
                        generation.attempt,
                        generation.retry_notice.as_deref(),
                    );
                }
            }
            AppState::Quiz => {
                if let Some(session) = &quiz_session {
                    ui::draw_quiz(f, session);
                }
            }
            AppState::QuizQuitConfirm => ui::draw_quit_confirmation(f),
            AppState::Summary => {
                if let Some(session) = &quiz_session {
                    ui::draw_summary(f, session);
                }
            }
        })?;

        // Drain worker responses before handling input.
        while let Ok(response) = resp_rx.try_recv() {
            match response {
                GenResponse::Questions {
                    topic,
                    style,
                    questions,
                } => {
                    quiz_session = Some(QuizSession::new(topic, style, questions));
                    generation = GenerationStatus::default();
                    in_flight = None;
                    menu_notice = None;
                    app_state = AppState::Quiz;
                }
                GenResponse::Retrying { attempt, reason } => {
                    generation.attempt = attempt;
                    generation.retry_notice = Some(reason);
                }
                GenResponse::Failed { error } => {
                    logger::log(&format!("Generation failed: {}", error));
                    menu_notice = Some(format!("Unable to generate questions: {}", error));
                    generation = GenerationStatus::default();
                    in_flight = None;
                    app_state = AppState::Menu;
                }
            }
        }

        // Poll with a timeout so worker responses keep draining while idle.
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        match app_state {
            AppState::Menu => match key.code {
                KeyCode::Char('1') => focused_panel = 0,
                KeyCode::Char('2') => focused_panel = 1,
                KeyCode::Up => {
                    if focused_panel == 0 {
                        selected_topic_index = selected_topic_index.saturating_sub(1);
                    } else {
                        selected_style_index = selected_style_index.saturating_sub(1);
                    }
                }
                KeyCode::Down => {
                    if focused_panel == 0 {
                        if selected_topic_index < Topic::ALL.len() - 1 {
                            selected_topic_index += 1;
                        }
                    } else if selected_style_index < QuizStyle::ALL.len() - 1 {
                        selected_style_index += 1;
                    }
                }
                KeyCode::Enter => {
                    if in_flight.is_none() {
                        if api_key_set {
                            let topic = Topic::ALL[selected_topic_index];
                            let style = QuizStyle::ALL[selected_style_index];
                            menu_notice = None;
                            generation = GenerationStatus::default();
                            in_flight = Some((topic, style));
                            req_tx.send(GenRequest::Generate { topic, style }).ok();
                            app_state = AppState::Generating;
                        } else {
                            menu_notice =
                                Some(format!("Set {} to generate questions", ai::API_KEY_VAR));
                        }
                    }
                }
                KeyCode::Char('q') | KeyCode::Esc => break,
                _ => {}
            },
            // No cancellation while a request is outstanding.
            AppState::Generating => {}
            AppState::Quiz => {
                if let Some(session) = &mut quiz_session {
                    session::handle_quiz_input(session, key, &mut app_state);
                }
            }
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') => {
                    app_state = AppState::Menu;
                    quiz_session = None;
                }
                KeyCode::Char('n') => {
                    app_state = AppState::Quiz;
                }
                _ => {}
            },
            AppState::Summary => match key.code {
                KeyCode::Char('r') => {
                    if let Some(session) = &mut quiz_session {
                        session.reset_answers();
                        app_state = AppState::Quiz;
                    }
                }
                KeyCode::Char('c') => {
                    if let Some(session) = &mut quiz_session {
                        session::export_session(session);
                    }
                }
                KeyCode::Char('m') => {
                    app_state = AppState::Menu;
                    quiz_session = None;
                }
                KeyCode::Char('q') => break,
                _ => {}
            },
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
