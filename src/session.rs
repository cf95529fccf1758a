use crate::export::{write_export, EXPORT_DIR};
use crate::logger;
use crate::models::{AppState, QuizSession};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::Path;

pub fn handle_quiz_input(session: &mut QuizSession, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            *app_state = AppState::QuizQuitConfirm;
        }
        KeyCode::Down => {
            if session.current_index < session.questions.len().saturating_sub(1) {
                session.current_index += 1;
            }
        }
        KeyCode::Up => {
            if session.current_index > 0 {
                session.current_index -= 1;
            }
        }
        KeyCode::Enter => {
            if session.current_index < session.questions.len().saturating_sub(1) {
                session.current_index += 1;
            } else {
                *app_state = AppState::Summary;
            }
        }
        KeyCode::Char(c @ '1'..='4') => {
            let option_index = c as usize - '1' as usize;
            session.select_answer(session.current_index, option_index);
        }
        KeyCode::Char('c') => {
            export_session(session);
        }
        _ => {}
    }
}

/// Write the current question set to the export directory, recording the
/// outcome on the session for the UI to show.
pub fn export_session(session: &mut QuizSession) {
    match write_export(Path::new(EXPORT_DIR), session.topic, &session.questions) {
        Ok(path) => {
            logger::log(&format!("Exported questions to {}", path.display()));
            session.exported_to = Some(path);
            session.last_export_error = None;
        }
        Err(e) => {
            logger::log(&format!("Export failed: {}", e));
            session.last_export_error = Some(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuizStyle, Topic};

    fn mcq_session(count: usize) -> QuizSession {
        let questions = (0..count)
            .map(|i| Question::MultipleChoice {
                question: format!("Q{}?", i + 1),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string(),
                ],
                correct: 0,
            })
            .collect();
        QuizSession::new(Topic::Pocso, QuizStyle::MultipleChoice, questions)
    }

    #[test]
    fn test_digit_keys_select_options() {
        let mut session = mcq_session(2);
        let mut state = AppState::Quiz;
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Char('3')), &mut state);
        assert_eq!(session.selections[0], Some(2));
        assert_eq!(state, AppState::Quiz);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut session = mcq_session(2);
        let mut state = AppState::Quiz;
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Up), &mut state);
        assert_eq!(session.current_index, 0);
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Down), &mut state);
        assert_eq!(session.current_index, 1);
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Down), &mut state);
        assert_eq!(session.current_index, 1);
    }

    #[test]
    fn test_enter_advances_then_reaches_summary() {
        let mut session = mcq_session(2);
        let mut state = AppState::Quiz;
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Enter), &mut state);
        assert_eq!(session.current_index, 1);
        assert_eq!(state, AppState::Quiz);
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Enter), &mut state);
        assert_eq!(state, AppState::Summary);
    }

    #[test]
    fn test_escape_asks_for_quit_confirmation() {
        let mut session = mcq_session(1);
        let mut state = AppState::Quiz;
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Esc), &mut state);
        assert_eq!(state, AppState::QuizQuitConfirm);
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut session = mcq_session(3);
        let mut state = AppState::Quiz;
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Char('2')), &mut state);
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Down), &mut state);
        handle_quiz_input(&mut session, KeyEvent::from(KeyCode::Char('4')), &mut state);
        assert_eq!(session.selections[0], Some(1));
        assert_eq!(session.selections[1], Some(3));
        assert_eq!(session.selections[2], None);
    }

    #[test]
    fn test_export_records_path_on_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = mcq_session(1);
        match write_export(dir.path(), session.topic, &session.questions) {
            Ok(path) => {
                session.exported_to = Some(path.clone());
                assert!(path.exists());
            }
            Err(e) => panic!("export failed: {}", e),
        }
        assert!(session.exported_to.is_some());
        assert!(session.last_export_error.is_none());
    }
}
