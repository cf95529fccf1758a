pub mod ai;
pub mod ai_worker;
pub mod export;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use ai::{
    recover_questions, repair_json, ClientError, GeminiClient, RecoverError, API_KEY_VAR,
    DEFAULT_MODEL,
};
pub use ai_worker::{spawn_generation_worker, MAX_RETRIES, RETRY_DELAY};
pub use export::{format_questions, write_export};
pub use models::{AppState, GenRequest, GenResponse, Question, QuizSession, QuizStyle, Topic};
pub use session::{export_session, handle_quiz_input};
pub use ui::{draw_generating, draw_menu, draw_quit_confirmation, draw_quiz, draw_summary};
pub use utils::{option_letter, truncate_string};
