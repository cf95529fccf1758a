pub mod client;
pub mod prompt;
pub mod recover;

// Public API exports
pub use client::{ClientError, GeminiClient, API_KEY_VAR, DEFAULT_MODEL};
pub use prompt::build_prompt;
pub use recover::{recover_questions, repair_json, RecoverError};
