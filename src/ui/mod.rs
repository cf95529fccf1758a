pub mod layout;
mod generating;
mod menu;
mod quiz;
mod summary;

pub use generating::draw_generating;
pub use layout::{calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::draw_menu;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use summary::draw_summary;
