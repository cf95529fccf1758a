use crate::models::{Question, Topic};
use crate::utils::option_letter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const EXPORT_DIR: &str = "exports";

/// Plaintext rendering of a question set: numbered questions, lettered
/// options, and the correct answer marked. This is the same text the export
/// file receives, kept pure so it can be formatted without touching disk.
pub fn format_questions(topic: Topic, questions: &[Question]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Generated Questions - {}\n\n", topic.label()));

    for (i, question) in questions.iter().enumerate() {
        match question {
            Question::Plain { question } => {
                out.push_str(&format!("{}. {}\n\n", i + 1, question));
            }
            Question::MultipleChoice {
                question,
                options,
                correct,
            } => {
                out.push_str(&format!("{}. {}\n", i + 1, question));
                for (j, option) in options.iter().enumerate() {
                    out.push_str(&format!("   {}) {}\n", option_letter(j), option));
                }
                out.push_str(&format!("   Correct Answer: {}\n\n", option_letter(*correct)));
            }
        }
    }

    out
}

/// Write the formatted question set under `dir` with a topic- and
/// timestamp-derived filename, returning the path written.
pub fn write_export(dir: &Path, topic: Topic, questions: &[Question]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{}.txt", topic.slug(), stamp));
    fs::write(&path, format_questions(topic, questions))?;
    Ok(path)
}
