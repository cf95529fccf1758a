use serde::{Deserialize, Serialize};

/// The closed set of legal topics questions can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    ChildAbuse,
    WomenHarassment,
    Pocso,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::ChildAbuse, Topic::WomenHarassment, Topic::Pocso];

    pub fn label(&self) -> &'static str {
        match self {
            Topic::ChildAbuse => "Child Abuse",
            Topic::WomenHarassment => "Women Harassment",
            Topic::Pocso => "POCSO (Protection of Children from Sexual Offences Act, 2012)",
        }
    }

    /// Legal-context description substituted into the generation prompt.
    pub fn context(&self) -> &'static str {
        match self {
            Topic::ChildAbuse => {
                "Child Abuse under Indian Penal Code (IPC) and child protection laws"
            }
            Topic::WomenHarassment => {
                "Women Harassment under IPC Sections 354A-354D and Sexual Harassment of Women at Workplace Act, 2013"
            }
            Topic::Pocso => "Protection of Children from Sexual Offences Act (POCSO), 2012",
        }
    }

    /// Short identifier used in export filenames.
    pub fn slug(&self) -> &'static str {
        match self {
            Topic::ChildAbuse => "child-abuse",
            Topic::WomenHarassment => "women-harassment",
            Topic::Pocso => "pocso",
        }
    }
}

/// Which shape of question to ask the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStyle {
    Open,
    MultipleChoice,
}

impl QuizStyle {
    pub const ALL: [QuizStyle; 2] = [QuizStyle::Open, QuizStyle::MultipleChoice];

    pub fn label(&self) -> &'static str {
        match self {
            QuizStyle::Open => "Open questions",
            QuizStyle::MultipleChoice => "Multiple choice",
        }
    }
}

/// A generated question. MCQ records always carry exactly 4 options and a
/// correct index in 0..=3; `ai::recover` enforces this before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    Plain {
        question: String,
    },
    MultipleChoice {
        question: String,
        options: Vec<String>,
        correct: usize,
    },
}

impl Question {
    pub fn text(&self) -> &str {
        match self {
            Question::Plain { question } => question,
            Question::MultipleChoice { question, .. } => question,
        }
    }

    pub fn is_mcq(&self) -> bool {
        matches!(self, Question::MultipleChoice { .. })
    }
}

/// One answered quiz. Replaced wholesale on every successful generation, so
/// `selections` never outlives the question set it indexes into.
#[derive(Debug)]
pub struct QuizSession {
    pub topic: Topic,
    pub style: QuizStyle,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub selections: Vec<Option<usize>>,
    pub exported_to: Option<std::path::PathBuf>,
    pub last_export_error: Option<String>,
}

impl QuizSession {
    pub fn new(topic: Topic, style: QuizStyle, questions: Vec<Question>) -> Self {
        let selections = vec![None; questions.len()];
        Self {
            topic,
            style,
            questions,
            current_index: 0,
            selections,
            exported_to: None,
            last_export_error: None,
        }
    }

    /// Record the user's pick for a question. Out-of-range question or option
    /// indices are ignored, as is an option pick on a plain question.
    pub fn select_answer(&mut self, question_index: usize, option_index: usize) {
        let Some(question) = self.questions.get(question_index) else {
            return;
        };
        if let Question::MultipleChoice { options, .. } = question
            && option_index < options.len()
        {
            self.selections[question_index] = Some(option_index);
        }
    }

    /// Clear all selections, keeping the question set.
    pub fn reset_answers(&mut self) {
        self.selections = vec![None; self.questions.len()];
        self.current_index = 0;
        self.exported_to = None;
        self.last_export_error = None;
    }

    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    pub fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.selections)
            .filter(|(q, s)| match (q, s) {
                (Question::MultipleChoice { correct, .. }, Some(picked)) => picked == correct,
                _ => false,
            })
            .count()
    }
}

/// Request sent to the generation worker thread.
#[derive(Debug)]
pub enum GenRequest {
    Generate { topic: Topic, style: QuizStyle },
}

/// Messages the generation worker sends back to the UI loop.
#[derive(Debug)]
pub enum GenResponse {
    Questions {
        topic: Topic,
        style: QuizStyle,
        questions: Vec<Question>,
    },
    Retrying {
        attempt: u32,
        reason: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Menu,
    Generating,
    Quiz,
    QuizQuitConfirm,
    Summary,
}
