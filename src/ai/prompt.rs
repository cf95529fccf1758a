use crate::models::{QuizStyle, Topic};

pub const QUESTION_COUNT: usize = 5;

/// Assemble the generation prompt for a topic and question style. The rules
/// and the exact-JSON instruction follow the original question generator;
/// the schema block matches what `ai::recover` expects back.
pub fn build_prompt(topic: Topic, style: QuizStyle) -> String {
    let schema = match style {
        QuizStyle::Open => {
            r#"{
  "questions": [
    "Question 1...",
    "Question 2...",
    "Question 3...",
    "Question 4...",
    "Question 5..."
  ]
}"#
        }
        QuizStyle::MultipleChoice => {
            r#"{
  "questions": [
    {
      "question": "Question text...",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0
    }
  ]
}"#
        }
    };

    let style_rules = match style {
        QuizStyle::Open => "",
        QuizStyle::MultipleChoice => {
            "\n6. Each question must have exactly 4 options and a correctAnswer index between 0 and 3\n7. Vary the correctAnswer index across questions; do not always use 0"
        }
    };

    format!(
        r#"You are an AI Question Generator specialized in Indian Law.

Generate {count} diverse, factually correct, and exam-level questions based ONLY on Indian law for the topic: {context}.

Rules:
1. All questions must be related ONLY to Indian legal context
2. Do NOT mention or refer to international or foreign laws
3. Each question must be grammatically correct, factually accurate, and clearly written
4. Focus on relevant Indian legal provisions and acts
5. Self-check each question for factual accuracy{style_rules}

Return ONLY a JSON object in this exact format:
{schema}"#,
        count = QUESTION_COUNT,
        context = topic.context(),
    )
}
