use crate::models::Question;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;
use std::fmt;

/// Top-level field the model is instructed to return.
const QUESTIONS_FIELD: &str = "questions";
/// MCQ records must carry exactly this many options.
const OPTION_COUNT: usize = 4;

/// Why recovery of a question set from the model's raw text failed.
///
/// The caller decides retry eligibility through [`RecoverError::is_retryable`]
/// rather than by matching on error messages.
#[derive(Debug, Clone, PartialEq)]
pub enum RecoverError {
    /// The text contains no `{` at all.
    NoJsonFound,
    /// A `{` exists but not even a structurally complete prefix could be
    /// recovered (response truncated too early).
    Incomplete,
    /// A candidate object was found but failed to parse even after repair.
    /// Carries the parser's message for diagnostics.
    Unparseable(String),
    /// Valid JSON without a `questions` array.
    MissingQuestions,
    /// The array was present but no record survived validation.
    NoValidQuestions,
}

impl fmt::Display for RecoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoverError::NoJsonFound => write!(f, "no JSON object found in the model response"),
            RecoverError::Incomplete => {
                write!(f, "model response contains only an incomplete JSON object")
            }
            RecoverError::Unparseable(msg) => {
                write!(f, "model response JSON failed to parse: {}", msg)
            }
            RecoverError::MissingQuestions => {
                write!(f, "response JSON has no \"{}\" array", QUESTIONS_FIELD)
            }
            RecoverError::NoValidQuestions => {
                write!(f, "no valid question records in the model response")
            }
        }
    }
}

impl std::error::Error for RecoverError {}

impl RecoverError {
    /// Malformed or empty output may be a one-off model glitch and is worth
    /// another attempt; a response with no object at all, or valid JSON in a
    /// different shape, will not improve by asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RecoverError::Incomplete
                | RecoverError::Unparseable(_)
                | RecoverError::NoValidQuestions
        )
    }
}

/// Recover a validated, non-empty question list from the model's free-form
/// text. The text may wrap the JSON in prose or code fences, truncate it
/// mid-object, or malform it in the ways [`repair_json`] handles.
pub fn recover_questions(raw: &str) -> Result<Vec<Question>, RecoverError> {
    let stripped = strip_code_fences(raw);
    let candidate = extract_object(&stripped)?;
    let value = parse_with_repair(&candidate)?;

    let items = value
        .get(QUESTIONS_FIELD)
        .and_then(Value::as_array)
        .ok_or(RecoverError::MissingQuestions)?;

    let questions: Vec<Question> = items.iter().filter_map(question_from_value).collect();
    if questions.is_empty() {
        Err(RecoverError::NoValidQuestions)
    } else {
        Ok(questions)
    }
}

/// Remove markdown code-fence markers, keeping whatever they wrapped.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

struct ScanOutcome {
    /// End index of a fully balanced object (both depths back to zero).
    complete_end: Option<usize>,
    /// End index of the last object closed outside a string, with the
    /// delimiters still open at that point, outermost first.
    last_close: Option<(usize, Vec<char>)>,
}

/// Single pass from `start`, tracking `{}` and `[]` nesting and a
/// string-literal mode. The escape check looks back one character only, so a
/// quote preceded by a doubled backslash is misread as escaped; accepted
/// limitation inherited from the source behavior.
fn scan_balance(text: &str, start: usize) -> ScanOutcome {
    let mut braces = 0i32;
    let mut brackets = 0i32;
    let mut in_string = false;
    let mut prev = '\0';
    let mut open_stack: Vec<char> = Vec::new();
    let mut complete_end = None;
    let mut last_close = None;

    for (offset, ch) in text[start..].char_indices() {
        let i = start + offset;
        if in_string {
            if ch == '"' && prev != '\\' {
                in_string = false;
            }
            prev = ch;
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => {
                braces += 1;
                open_stack.push('{');
            }
            '}' => {
                braces -= 1;
                if open_stack.last() == Some(&'{') {
                    open_stack.pop();
                }
                if braces >= 0 {
                    last_close = Some((i, open_stack.clone()));
                }
                if braces == 0 && brackets == 0 {
                    complete_end = Some(i);
                }
            }
            '[' => {
                brackets += 1;
                open_stack.push('[');
            }
            ']' => {
                brackets -= 1;
                if open_stack.last() == Some(&'[') {
                    open_stack.pop();
                }
            }
            _ => {}
        }
        prev = ch;
    }

    ScanOutcome {
        complete_end,
        last_close,
    }
}

/// Cut the candidate object out of the surrounding text. A balanced object is
/// returned as-is; a truncated one is cut at the last complete object close
/// and the scopes still open at that point are closed.
fn extract_object(text: &str) -> Result<String, RecoverError> {
    let start = text.find('{').ok_or(RecoverError::NoJsonFound)?;
    let outcome = scan_balance(text, start);

    if let Some(end) = outcome.complete_end {
        return Ok(text[start..=end].to_string());
    }

    if let Some((end, open)) = outcome.last_close {
        let mut candidate = text[start..=end].to_string();
        for delim in open.iter().rev() {
            candidate.push(if *delim == '[' { ']' } else { '}' });
        }
        return Ok(candidate);
    }

    Err(RecoverError::Incomplete)
}

lazy_static! {
    static ref TRAILING_COMMA: Regex = Regex::new(r",\s*([}\]])").unwrap();
    static ref BARE_KEY: Regex = Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:").unwrap();
    static ref SINGLE_QUOTED: Regex = Regex::new(r"'([^']*)'").unwrap();
    static ref BARE_VALUE: Regex =
        Regex::new(r":\s*([A-Za-z_][A-Za-z0-9_ -]*[A-Za-z0-9_])\s*([,}\]])").unwrap();
}

/// Bounded textual repair for the malformations the model is known to emit:
/// trailing commas, unquoted keys, single-quoted strings, bare scalar values.
/// Already-valid JSON is returned unchanged, so the pass is idempotent on it.
/// The substitutions do not understand string contents; they run only on text
/// that failed to parse.
pub fn repair_json(text: &str) -> String {
    if serde_json::from_str::<Value>(text).is_ok() {
        return text.to_string();
    }
    let repaired = TRAILING_COMMA.replace_all(text, "${1}");
    let repaired = BARE_KEY.replace_all(&repaired, "${1}\"${2}\":");
    let repaired = SINGLE_QUOTED.replace_all(&repaired, "\"${1}\"");
    let repaired = BARE_VALUE.replace_all(&repaired, |caps: &Captures| {
        let word = &caps[1];
        // JSON literals stay bare; numbers never match the pattern.
        if matches!(word, "true" | "false" | "null") {
            format!(": {}{}", word, &caps[2])
        } else {
            format!(": \"{}\"{}", word, &caps[2])
        }
    });
    repaired.into_owned()
}

fn parse_with_repair(candidate: &str) -> Result<Value, RecoverError> {
    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(_) => {
            let repaired = repair_json(candidate);
            serde_json::from_str(&repaired)
                .map_err(|e| RecoverError::Unparseable(e.to_string()))
        }
    }
}

/// Map one array item to a [`Question`], or drop it. Plain items are bare
/// strings or objects without options; MCQ items need exactly 4 string
/// options and an in-range integer correct index under any of the field
/// names the three source variants used.
fn question_from_value(value: &Value) -> Option<Question> {
    if let Some(text) = value.as_str() {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        return Some(Question::Plain {
            question: text.to_string(),
        });
    }

    let obj = value.as_object()?;
    let question = obj.get("question").and_then(Value::as_str)?.trim().to_string();
    if question.is_empty() {
        return None;
    }

    let Some(options_value) = obj.get("options") else {
        return Some(Question::Plain { question });
    };

    let options: Vec<String> = options_value
        .as_array()?
        .iter()
        .map(|o| o.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    if options.len() != OPTION_COUNT {
        return None;
    }

    let correct = correct_index(obj)?;
    if correct >= OPTION_COUNT {
        return None;
    }

    Some(Question::MultipleChoice {
        question,
        options,
        correct,
    })
}

fn correct_index(obj: &serde_json::Map<String, Value>) -> Option<usize> {
    ["correctAnswer", "correct_answer", "answer"]
        .iter()
        .find_map(|key| obj.get(*key))
        .and_then(Value::as_u64)
        .map(|i| i as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq_item(question: &str, correct: usize) -> String {
        format!(
            r#"{{"question":"{}","options":["A","B","C","D"],"correctAnswer":{}}}"#,
            question, correct
        )
    }

    #[test]
    fn test_recovers_object_wrapped_in_prose_and_fences() {
        let raw = format!(
            "Sure! Here are your questions:\n```json\n{{\"questions\":[{},{}]}}\n```\nLet me know.",
            mcq_item("Q1?", 1),
            mcq_item("Q2?", 3)
        );
        let questions = recover_questions(&raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text(), "Q1?");
        assert_eq!(questions[1].text(), "Q2?");
    }

    #[test]
    fn test_end_to_end_fenced_scenario() {
        let raw = "Here is the result:\n```json\n{\"questions\":[{\"question\":\"Q1?\",\"options\":[\"A\",\"B\",\"C\",\"D\"],\"correctAnswer\":1}]}\n```";
        let questions = recover_questions(raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(
            questions[0],
            Question::MultipleChoice {
                question: "Q1?".to_string(),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string()
                ],
                correct: 1,
            }
        );
    }

    #[test]
    fn test_plain_string_questions() {
        let raw = r#"{"questions":["What is IPC?","What is POCSO?"]}"#;
        let questions = recover_questions(raw).unwrap();
        assert_eq!(
            questions,
            vec![
                Question::Plain {
                    question: "What is IPC?".to_string()
                },
                Question::Plain {
                    question: "What is POCSO?".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_truncated_after_complete_elements_returns_prefix() {
        let full = format!(
            "{{\"questions\":[{},{},{}]}}",
            mcq_item("Q1?", 0),
            mcq_item("Q2?", 2),
            mcq_item("Q3?", 1)
        );
        // Cut inside the third element's question string.
        let cut = full.find("Q3?").unwrap();
        let truncated = &full[..cut];
        let questions = recover_questions(truncated).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text(), "Q1?");
        assert_eq!(questions[1].text(), "Q2?");
    }

    #[test]
    fn test_truncated_with_no_complete_element_is_incomplete() {
        let raw = r#"{"questions":[{"question":"Q1?","options":["A","B""#;
        let err = recover_questions(raw).unwrap_err();
        assert_eq!(err, RecoverError::Incomplete);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_no_brace_at_all_is_no_json_found() {
        let err = recover_questions("I could not produce any questions, sorry.").unwrap_err();
        assert_eq!(err, RecoverError::NoJsonFound);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_missing_questions_field() {
        let err = recover_questions(r#"{"items":["Q1"]}"#).unwrap_err();
        assert_eq!(err, RecoverError::MissingQuestions);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_questions_field_not_an_array() {
        let err = recover_questions(r#"{"questions":"none"}"#).unwrap_err();
        assert_eq!(err, RecoverError::MissingQuestions);
    }

    #[test]
    fn test_record_with_three_options_is_dropped() {
        let raw = r#"{"questions":[{"question":"Q1?","options":["A","B","C"],"correctAnswer":0}]}"#;
        let err = recover_questions(raw).unwrap_err();
        assert_eq!(err, RecoverError::NoValidQuestions);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_invalid_records_filtered_valid_kept_in_order() {
        let raw = format!(
            "{{\"questions\":[{},{{\"question\":\"bad\",\"options\":[\"A\",\"B\"],\"correctAnswer\":0}},{}]}}",
            mcq_item("Q1?", 0),
            mcq_item("Q3?", 3)
        );
        let questions = recover_questions(&raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text(), "Q1?");
        assert_eq!(questions[1].text(), "Q3?");
    }

    #[test]
    fn test_out_of_range_correct_index_dropped() {
        let raw = r#"{"questions":[{"question":"Q?","options":["A","B","C","D"],"correctAnswer":4}]}"#;
        assert_eq!(
            recover_questions(raw).unwrap_err(),
            RecoverError::NoValidQuestions
        );
    }

    #[test]
    fn test_alternate_correct_field_names() {
        let raw = r#"{"questions":[
            {"question":"Q1?","options":["A","B","C","D"],"correct_answer":2},
            {"question":"Q2?","options":["A","B","C","D"],"answer":3}
        ]}"#;
        let questions = recover_questions(raw).unwrap();
        assert_eq!(
            questions,
            vec![
                Question::MultipleChoice {
                    question: "Q1?".to_string(),
                    options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    correct: 2,
                },
                Question::MultipleChoice {
                    question: "Q2?".to_string(),
                    options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    correct: 3,
                },
            ]
        );
    }

    #[test]
    fn test_object_without_options_is_plain() {
        let raw = r#"{"questions":[{"question":"Explain Section 354A."}]}"#;
        let questions = recover_questions(raw).unwrap();
        assert_eq!(
            questions,
            vec![Question::Plain {
                question: "Explain Section 354A.".to_string()
            }]
        );
    }

    #[test]
    fn test_repair_removes_trailing_commas() {
        let raw = r#"{"questions":["Q1","Q2",],}"#;
        let questions = recover_questions(raw).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn test_repair_quotes_bare_keys() {
        let raw = r#"{questions:[{question:"Q1?",options:["A","B","C","D"],correctAnswer:1}]}"#;
        let questions = recover_questions(raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "Q1?");
    }

    #[test]
    fn test_repair_converts_single_quoted_strings() {
        let raw = r#"{"questions":['Q1','Q2']}"#;
        let questions = recover_questions(raw).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text(), "Q1");
    }

    #[test]
    fn test_repair_quotes_bare_scalar_values() {
        let repaired = repair_json(r#"{"level": high}"#);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["level"], "high");
    }

    #[test]
    fn test_repair_keeps_json_literals_bare() {
        let repaired = repair_json(r#"{"flag": true, "missing": null,}"#);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["flag"], true);
        assert_eq!(value["missing"], Value::Null);
    }

    #[test]
    fn test_repair_is_idempotent_on_valid_json() {
        let valid = r#"{"questions":[{"question":"Q, with {braces}?","options":["A","B","C","D"],"correctAnswer":0}],"count":1}"#;
        let repaired = repair_json(valid);
        assert_eq!(repaired, valid);
        let a: Value = serde_json::from_str(valid).unwrap();
        let b: Value = serde_json::from_str(&repair_json(&repaired)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unparseable_after_repair_carries_parser_message() {
        let raw = r#"{"questions": [}]}"#;
        match recover_questions(raw) {
            Err(RecoverError::Unparseable(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected Unparseable, got {:?}", other),
        }
    }

    #[test]
    fn test_braces_inside_strings_do_not_confuse_the_scan() {
        let raw = r#"noise {"questions":["Q with } and { inside"]} trailing"#;
        let questions = recover_questions(raw).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "Q with } and { inside");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let raw = "{\"questions\":[\"He said \\\"guilty\\\" in court\"]}";
        let questions = recover_questions(raw).unwrap();
        assert_eq!(questions[0].text(), "He said \"guilty\" in court");
    }

    #[test]
    fn test_empty_question_text_is_dropped() {
        let raw = r#"{"questions":["  ",{"question":"   "}]}"#;
        assert_eq!(
            recover_questions(raw).unwrap_err(),
            RecoverError::NoValidQuestions
        );
    }

    #[test]
    fn test_retry_predicate_covers_exactly_kinds_two_and_four() {
        assert!(RecoverError::Incomplete.is_retryable());
        assert!(RecoverError::Unparseable("eof".to_string()).is_retryable());
        assert!(RecoverError::NoValidQuestions.is_retryable());
        assert!(!RecoverError::NoJsonFound.is_retryable());
        assert!(!RecoverError::MissingQuestions.is_retryable());
    }
}
