//! Asynchronous abstraction for the trial content generator.
//!
//! Runtime users plug in a [`TrialGenerator`] so State tiles can receive freshly
//! written trials in advanced mode. Whatever the generator does internally, the
//! session only ever sees a validated [`TrialCard`] or a [`GenerationError`],
//! and every error falls back to the static deck.
use async_trait::async_trait;
use game_core::{TRIAL_OPTIONS, TrialCard};
use serde::Deserialize;

use super::errors::GenerationError;

/// Fixed instruction sent with every request.
pub const TRIAL_INSTRUCTION: &str = "You are a scholar of Confucian history. Using the story of \
Confucius travelling between the states, and especially the episodes connected to the given \
place, write one multiple-choice question. Include a quotation from the classics (quote), a \
question that invites reflection (question), exactly four options (options), the zero-based \
index of the correct option (answerIndex) and an explanation of why it is correct (analysis). \
Reply with a single JSON object.";

/// One generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialRequest {
    /// Thematic label of the State tile.
    pub label: String,
    pub instruction: &'static str,
}

impl TrialRequest {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            instruction: TRIAL_INSTRUCTION,
        }
    }
}

/// Trait for producing a trial card for a thematic label.
///
/// Implementations can wrap a remote model, a local template engine or a
/// scripted fixture. Card ids and the `generated` flag are assigned by the
/// session, so implementations may leave them at their defaults.
#[async_trait]
pub trait TrialGenerator: Send + Sync {
    async fn generate(&self, request: &TrialRequest) -> Result<TrialCard, GenerationError>;
}

/// A generator that is never available. Useful for testing or as a placeholder.
pub struct OfflineTrialGenerator;

#[async_trait]
impl TrialGenerator for OfflineTrialGenerator {
    async fn generate(&self, _request: &TrialRequest) -> Result<TrialCard, GenerationError> {
        Err(GenerationError::Unavailable("offline".into()))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrialResponse {
    question: String,
    options: Vec<String>,
    answer_index: i64,
    analysis: String,
    quote: String,
}

/// Parses and validates a generator response body.
pub fn parse_trial_response(text: &str) -> Result<TrialCard, GenerationError> {
    let response: TrialResponse = serde_json::from_str(text.trim())
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let count = response.options.len();
    let options: [String; TRIAL_OPTIONS] = response
        .options
        .try_into()
        .map_err(|_| GenerationError::OptionCount(count))?;

    let answer_index = usize::try_from(response.answer_index)
        .ok()
        .filter(|i| *i < TRIAL_OPTIONS)
        .ok_or(GenerationError::AnswerOutOfRange(response.answer_index))?;

    if response.question.trim().is_empty() {
        return Err(GenerationError::EmptyField("question"));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(GenerationError::EmptyField("options"));
    }

    Ok(TrialCard {
        id: 0,
        quote: response.quote,
        question: response.question,
        options,
        answer_index,
        explanation: response.analysis,
        generated: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "id": 17,
        "quote": "Those near are pleased, and those far away come.",
        "question": "What does good government achieve?",
        "options": ["A. Fear", "B. Attraction", "C. Wealth", "D. War"],
        "answerIndex": 1,
        "analysis": "Benevolent rule draws people in."
    }"#;

    #[test]
    fn parses_a_valid_response() {
        let card = parse_trial_response(VALID).unwrap();
        assert_eq!(card.answer_index, 1);
        assert_eq!(card.options[3], "D. War");
        assert_eq!(card.explanation, "Benevolent rule draws people in.");
        assert!(card.generated);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_trial_response("the sages are silent"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        let text = r#"{"question": "q", "options": ["a","b","c","d"], "answerIndex": 0}"#;
        assert!(matches!(
            parse_trial_response(text),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_wrong_option_count_and_index() {
        let three = VALID.replace(r#", "D. War""#, "");
        assert_eq!(parse_trial_response(&three), Err(GenerationError::OptionCount(3)));

        let high = VALID.replace(r#""answerIndex": 1"#, r#""answerIndex": 4"#);
        assert_eq!(parse_trial_response(&high), Err(GenerationError::AnswerOutOfRange(4)));

        let negative = VALID.replace(r#""answerIndex": 1"#, r#""answerIndex": -1"#);
        assert_eq!(
            parse_trial_response(&negative),
            Err(GenerationError::AnswerOutOfRange(-1))
        );
    }

    #[tokio::test]
    async fn offline_generator_always_fails() {
        let result = OfflineTrialGenerator.generate(&TrialRequest::new("Wei")).await;
        assert!(matches!(result, Err(GenerationError::Unavailable(_))));
    }
}
