//! Scores a completed per-question transcript against the question's rubric
//! via the reasoning service. Malformed replies never fail a session: the
//! parser falls open to a "Good" default so one garbled LLM response cannot
//! tank an interview. Retryable client errors walk a bounded fallback chain
//! of model identifiers with exponential backoff.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::config::AiConfig;

use super::client::{ReasoningClient, ReasoningError, ReasoningRequest};
use super::domain::{EvaluatedResponse, InspectionQuestion, Speaker, TranscriptEntry};

/// Score used whenever the evaluator cannot produce a validated one.
pub const DEFAULT_SCORE: u8 = 3;

const EVALUATOR_SYSTEM: &str = "You are a CQC compliance assessor reviewing a mock inspection \
interview at a UK care home. You score answers strictly against the rubric you are given and \
reply with JSON only.";

/// Explicit evaluator settings, injected at construction. No module-level
/// model lists or proxy flags.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub model_chain: Vec<String>,
    pub attempts_per_model: u32,
    pub backoff: Duration,
}

impl EvaluatorConfig {
    pub fn from_ai(config: &AiConfig) -> Self {
        Self {
            model_chain: config.model_chain.clone(),
            attempts_per_model: config.attempts_per_model.max(1),
            backoff: config.retry_backoff,
        }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::from_ai(&AiConfig::default())
    }
}

pub struct Evaluator<C> {
    client: Arc<C>,
    config: EvaluatorConfig,
}

impl<C: ReasoningClient> Evaluator<C> {
    pub fn new(client: Arc<C>, config: EvaluatorConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> Arc<C> {
        Arc::clone(&self.client)
    }

    /// Evaluate one answered question. Returns an error only when every model
    /// in the chain is exhausted; the caller decides how to degrade.
    pub async fn evaluate(
        &self,
        question: &InspectionQuestion,
        transcript: &[TranscriptEntry],
    ) -> Result<EvaluatedResponse, ReasoningError> {
        let prompt = rubric_prompt(question, transcript);
        let raw = self.generate(EVALUATOR_SYSTEM, &[], &prompt).await?;
        Ok(parse_evaluation(question, &candidate_text(transcript), &raw))
    }

    /// Send one generation request, falling back across the model chain with
    /// exponential backoff on retryable errors. Shared with the session
    /// controller for interviewer turns.
    pub async fn generate(
        &self,
        system: &str,
        history: &[TranscriptEntry],
        message: &str,
    ) -> Result<String, ReasoningError> {
        let mut backoff = self.config.backoff;
        let mut last_error = ReasoningError::EmptyResponse;

        let last_model = self.config.model_chain.len().saturating_sub(1);
        for (model_index, model) in self.config.model_chain.iter().enumerate() {
            for attempt in 1..=self.config.attempts_per_model {
                match self
                    .client
                    .generate(ReasoningRequest {
                        model,
                        system,
                        history,
                        message,
                    })
                    .await
                {
                    Ok(text) => return Ok(text),
                    Err(err) if err.is_retryable() => {
                        warn!(%model, attempt, error = %err, "reasoning request failed, retrying");
                        last_error = err;
                        // Backoff only applies between attempts.
                        if model_index < last_model || attempt < self.config.attempts_per_model {
                            tokio::time::sleep(backoff).await;
                            backoff = backoff.saturating_mul(2);
                        }
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Err(last_error)
    }
}

/// Build the default EvaluatedResponse applied when the evaluator chain is
/// exhausted entirely (distinct from the parse fallback, which still carries
/// the raw model text).
pub fn default_response(
    question: &InspectionQuestion,
    transcript: &[TranscriptEntry],
) -> EvaluatedResponse {
    EvaluatedResponse {
        question_id: question.id.to_string(),
        question_text: question.text.to_string(),
        response_text: candidate_text(transcript),
        evaluation: "Automatic scoring was unavailable for this answer; a provisional 'Good' was \
                     recorded."
            .to_string(),
        score: DEFAULT_SCORE,
        strengths: Vec::new(),
        improvements: Vec::new(),
    }
}

fn candidate_text(transcript: &[TranscriptEntry]) -> String {
    transcript
        .iter()
        .filter(|entry| entry.speaker == Speaker::Candidate)
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn rubric_prompt(question: &InspectionQuestion, transcript: &[TranscriptEntry]) -> String {
    let mut prompt = String::new();
    prompt.push_str("Question asked:\n");
    prompt.push_str(question.text);
    prompt.push_str("\n\nIndicators of a good answer:\n");
    for indicator in question.good_indicators {
        prompt.push_str("- ");
        prompt.push_str(indicator);
        prompt.push('\n');
    }
    prompt.push_str("\nRed flags:\n");
    for flag in question.red_flags {
        prompt.push_str("- ");
        prompt.push_str(flag);
        prompt.push('\n');
    }
    prompt.push_str("\nCandidate's answers across the conversation:\n");
    prompt.push_str(&candidate_text(transcript));
    prompt.push_str(
        "\n\nRespond with a JSON object with exactly these keys: \
         \"score\" (integer 1-4 where 4 is Outstanding and 1 is Inadequate), \
         \"evaluation\" (two or three sentences of justification), \
         \"strengths\" (array of strings), \
         \"improvements\" (array of strings). No other text.",
    );
    prompt
}

#[derive(Deserialize)]
struct RawEvaluation {
    score: Option<serde_json::Value>,
    #[serde(default)]
    evaluation: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
}

/// Parse the model's reply into a well-formed EvaluatedResponse. Non-JSON
/// replies and out-of-range scores degrade to the default score rather than
/// erroring.
fn parse_evaluation(
    question: &InspectionQuestion,
    response_text: &str,
    raw: &str,
) -> EvaluatedResponse {
    let stripped = strip_code_fences(raw);

    let (evaluation, score, strengths, improvements) =
        match serde_json::from_str::<RawEvaluation>(stripped) {
            Ok(parsed) => (
                parsed.evaluation,
                clamp_score(parsed.score.as_ref()),
                parsed.strengths,
                parsed.improvements,
            ),
            Err(_) => (raw.to_string(), DEFAULT_SCORE, Vec::new(), Vec::new()),
        };

    EvaluatedResponse {
        question_id: question.id.to_string(),
        question_text: question.text.to_string(),
        response_text: response_text.to_string(),
        evaluation,
        score,
        strengths,
        improvements,
    }
}

/// Accept integers 1-4 (including "3" as a string or 3.0 as a float); anything
/// else becomes the default score.
fn clamp_score(value: Option<&serde_json::Value>) -> u8 {
    let numeric = match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match numeric.map(f64::round) {
        Some(score) if (1.0..=4.0).contains(&score) => score as u8,
        _ => DEFAULT_SCORE,
    }
}

/// Strip a Markdown code fence (with optional language tag) wrapping the
/// reply, a common LLM habit even when asked for bare JSON.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::inspection::catalog::Catalog;

    fn question() -> &'static InspectionQuestion {
        let catalog = Catalog::load().expect("catalog loads");
        &catalog.questions()[0]
    }

    fn transcript() -> Vec<TranscriptEntry> {
        vec![
            TranscriptEntry::inspector("Tell me about safeguarding."),
            TranscriptEntry::candidate("I would report to my manager immediately."),
        ]
    }

    #[test]
    fn parses_well_formed_json() {
        let raw = r#"{"score": 4, "evaluation": "Strong answer.", "strengths": ["clear escalation"], "improvements": []}"#;
        let parsed = parse_evaluation(question(), "answer", raw);
        assert_eq!(parsed.score, 4);
        assert_eq!(parsed.evaluation, "Strong answer.");
        assert_eq!(parsed.strengths, vec!["clear escalation".to_string()]);
        assert!(parsed.improvements.is_empty());
    }

    #[test]
    fn strips_markdown_fences_before_parsing() {
        let raw = "```json\n{\"score\": 2, \"evaluation\": \"Gaps.\", \"strengths\": [], \"improvements\": [\"name the referral route\"]}\n```";
        let parsed = parse_evaluation(question(), "answer", raw);
        assert_eq!(parsed.score, 2);
        assert_eq!(parsed.improvements.len(), 1);
    }

    #[test]
    fn malformed_reply_falls_open_to_default() {
        let raw = "Sorry, I cannot comply";
        let parsed = parse_evaluation(question(), "answer", raw);
        assert_eq!(parsed.score, DEFAULT_SCORE);
        assert_eq!(parsed.evaluation, raw);
        assert!(parsed.strengths.is_empty());
        assert!(parsed.improvements.is_empty());
    }

    #[test]
    fn out_of_range_scores_default() {
        for raw_score in ["0", "5", "-2", "\"outstanding\"", "null"] {
            let raw = format!(
                r#"{{"score": {raw_score}, "evaluation": "x", "strengths": [], "improvements": []}}"#
            );
            let parsed = parse_evaluation(question(), "answer", &raw);
            assert_eq!(parsed.score, DEFAULT_SCORE, "score literal {raw_score}");
        }
    }

    #[test]
    fn numeric_strings_and_floats_coerce() {
        for (raw_score, expected) in [("\"2\"", 2), ("3.0", 3), ("3.6", 4)] {
            let raw = format!(
                r#"{{"score": {raw_score}, "evaluation": "x", "strengths": [], "improvements": []}}"#
            );
            let parsed = parse_evaluation(question(), "answer", &raw);
            assert_eq!(parsed.score, expected, "score literal {raw_score}");
        }
    }

    #[test]
    fn default_response_concatenates_candidate_turns() {
        let response = default_response(question(), &transcript());
        assert_eq!(response.score, DEFAULT_SCORE);
        assert_eq!(
            response.response_text,
            "I would report to my manager immediately."
        );
    }
}
