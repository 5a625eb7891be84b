//! Aggregates per-question evaluations into an overall rating and a readable
//! report, and converts low-scoring findings into remediation actions.

use serde::Serialize;

use super::domain::{ActionPriority, EvaluatedResponse, RatingBand, ScenarioDefinition};
use super::repository::CreateActionInput;

/// Scores below this are findings eligible for remediation actions.
pub const GOOD_SCORE_THRESHOLD: u8 = 3;

/// Aggregate applied when a session somehow completes with no responses.
const EMPTY_SESSION_SCORE: f32 = 3.0;

const ACTION_TITLE_LIMIT: usize = 80;

/// Final report for one completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    pub overall_score: f32,
    pub band: RatingBand,
    pub feedback: String,
    /// Responses scoring below the "Good" threshold.
    pub findings: Vec<EvaluatedResponse>,
}

/// Arithmetic mean of the per-question integer scores. Defaults to 3.0 for
/// zero responses so the aggregate is always in [1.0, 4.0].
pub fn aggregate_score(responses: &[EvaluatedResponse]) -> f32 {
    if responses.is_empty() {
        return EMPTY_SESSION_SCORE;
    }
    let total: u32 = responses.iter().map(|response| response.score as u32).sum();
    total as f32 / responses.len() as f32
}

pub fn build_report(
    scenario: &ScenarioDefinition,
    responses: &[EvaluatedResponse],
) -> InspectionReport {
    let overall_score = aggregate_score(responses);
    let band = RatingBand::from_score(overall_score);

    let mut feedback = format!(
        "Mock inspection '{}' complete: {} question(s) assessed, overall {:.1}/4.0 ({}).\n",
        scenario.title,
        responses.len(),
        overall_score,
        band.label()
    );

    for (index, response) in responses.iter().enumerate() {
        feedback.push_str(&format!(
            "\nQ{}. {} — scored {} ({})\n",
            index + 1,
            response.question_text,
            response.score,
            response.band().label()
        ));
        if !response.evaluation.is_empty() {
            feedback.push_str(&format!("   {}\n", response.evaluation));
        }
        for strength in &response.strengths {
            feedback.push_str(&format!("   + {strength}\n"));
        }
        for improvement in &response.improvements {
            feedback.push_str(&format!("   - {improvement}\n"));
        }
    }

    let findings = responses
        .iter()
        .filter(|response| response.score < GOOD_SCORE_THRESHOLD)
        .cloned()
        .collect();

    InspectionReport {
        overall_score,
        band,
        feedback,
        findings,
    }
}

/// Map each finding (score below "Good") to a remediation action. Priority is
/// high only for Inadequate answers.
pub fn findings_to_actions(responses: &[EvaluatedResponse]) -> Vec<CreateActionInput> {
    responses
        .iter()
        .filter(|response| response.score < GOOD_SCORE_THRESHOLD)
        .map(|response| {
            let mut description = response.evaluation.clone();
            if !response.improvements.is_empty() {
                description.push_str("\nSuggested improvements:\n");
                for improvement in &response.improvements {
                    description.push_str(&format!("- {improvement}\n"));
                }
            }

            CreateActionInput {
                title: format!(
                    "Address gap: {}",
                    truncate(&response.question_text, ACTION_TITLE_LIMIT)
                ),
                description,
                priority: if response.score == 1 {
                    ActionPriority::High
                } else {
                    ActionPriority::Medium
                },
                source_question_id: response.question_id.clone(),
            }
        })
        .collect()
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let prefix: String = text.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", prefix.trim_end())
}
