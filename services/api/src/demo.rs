use crate::infra::{InMemoryActionPublisher, InMemoryAnalysisRepository};
use async_trait::async_trait;
use clap::Args;
use inspection_ai::error::AppError;
use inspection_ai::workflows::inspection::selection::select_questions;
use inspection_ai::workflows::inspection::{
    Catalog, Evaluator, EvaluatorConfig, KeyQuestion, ReasoningClient, ReasoningError,
    ReasoningRequest, SessionEngine, SessionError, TurnOutcome,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Scenario to run
    #[arg(long, default_value = "care-worker-quick-check")]
    pub(crate) scenario: String,
    /// Seed pinning the question draw so repeat runs match
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Scenario whose question draw to preview
    pub(crate) scenario_id: String,
    /// Seed for the draw
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
}

/// Stands in for the reasoning service so the demo runs without network or
/// credentials. Rubric requests get scripted JSON verdicts with a rotating
/// score; interviewer turns get a closing remark so each question takes one
/// answer; question-wording requests fail fast so the engine falls back to the
/// canonical question text.
struct ScriptedClient {
    scores: &'static [u8],
    verdicts: Mutex<usize>,
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self {
            scores: &[4, 3, 2],
            verdicts: Mutex::new(0),
        }
    }
}

#[async_trait]
impl ReasoningClient for ScriptedClient {
    async fn generate(&self, request: ReasoningRequest<'_>) -> Result<String, ReasoningError> {
        if request.message.contains("Respond with a JSON object") {
            let mut guard = self.verdicts.lock().expect("verdict mutex poisoned");
            let score = self.scores[*guard % self.scores.len()];
            *guard += 1;
            return Ok(scripted_verdict(score));
        }

        if request.message.contains("ask this question in your own words") {
            return Err(ReasoningError::EmptyResponse);
        }

        Ok("Thank you, that's helpful. Let's move on.".to_string())
    }
}

fn scripted_verdict(score: u8) -> String {
    serde_json::json!({
        "score": score,
        "evaluation": "The answer covered the expected safeguards and named who is accountable.",
        "strengths": ["Clear escalation route", "Person-centred framing"],
        "improvements": ["Reference the provider's written policy"],
    })
    .to_string()
}

const CANNED_ANSWERS: &[&str] = &[
    "I would make sure the resident is safe first, then report it straight to the nurse in \
     charge and record it in the incident log before the end of my shift.",
    "We check the care plan together with the resident and their family, and any change goes \
     through the senior on duty so the whole team works from the same record.",
    "I always knock, explain what I'm there to do, and give the person time to answer. If they \
     refuse, I come back later and note it so the team can follow up.",
    "Handover covers every resident, and anything clinical gets escalated to the nurse or the \
     GP the same day. We never sit on a concern overnight.",
];

/// Run one complete interview against the scripted client, printing each turn
/// and the final report.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = Catalog::load()?;
    let client = Arc::new(ScriptedClient::default());
    let evaluator = Evaluator::new(
        client,
        EvaluatorConfig {
            model_chain: vec!["scripted".to_string()],
            attempts_per_model: 1,
            backoff: Duration::ZERO,
        },
    );
    let analyses = Arc::new(InMemoryAnalysisRepository::default());
    let actions = Arc::new(InMemoryActionPublisher::default());
    let mut engine = SessionEngine::new(
        catalog,
        evaluator,
        analyses.clone(),
        actions.clone(),
        "demo-care-home",
    );

    let view = engine.start(&args.scenario, args.seed).await?;
    println!("=== {} ===", view.scenario_title);
    println!(
        "Session {} with {} questions (seed {})\n",
        view.session_id, view.total_questions, args.seed
    );
    if let Some(prompt) = &view.current_prompt {
        println!("Inspector: {prompt}");
    }

    let mut turn = 0usize;
    let report = loop {
        let answer = CANNED_ANSWERS[turn % CANNED_ANSWERS.len()];
        turn += 1;
        println!("Candidate: {answer}\n");

        match engine.submit_answer(answer).await? {
            TurnOutcome::InspectorReply { text } => {
                println!("Inspector: {text}");
            }
            TurnOutcome::QuestionEvaluated {
                evaluation,
                next_question,
            } => {
                println!(
                    "  [scored {}/4 — {}]",
                    evaluation.score,
                    evaluation.band().label()
                );
                println!("Inspector: {next_question}");
            }
            TurnOutcome::SessionComplete { evaluation, report } => {
                println!(
                    "  [scored {}/4 — {}]",
                    evaluation.score,
                    evaluation.band().label()
                );
                break report;
            }
        }
    };

    println!("\n=== Report ===");
    println!(
        "Overall {:.1}/4.0 — {}",
        report.overall_score,
        report.band.label()
    );
    println!("{}", report.feedback);

    let export = engine.export_actions()?;
    println!(
        "\nExported {} remediation action(s) from {} finding(s):",
        export.created, export.findings
    );
    for action in actions.actions() {
        println!("  [{}] {}", action.priority.label(), action.title);
    }

    for record in analyses.records() {
        println!(
            "\nPersisted summary for {}: {}% — {}",
            record.organization_id, record.overall_score, record.summary
        );
    }

    Ok(())
}

pub(crate) fn run_scenario_listing() -> Result<(), AppError> {
    let catalog = Catalog::load()?;
    for scenario in catalog.scenarios() {
        let domains = scenario
            .key_questions
            .iter()
            .map(|kq| kq.label())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<28} {:<12} {:>3} min  {} ({})",
            scenario.id,
            scenario.difficulty.label(),
            scenario.duration_minutes,
            scenario.title,
            scenario.target_role.label(),
        );
        println!("{:<28} domains: {}", "", domains);
    }
    Ok(())
}

pub(crate) fn run_question_listing() -> Result<(), AppError> {
    let catalog = Catalog::load()?;
    for key_question in KeyQuestion::ALL {
        println!("{}:", key_question.label());
        for question in catalog
            .questions()
            .iter()
            .filter(|question| question.key_question == key_question)
        {
            println!(
                "  {:<36} [{}] {}",
                question.id,
                question.target_role.label(),
                question.text
            );
        }
    }
    Ok(())
}

pub(crate) fn run_selection_plan(args: PlanArgs) -> Result<(), AppError> {
    let catalog = Catalog::load()?;
    let scenario = catalog
        .scenario(&args.scenario_id)
        .ok_or_else(|| SessionError::UnknownScenario(args.scenario_id.clone()))
        .map_err(AppError::from)?;

    let questions = select_questions(&catalog, scenario, args.seed);
    println!(
        "{} would draw {} question(s) with seed {}:",
        scenario.title,
        questions.len(),
        args.seed
    );
    for (index, question) in questions.iter().enumerate() {
        println!(
            "  {}. [{}] {}",
            index + 1,
            question.key_question.label(),
            question.text
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_session_runs_to_completion() {
        let args = DemoArgs {
            scenario: "care-worker-quick-check".to_string(),
            seed: 7,
        };
        run_demo(args).await.expect("demo completes");
    }

    #[tokio::test]
    async fn scripted_client_rotates_verdict_scores() {
        let client = ScriptedClient::default();
        let request = |message: &'static str| ReasoningRequest {
            model: "scripted",
            system: "",
            history: &[],
            message,
        };

        let first = client
            .generate(request("Respond with a JSON object please"))
            .await
            .expect("verdict");
        let second = client
            .generate(request("Respond with a JSON object please"))
            .await
            .expect("verdict");
        assert!(first.contains("\"score\":4"));
        assert!(second.contains("\"score\":3"));
    }
}
