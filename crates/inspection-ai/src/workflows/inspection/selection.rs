//! Question selection for a scenario: filter the bank by role and key
//! question, shuffle uniformly with an explicit seed, truncate to the
//! difficulty cap. Pure with respect to (catalog, scenario, seed) so tests
//! can pin the exact draw.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::catalog::Catalog;
use super::domain::{InspectionQuestion, ScenarioDefinition};

pub fn matches_scenario(question: &InspectionQuestion, scenario: &ScenarioDefinition) -> bool {
    scenario.key_questions.contains(&question.key_question)
        && scenario.target_role.accepts(question.target_role)
}

pub fn select_questions(
    catalog: &Catalog,
    scenario: &ScenarioDefinition,
    seed: u64,
) -> Vec<&'static InspectionQuestion> {
    let mut pool: Vec<&'static InspectionQuestion> = catalog
        .questions()
        .iter()
        .filter(|question| matches_scenario(question, scenario))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    pool.shuffle(&mut rng);
    pool.truncate(scenario.difficulty.question_cap());
    pool
}
