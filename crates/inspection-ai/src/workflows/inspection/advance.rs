//! Decides when the interview moves from the current question to evaluation.
//! Injectable so the phrase heuristic can be replaced (e.g. by an explicit
//! evaluator directive) without touching the state machine.

/// Strategy for deciding whether the current question is finished, given the
/// interviewer's latest reply and how many answers the candidate has given.
pub trait AdvancePredicate: Send + Sync {
    fn should_advance(&self, interviewer_reply: &str, candidate_turns: usize) -> bool;
}

/// Default heuristic: a fixed "moving on" phrase list matched
/// case-insensitively, plus a hard cap on candidate turns so a question can
/// never loop indefinitely. The phrase match is best-effort, not a guarantee;
/// the cap is the backstop.
pub struct PhraseAdvance {
    phrases: Vec<String>,
    max_candidate_turns: usize,
}

impl PhraseAdvance {
    pub const DEFAULT_TURN_CAP: usize = 6;

    pub fn new(phrases: Vec<String>, max_candidate_turns: usize) -> Self {
        Self {
            phrases: phrases
                .into_iter()
                .map(|phrase| phrase.to_lowercase())
                .collect(),
            max_candidate_turns,
        }
    }
}

impl Default for PhraseAdvance {
    fn default() -> Self {
        Self::new(
            vec![
                "let's move on".to_string(),
                "let us move on".to_string(),
                "moving on".to_string(),
                "next question".to_string(),
                "that covers this area".to_string(),
                "thank you, that's helpful".to_string(),
            ],
            Self::DEFAULT_TURN_CAP,
        )
    }
}

impl AdvancePredicate for PhraseAdvance {
    fn should_advance(&self, interviewer_reply: &str, candidate_turns: usize) -> bool {
        if candidate_turns >= self.max_candidate_turns {
            return true;
        }
        let reply = interviewer_reply.to_lowercase();
        self.phrases.iter().any(|phrase| reply.contains(phrase))
    }
}
