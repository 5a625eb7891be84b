use serde::{Deserialize, Serialize};

/// The five CQC assessment dimensions every question and quality statement
/// hangs off. Modeled as a closed enum so a typo in the data tables is a
/// compile error rather than a silently unmatched string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyQuestion {
    Safe,
    Effective,
    Caring,
    Responsive,
    WellLed,
}

impl KeyQuestion {
    pub const ALL: [KeyQuestion; 5] = [
        KeyQuestion::Safe,
        KeyQuestion::Effective,
        KeyQuestion::Caring,
        KeyQuestion::Responsive,
        KeyQuestion::WellLed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            KeyQuestion::Safe => "Safe",
            KeyQuestion::Effective => "Effective",
            KeyQuestion::Caring => "Caring",
            KeyQuestion::Responsive => "Responsive",
            KeyQuestion::WellLed => "Well-led",
        }
    }
}

/// Respondent role an interview question or scenario targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRole {
    Manager,
    SeniorCarer,
    CareWorker,
    All,
}

impl TargetRole {
    pub const fn label(self) -> &'static str {
        match self {
            TargetRole::Manager => "Registered Manager",
            TargetRole::SeniorCarer => "Senior Carer",
            TargetRole::CareWorker => "Care Worker",
            TargetRole::All => "All roles",
        }
    }

    /// Role filters match when either side is `All` or both agree.
    pub fn accepts(self, other: TargetRole) -> bool {
        self == TargetRole::All || other == TargetRole::All || self == other
    }
}

/// Scenario difficulty. The question-count cap is a fixed function of the
/// difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Standard,
    Challenging,
    Intensive,
}

impl Difficulty {
    pub const fn question_cap(self) -> usize {
        match self {
            Difficulty::Standard => 4,
            Difficulty::Challenging => 6,
            Difficulty::Intensive => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Standard => "Standard",
            Difficulty::Challenging => "Challenging",
            Difficulty::Intensive => "Intensive",
        }
    }
}

/// One of the 34 normative CQC quality statements. Reference data used for
/// display and citation only; control flow never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityStatement {
    pub id: &'static str,
    pub key_question: KeyQuestion,
    pub title: &'static str,
    pub we_statement: &'static str,
    pub evidence_categories: &'static [&'static str],
}

/// Immutable interview question with its rubric hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InspectionQuestion {
    pub id: &'static str,
    pub key_question: KeyQuestion,
    pub target_role: TargetRole,
    pub text: &'static str,
    pub follow_ups: &'static [&'static str],
    pub good_indicators: &'static [&'static str],
    pub red_flags: &'static [&'static str],
    pub regulations: &'static [&'static str],
    pub quality_statement_id: &'static str,
}

/// Immutable interview scenario preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub duration_minutes: u16,
    pub target_role: TargetRole,
    pub key_questions: &'static [KeyQuestion],
    pub focus_areas: &'static [&'static str],
}

/// Lifecycle of a single interview run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Setup,
    InProgress,
    Evaluating,
    Complete,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::Setup => "setup",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Evaluating => "evaluating",
            SessionStatus::Complete => "complete",
        }
    }
}

/// CQC-style rating band shared by per-question integer scores and the
/// continuous aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Outstanding,
    Good,
    RequiresImprovement,
    Inadequate,
}

impl RatingBand {
    /// Fixed thresholds: >=3.5 Outstanding, >=2.5 Good, >=1.5 Requires
    /// Improvement, below that Inadequate.
    pub fn from_score(score: f32) -> Self {
        if score >= 3.5 {
            RatingBand::Outstanding
        } else if score >= 2.5 {
            RatingBand::Good
        } else if score >= 1.5 {
            RatingBand::RequiresImprovement
        } else {
            RatingBand::Inadequate
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RatingBand::Outstanding => "Outstanding",
            RatingBand::Good => "Good",
            RatingBand::RequiresImprovement => "Requires Improvement",
            RatingBand::Inadequate => "Inadequate",
        }
    }
}

/// Who spoke a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Inspector,
    Candidate,
}

/// One line of the running interview transcript for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn inspector(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Inspector,
            text: text.into(),
        }
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Candidate,
            text: text.into(),
        }
    }
}

/// Outcome of evaluating one answered question. Appended to the session and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedResponse {
    pub question_id: String,
    pub question_text: String,
    pub response_text: String,
    pub evaluation: String,
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl EvaluatedResponse {
    pub fn band(&self) -> RatingBand {
        RatingBand::from_score(self.score as f32)
    }
}

/// Priority of a remediation action derived from the finding's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    High,
    Medium,
}

impl ActionPriority {
    pub const fn label(self) -> &'static str {
        match self {
            ActionPriority::High => "high",
            ActionPriority::Medium => "medium",
        }
    }
}
