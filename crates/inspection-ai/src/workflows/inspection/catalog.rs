//! Static reference data: the 34 CQC quality statements, the interview
//! question bank, and the scenario presets, plus load-time referential checks.

use std::collections::BTreeSet;

use super::domain::{
    Difficulty, InspectionQuestion, KeyQuestion, QualityStatement, ScenarioDefinition, TargetRole,
};

/// Expected quality-statement distribution under the 2023 single assessment
/// framework: Safe 8, Effective 6, Caring 5, Responsive 7, Well-led 8.
const STATEMENT_DISTRIBUTION: [(KeyQuestion, usize); 5] = [
    (KeyQuestion::Safe, 8),
    (KeyQuestion::Effective, 6),
    (KeyQuestion::Caring, 5),
    (KeyQuestion::Responsive, 7),
    (KeyQuestion::WellLed, 8),
];

/// Validation errors raised while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("question {question} cites unknown quality statement {statement}")]
    UnknownStatement { question: String, statement: String },
    #[error("duplicate catalog identifier {0}")]
    DuplicateId(String),
    #[error("expected {expected} quality statements under {domain}, found {found}")]
    StatementCount {
        domain: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("scenario {0} covers no key questions")]
    EmptyScenario(String),
}

/// Validated handle over the static tables.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    scenarios: &'static [ScenarioDefinition],
    questions: &'static [InspectionQuestion],
    statements: &'static [QualityStatement],
}

impl Catalog {
    /// Load the built-in tables, failing fast on referential problems so a
    /// typo in the data never surfaces as a silent filter mismatch later.
    pub fn load() -> Result<Self, CatalogError> {
        let catalog = Self {
            scenarios: SCENARIOS,
            questions: QUESTION_BANK,
            statements: QUALITY_STATEMENTS,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for id in self
            .statements
            .iter()
            .map(|statement| statement.id)
            .chain(self.questions.iter().map(|question| question.id))
            .chain(self.scenarios.iter().map(|scenario| scenario.id))
        {
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateId(id.to_string()));
            }
        }

        for (domain, expected) in STATEMENT_DISTRIBUTION {
            let found = self
                .statements
                .iter()
                .filter(|statement| statement.key_question == domain)
                .count();
            if found != expected {
                return Err(CatalogError::StatementCount {
                    domain: domain.label(),
                    expected,
                    found,
                });
            }
        }

        for question in self.questions {
            if self.statement(question.quality_statement_id).is_none() {
                return Err(CatalogError::UnknownStatement {
                    question: question.id.to_string(),
                    statement: question.quality_statement_id.to_string(),
                });
            }
        }

        for scenario in self.scenarios {
            if scenario.key_questions.is_empty() {
                return Err(CatalogError::EmptyScenario(scenario.id.to_string()));
            }
        }

        Ok(())
    }

    pub fn scenarios(&self) -> &'static [ScenarioDefinition] {
        self.scenarios
    }

    pub fn questions(&self) -> &'static [InspectionQuestion] {
        self.questions
    }

    pub fn statements(&self) -> &'static [QualityStatement] {
        self.statements
    }

    pub fn scenario(&self, id: &str) -> Option<&'static ScenarioDefinition> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }

    pub fn statement(&self, id: &str) -> Option<&'static QualityStatement> {
        self.statements.iter().find(|statement| statement.id == id)
    }
}

const EVIDENCE_STANDARD: &[&str] = &["Processes", "People's experience", "Staff views"];
const EVIDENCE_OBSERVED: &[&str] = &["Observation", "People's experience", "Staff views"];
const EVIDENCE_GOVERNANCE: &[&str] = &["Processes", "Leadership views", "Outcomes"];

static QUALITY_STATEMENTS: &[QualityStatement] = &[
    // Safe
    QualityStatement {
        id: "qs-safe-learning",
        key_question: KeyQuestion::Safe,
        title: "Learning culture",
        we_statement: "We have a proactive and positive culture of safety where concerns and incidents are investigated and lessons are embedded.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-safe-transitions",
        key_question: KeyQuestion::Safe,
        title: "Safe systems, pathways and transitions",
        we_statement: "We work with people and partners to maintain safety through their care journey, including admission, referral and discharge.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-safe-safeguarding",
        key_question: KeyQuestion::Safe,
        title: "Safeguarding",
        we_statement: "We work with people to understand what being safe means to them and act to protect them from abuse and neglect.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-safe-risk",
        key_question: KeyQuestion::Safe,
        title: "Involving people to manage risks",
        we_statement: "We work with people to understand and manage risk in a way that balances their rights to make choices.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-safe-environments",
        key_question: KeyQuestion::Safe,
        title: "Safe environments",
        we_statement: "We detect and control potential risks in the care environment, equipment and premises.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-safe-staffing",
        key_question: KeyQuestion::Safe,
        title: "Safe and effective staffing",
        we_statement: "We make sure there are enough qualified, skilled and experienced people who receive effective support and development.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-safe-infection",
        key_question: KeyQuestion::Safe,
        title: "Infection prevention and control",
        we_statement: "We assess and manage the risk of infection and detect and control the risk of it spreading.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-safe-medicines",
        key_question: KeyQuestion::Safe,
        title: "Medicines optimisation",
        we_statement: "We make sure medicines and treatments are safe and meet people's needs, capacities and preferences.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    // Effective
    QualityStatement {
        id: "qs-effective-needs",
        key_question: KeyQuestion::Effective,
        title: "Assessing needs",
        we_statement: "We maximise the effectiveness of care by assessing and reviewing people's health, care and wellbeing needs with them.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-effective-evidence",
        key_question: KeyQuestion::Effective,
        title: "Delivering evidence-based care and treatment",
        we_statement: "We plan and deliver care in line with legislation, current evidence-based practice and good-quality standards.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-effective-teams",
        key_question: KeyQuestion::Effective,
        title: "How staff, teams and services work together",
        we_statement: "We work effectively across teams and services so people only need to tell their story once.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-effective-healthier",
        key_question: KeyQuestion::Effective,
        title: "Supporting people to live healthier lives",
        we_statement: "We support people to manage their own health and wellbeing and to live as independently as possible.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-effective-outcomes",
        key_question: KeyQuestion::Effective,
        title: "Monitoring and improving outcomes",
        we_statement: "We routinely monitor people's care and treatment to continuously improve it and ensure positive outcomes.",
        evidence_categories: EVIDENCE_GOVERNANCE,
    },
    QualityStatement {
        id: "qs-effective-consent",
        key_question: KeyQuestion::Effective,
        title: "Consent to care and treatment",
        we_statement: "We tell people about their rights around consent and respect these when we deliver care and treatment.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    // Caring
    QualityStatement {
        id: "qs-caring-kindness",
        key_question: KeyQuestion::Caring,
        title: "Kindness, compassion and dignity",
        we_statement: "We always treat people with kindness, empathy and compassion and respect their privacy and dignity.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-caring-individuals",
        key_question: KeyQuestion::Caring,
        title: "Treating people as individuals",
        we_statement: "We treat people as individuals and make sure their care meets their needs and preferences.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-caring-independence",
        key_question: KeyQuestion::Caring,
        title: "Independence, choice and control",
        we_statement: "We promote people's independence so they know their rights and have choice and control over their own care.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-caring-immediate",
        key_question: KeyQuestion::Caring,
        title: "Responding to people's immediate needs",
        we_statement: "We listen to and understand people's needs, views and wishes and respond in the moment.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-caring-workforce",
        key_question: KeyQuestion::Caring,
        title: "Workforce wellbeing and enablement",
        we_statement: "We care about and promote the wellbeing of our staff and support them to deliver person-centred care.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    // Responsive
    QualityStatement {
        id: "qs-responsive-person",
        key_question: KeyQuestion::Responsive,
        title: "Person-centred care",
        we_statement: "We make sure people are at the centre of their care and treatment choices.",
        evidence_categories: EVIDENCE_OBSERVED,
    },
    QualityStatement {
        id: "qs-responsive-continuity",
        key_question: KeyQuestion::Responsive,
        title: "Care provision, integration and continuity",
        we_statement: "We understand the diverse needs of our community and deliver care that is joined-up and consistent.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-responsive-information",
        key_question: KeyQuestion::Responsive,
        title: "Providing information",
        we_statement: "We provide accurate and up-to-date information in formats tailored to individual needs.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-responsive-listening",
        key_question: KeyQuestion::Responsive,
        title: "Listening to and involving people",
        we_statement: "We make it easy for people to share feedback, complaints and compliments, and act on them.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-responsive-access",
        key_question: KeyQuestion::Responsive,
        title: "Equity in access",
        we_statement: "We make sure everyone can access the care, support and treatment they need when they need it.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-responsive-experience",
        key_question: KeyQuestion::Responsive,
        title: "Equity in experiences and outcomes",
        we_statement: "We actively seek out and listen to information about people who are most likely to experience inequality in outcomes.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-responsive-future",
        key_question: KeyQuestion::Responsive,
        title: "Planning for the future",
        we_statement: "We support people to plan for important life changes so they can have enough time to make informed decisions.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    // Well-led
    QualityStatement {
        id: "qs-wellled-direction",
        key_question: KeyQuestion::WellLed,
        title: "Shared direction and culture",
        we_statement: "We have a shared vision, strategy and culture based on transparency, equity and understanding of challenges.",
        evidence_categories: EVIDENCE_GOVERNANCE,
    },
    QualityStatement {
        id: "qs-wellled-leaders",
        key_question: KeyQuestion::WellLed,
        title: "Capable, compassionate and inclusive leaders",
        we_statement: "We have inclusive leaders who understand the context in which we deliver care and embody the culture and values of the workforce.",
        evidence_categories: EVIDENCE_GOVERNANCE,
    },
    QualityStatement {
        id: "qs-wellled-speakup",
        key_question: KeyQuestion::WellLed,
        title: "Freedom to speak up",
        we_statement: "We foster a positive culture where people feel they can speak up and their voice will be heard.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-wellled-equality",
        key_question: KeyQuestion::WellLed,
        title: "Workforce equality, diversity and inclusion",
        we_statement: "We value diversity in our workforce and work towards an inclusive and fair culture.",
        evidence_categories: EVIDENCE_STANDARD,
    },
    QualityStatement {
        id: "qs-wellled-governance",
        key_question: KeyQuestion::WellLed,
        title: "Governance, management and sustainability",
        we_statement: "We have clear responsibilities, roles, systems of accountability and good governance to manage and deliver good-quality care.",
        evidence_categories: EVIDENCE_GOVERNANCE,
    },
    QualityStatement {
        id: "qs-wellled-partnerships",
        key_question: KeyQuestion::WellLed,
        title: "Partnerships and communities",
        we_statement: "We understand our duty to collaborate and work in partnership so services work seamlessly for people.",
        evidence_categories: EVIDENCE_GOVERNANCE,
    },
    QualityStatement {
        id: "qs-wellled-improvement",
        key_question: KeyQuestion::WellLed,
        title: "Learning, improvement and innovation",
        we_statement: "We focus on continuous learning, innovation and improvement across our organisation.",
        evidence_categories: EVIDENCE_GOVERNANCE,
    },
    QualityStatement {
        id: "qs-wellled-sustainability",
        key_question: KeyQuestion::WellLed,
        title: "Environmental sustainability",
        we_statement: "We understand any negative impact of our activities on the environment and strive to make a positive contribution.",
        evidence_categories: EVIDENCE_GOVERNANCE,
    },
];

static QUESTION_BANK: &[InspectionQuestion] = &[
    QuestionBankEntries::SAFEGUARDING_CONCERN,
    QuestionBankEntries::MEDICATION_ERROR,
    QuestionBankEntries::FALLS_RISK,
    QuestionBankEntries::INFECTION_OUTBREAK,
    QuestionBankEntries::STAFFING_SHORTFALL,
    QuestionBankEntries::INCIDENT_LEARNING,
    QuestionBankEntries::CARE_PLAN_REVIEW,
    QuestionBankEntries::CONSENT_CAPACITY,
    QuestionBankEntries::NUTRITION_HYDRATION,
    QuestionBankEntries::WORKING_WITH_GP,
    QuestionBankEntries::DIGNITY_PERSONAL_CARE,
    QuestionBankEntries::RESIDENT_PREFERENCES,
    QuestionBankEntries::PROMOTING_INDEPENDENCE,
    QuestionBankEntries::DISTRESS_RESPONSE,
    QuestionBankEntries::COMPLAINTS_HANDLING,
    QuestionBankEntries::END_OF_LIFE_WISHES,
    QuestionBankEntries::ACTIVITY_PLANNING,
    QuestionBankEntries::ACCESSIBLE_INFORMATION,
    QuestionBankEntries::QUALITY_ASSURANCE,
    QuestionBankEntries::SPEAK_UP_CULTURE,
    QuestionBankEntries::SUPERVISION_TRAINING,
    QuestionBankEntries::IMPROVEMENT_PLAN,
];

/// Namespace for the question constants so the bank above reads as a table.
struct QuestionBankEntries;

impl QuestionBankEntries {
    const SAFEGUARDING_CONCERN: InspectionQuestion = InspectionQuestion {
        id: "q-safe-safeguarding-concern",
        key_question: KeyQuestion::Safe,
        target_role: TargetRole::All,
        text: "If you suspected a resident was being abused or neglected, what would you do?",
        follow_ups: &[
            "Who would you report your concern to outside the home if you felt it was not being taken seriously?",
            "How would you record what you had seen?",
        ],
        good_indicators: &[
            "names the safeguarding lead and local authority referral route",
            "mentions preserving evidence and accurate contemporaneous records",
            "understands whistleblowing protections",
        ],
        red_flags: &[
            "would wait for permission before acting",
            "unaware of external reporting routes",
        ],
        regulations: &["Regulation 13: Safeguarding service users from abuse"],
        quality_statement_id: "qs-safe-safeguarding",
    };

    const MEDICATION_ERROR: InspectionQuestion = InspectionQuestion {
        id: "q-safe-medication-error",
        key_question: KeyQuestion::Safe,
        target_role: TargetRole::SeniorCarer,
        text: "Talk me through what you would do if you discovered a medication error during your shift.",
        follow_ups: &[
            "When would you involve the GP or pharmacist?",
            "How is the error reviewed afterwards so it does not recur?",
        ],
        good_indicators: &[
            "immediate welfare check on the resident",
            "escalation to the nurse in charge or manager and the prescriber",
            "incident report and open disclosure to the family",
        ],
        red_flags: &[
            "would correct the MAR chart without reporting",
            "no mention of monitoring the resident",
        ],
        regulations: &["Regulation 12: Safe care and treatment"],
        quality_statement_id: "qs-safe-medicines",
    };

    const FALLS_RISK: InspectionQuestion = InspectionQuestion {
        id: "q-safe-falls-risk",
        key_question: KeyQuestion::Safe,
        target_role: TargetRole::CareWorker,
        text: "A resident with a history of falls insists on walking to the dining room unaided. How do you balance their safety and their independence?",
        follow_ups: &[
            "What would you check in their care plan before supporting them?",
            "Who would you tell if you noticed their mobility had changed?",
        ],
        good_indicators: &[
            "refers to the falls risk assessment and positive risk-taking",
            "respects the resident's choice while reducing hazards",
            "reports changes for reassessment",
        ],
        red_flags: &[
            "would restrict the resident's movement outright",
            "treats the care plan as irrelevant to daily practice",
        ],
        regulations: &["Regulation 12: Safe care and treatment"],
        quality_statement_id: "qs-safe-risk",
    };

    const INFECTION_OUTBREAK: InspectionQuestion = InspectionQuestion {
        id: "q-safe-infection-outbreak",
        key_question: KeyQuestion::Safe,
        target_role: TargetRole::All,
        text: "Several residents have developed diarrhoea and vomiting overnight. What are your first actions?",
        follow_ups: &[
            "When would you notify the UK Health Security Agency?",
            "How do you protect residents who are not yet symptomatic?",
        ],
        good_indicators: &[
            "isolation or cohorting of affected residents",
            "enhanced cleaning and PPE use",
            "prompt notification of the manager and external agencies",
        ],
        red_flags: &[
            "would carry on with communal activities",
            "no awareness of outbreak reporting duties",
        ],
        regulations: &["Regulation 12: Safe care and treatment"],
        quality_statement_id: "qs-safe-infection",
    };

    const STAFFING_SHORTFALL: InspectionQuestion = InspectionQuestion {
        id: "q-safe-staffing-shortfall",
        key_question: KeyQuestion::Safe,
        target_role: TargetRole::Manager,
        text: "How do you decide safe staffing levels, and what happens when you are short on a shift?",
        follow_ups: &[
            "How does your dependency tool feed into the rota?",
            "What is your escalation route when agency cover cannot be found?",
        ],
        good_indicators: &[
            "uses a dependency or acuity tool reviewed regularly",
            "has a clear contingency and escalation plan",
            "monitors the impact of shortfalls on care delivery",
        ],
        red_flags: &[
            "staffing set purely by budget",
            "no record of shifts that ran short",
        ],
        regulations: &["Regulation 18: Staffing"],
        quality_statement_id: "qs-safe-staffing",
    };

    const INCIDENT_LEARNING: InspectionQuestion = InspectionQuestion {
        id: "q-safe-incident-learning",
        key_question: KeyQuestion::Safe,
        target_role: TargetRole::Manager,
        text: "Tell me about a recent incident in the home and how learning from it was shared with the team.",
        follow_ups: &[
            "How do you check the learning actually changed practice?",
            "How are residents and families involved after an incident?",
        ],
        good_indicators: &[
            "describes a no-blame investigation",
            "learning cascaded through handovers, supervision or team meetings",
            "duty of candour honoured with families",
        ],
        red_flags: &[
            "incidents closed without analysis",
            "learning held only by the manager",
        ],
        regulations: &[
            "Regulation 17: Good governance",
            "Regulation 20: Duty of candour",
        ],
        quality_statement_id: "qs-safe-learning",
    };

    const CARE_PLAN_REVIEW: InspectionQuestion = InspectionQuestion {
        id: "q-effective-care-plan-review",
        key_question: KeyQuestion::Effective,
        target_role: TargetRole::SeniorCarer,
        text: "How do you make sure a resident's care plan still reflects their needs?",
        follow_ups: &[
            "What triggers a review outside the routine cycle?",
            "How are the resident and their family involved in the review?",
        ],
        good_indicators: &[
            "monthly reviews plus event-driven reassessment",
            "involves the resident, family and other professionals",
            "changes communicated at handover",
        ],
        red_flags: &[
            "reviews are a paperwork exercise",
            "care staff unaware of recent changes",
        ],
        regulations: &["Regulation 9: Person-centred care"],
        quality_statement_id: "qs-effective-needs",
    };

    const CONSENT_CAPACITY: InspectionQuestion = InspectionQuestion {
        id: "q-effective-consent-capacity",
        key_question: KeyQuestion::Effective,
        target_role: TargetRole::All,
        text: "A resident with dementia refuses their medication this morning. What do you do?",
        follow_ups: &[
            "How does the Mental Capacity Act apply here?",
            "When would a best-interests decision be needed?",
        ],
        good_indicators: &[
            "assumes capacity and tries again later with explanation",
            "knows capacity is decision- and time-specific",
            "records refusal and escalates appropriately",
        ],
        red_flags: &[
            "would hide medication in food without authorisation",
            "treats a dementia diagnosis as absence of capacity",
        ],
        regulations: &["Regulation 11: Need for consent"],
        quality_statement_id: "qs-effective-consent",
    };

    const NUTRITION_HYDRATION: InspectionQuestion = InspectionQuestion {
        id: "q-effective-nutrition",
        key_question: KeyQuestion::Effective,
        target_role: TargetRole::CareWorker,
        text: "How do you support a resident who is losing weight and eating poorly?",
        follow_ups: &[
            "What monitoring would you expect to be in place?",
            "Which other professionals might be involved?",
        ],
        good_indicators: &[
            "food and fluid charts with meaningful review",
            "fortified diet, preferences and mealtime support",
            "referral to GP, dietitian or SALT",
        ],
        red_flags: &[
            "weight loss noticed only at weigh-ins",
            "no escalation pathway described",
        ],
        regulations: &["Regulation 14: Meeting nutritional and hydration needs"],
        quality_statement_id: "qs-effective-healthier",
    };

    const WORKING_WITH_GP: InspectionQuestion = InspectionQuestion {
        id: "q-effective-working-with-gp",
        key_question: KeyQuestion::Effective,
        target_role: TargetRole::Manager,
        text: "How does the home work with GPs and community services so residents get joined-up care?",
        follow_ups: &[
            "What happens when a resident moves between hospital and the home?",
            "How do you avoid residents repeating their story to every professional?",
        ],
        good_indicators: &[
            "regular GP rounds and shared care records",
            "structured hospital transfer documentation",
            "named coordination responsibilities",
        ],
        red_flags: &[
            "contact with services only in a crisis",
            "transfer information routinely missing",
        ],
        regulations: &["Regulation 12: Safe care and treatment"],
        quality_statement_id: "qs-effective-teams",
    };

    const DIGNITY_PERSONAL_CARE: InspectionQuestion = InspectionQuestion {
        id: "q-caring-dignity-personal-care",
        key_question: KeyQuestion::Caring,
        target_role: TargetRole::CareWorker,
        text: "How do you protect a resident's dignity when providing personal care?",
        follow_ups: &[
            "What would you do if a colleague was rushing personal care?",
            "How do you support a resident who is embarrassed to accept help?",
        ],
        good_indicators: &[
            "explains and seeks agreement before each step",
            "covers, screens and closes doors as a matter of course",
            "challenges poor practice in colleagues",
        ],
        red_flags: &[
            "talks over residents during care",
            "task-first descriptions with no mention of the person",
        ],
        regulations: &["Regulation 10: Dignity and respect"],
        quality_statement_id: "qs-caring-kindness",
    };

    const RESIDENT_PREFERENCES: InspectionQuestion = InspectionQuestion {
        id: "q-caring-resident-preferences",
        key_question: KeyQuestion::Caring,
        target_role: TargetRole::All,
        text: "Tell me about a resident you support. How do their preferences shape their daily routine?",
        follow_ups: &[
            "How did you learn what matters to them?",
            "What happens when their preferences conflict with the home's routine?",
        ],
        good_indicators: &[
            "speaks about the person, not the tasks",
            "knows life history and uses it in care",
            "routine bends to the person rather than the rota",
        ],
        red_flags: &[
            "cannot describe any individual preferences",
            "everyone gets up and eats at the same fixed times",
        ],
        regulations: &["Regulation 9: Person-centred care"],
        quality_statement_id: "qs-caring-individuals",
    };

    const PROMOTING_INDEPENDENCE: InspectionQuestion = InspectionQuestion {
        id: "q-caring-promoting-independence",
        key_question: KeyQuestion::Caring,
        target_role: TargetRole::CareWorker,
        text: "Give me an example of how you have helped a resident do more for themselves.",
        follow_ups: &[
            "How do you resist the temptation to do things for people when you are busy?",
        ],
        good_indicators: &[
            "concrete example of re-enablement",
            "understands doing-with rather than doing-for",
        ],
        red_flags: &[
            "equates good care with doing everything for residents",
        ],
        regulations: &["Regulation 9: Person-centred care"],
        quality_statement_id: "qs-caring-independence",
    };

    const DISTRESS_RESPONSE: InspectionQuestion = InspectionQuestion {
        id: "q-caring-distress-response",
        key_question: KeyQuestion::Caring,
        target_role: TargetRole::All,
        text: "A resident is tearful and asking for a relative who died years ago. How do you respond?",
        follow_ups: &[
            "What approaches work less well in that moment?",
            "How would you share what helped with the rest of the team?",
        ],
        good_indicators: &[
            "responds to the emotion rather than correcting the facts",
            "uses comfort, distraction and known soothers from the care plan",
            "records what worked for consistency",
        ],
        red_flags: &[
            "would bluntly re-tell the resident their relative is dead",
            "treats distress as a behaviour to be managed away",
        ],
        regulations: &["Regulation 10: Dignity and respect"],
        quality_statement_id: "qs-caring-immediate",
    };

    const COMPLAINTS_HANDLING: InspectionQuestion = InspectionQuestion {
        id: "q-responsive-complaints",
        key_question: KeyQuestion::Responsive,
        target_role: TargetRole::Manager,
        text: "Walk me through how a complaint from a relative travels through the home, from receipt to learning.",
        follow_ups: &[
            "How do you make sure people feel safe to complain?",
            "Show me how a complaint changed something in the last year.",
        ],
        good_indicators: &[
            "acknowledgement timescales and an investigation owner",
            "outcomes fed back to the complainant",
            "themes reviewed at governance meetings",
        ],
        red_flags: &[
            "complaints logged but never analysed",
            "defensive framing of complainants",
        ],
        regulations: &["Regulation 16: Receiving and acting on complaints"],
        quality_statement_id: "qs-responsive-listening",
    };

    const END_OF_LIFE_WISHES: InspectionQuestion = InspectionQuestion {
        id: "q-responsive-end-of-life",
        key_question: KeyQuestion::Responsive,
        target_role: TargetRole::SeniorCarer,
        text: "How do you make sure a resident's end-of-life wishes are known and followed?",
        follow_ups: &[
            "Where would staff find a resident's advance care plan at 3am?",
            "How do you support families during this time?",
        ],
        good_indicators: &[
            "advance care planning conversations held early and revisited",
            "ReSPECT or equivalent documentation accessible to all staff",
            "anticipatory medicines and palliative support in place",
        ],
        red_flags: &[
            "end-of-life planning left until a crisis",
            "wishes recorded but unknown to night staff",
        ],
        regulations: &["Regulation 9: Person-centred care"],
        quality_statement_id: "qs-responsive-future",
    };

    const ACTIVITY_PLANNING: InspectionQuestion = InspectionQuestion {
        id: "q-responsive-activity-planning",
        key_question: KeyQuestion::Responsive,
        target_role: TargetRole::All,
        text: "How are activities in the home shaped around what residents actually want to do?",
        follow_ups: &[
            "What about residents who are cared for in bed?",
            "How do you know the programme is working?",
        ],
        good_indicators: &[
            "activities built from individual interests and histories",
            "one-to-one time for people who cannot join groups",
            "feedback loops with residents and families",
        ],
        red_flags: &[
            "a fixed bingo-and-singalong rota for everyone",
            "bed-bound residents left out entirely",
        ],
        regulations: &["Regulation 9: Person-centred care"],
        quality_statement_id: "qs-responsive-person",
    };

    const ACCESSIBLE_INFORMATION: InspectionQuestion = InspectionQuestion {
        id: "q-responsive-accessible-information",
        key_question: KeyQuestion::Responsive,
        target_role: TargetRole::Manager,
        text: "How does the home meet the Accessible Information Standard for residents with communication needs?",
        follow_ups: &[
            "Give me an example of information you have adapted for a resident.",
        ],
        good_indicators: &[
            "communication needs identified and recorded on admission",
            "easy-read, large print or translated materials in use",
        ],
        red_flags: &[
            "unaware of the standard",
            "one-size-fits-all resident documentation",
        ],
        regulations: &["Regulation 9: Person-centred care"],
        quality_statement_id: "qs-responsive-information",
    };

    const QUALITY_ASSURANCE: InspectionQuestion = InspectionQuestion {
        id: "q-wellled-quality-assurance",
        key_question: KeyQuestion::WellLed,
        target_role: TargetRole::Manager,
        text: "Describe your quality assurance cycle. How do audits turn into improvements residents can feel?",
        follow_ups: &[
            "Which audit most recently changed practice, and how?",
            "How does the provider oversee your service?",
        ],
        good_indicators: &[
            "audit calendar with clear ownership and follow-through",
            "action plans tracked to completion",
            "provider-level oversight visits with feedback",
        ],
        red_flags: &[
            "audits filed without actions",
            "cannot name a recent improvement",
        ],
        regulations: &["Regulation 17: Good governance"],
        quality_statement_id: "qs-wellled-governance",
    };

    const SPEAK_UP_CULTURE: InspectionQuestion = InspectionQuestion {
        id: "q-wellled-speak-up",
        key_question: KeyQuestion::WellLed,
        target_role: TargetRole::All,
        text: "If you were worried about how the home was being run, would you feel able to say so? What would you do?",
        follow_ups: &[
            "Has anyone raised a concern recently, and what happened?",
        ],
        good_indicators: &[
            "names internal and external routes including CQC",
            "gives an example of a concern being acted on",
        ],
        red_flags: &[
            "fear of reprisals",
            "believes concerns go nowhere",
        ],
        regulations: &["Regulation 17: Good governance"],
        quality_statement_id: "qs-wellled-speakup",
    };

    const SUPERVISION_TRAINING: InspectionQuestion = InspectionQuestion {
        id: "q-wellled-supervision",
        key_question: KeyQuestion::WellLed,
        target_role: TargetRole::SeniorCarer,
        text: "How are you supported to develop in your role? Tell me about supervision and training.",
        follow_ups: &[
            "When was your last supervision, and was it useful?",
            "How do you support the staff you oversee?",
        ],
        good_indicators: &[
            "regular two-way supervision with actions",
            "training matched to the needs of residents",
            "cascades learning to junior colleagues",
        ],
        red_flags: &[
            "supervision is a tick-box or has lapsed",
            "mandatory training significantly out of date",
        ],
        regulations: &["Regulation 18: Staffing"],
        quality_statement_id: "qs-wellled-leaders",
    };

    const IMPROVEMENT_PLAN: InspectionQuestion = InspectionQuestion {
        id: "q-wellled-improvement-plan",
        key_question: KeyQuestion::WellLed,
        target_role: TargetRole::Manager,
        text: "What are the top three things you are currently improving in the home, and how will you know you have succeeded?",
        follow_ups: &[
            "Where did those priorities come from?",
            "Who outside the management team knows about the plan?",
        ],
        good_indicators: &[
            "priorities drawn from audits, feedback and incidents",
            "measurable success criteria",
            "staff and residents aware of and involved in the plan",
        ],
        red_flags: &[
            "no current improvement priorities",
            "plan exists only on paper",
        ],
        regulations: &["Regulation 17: Good governance"],
        quality_statement_id: "qs-wellled-improvement",
    };
}

static SCENARIOS: &[ScenarioDefinition] = &[
    ScenarioDefinition {
        id: "care-worker-quick-check",
        title: "Care Worker Quick Check",
        description: "A short spot-check interview covering the safety and caring fundamentals every care worker should handle confidently.",
        difficulty: Difficulty::Standard,
        duration_minutes: 15,
        target_role: TargetRole::CareWorker,
        key_questions: &[KeyQuestion::Safe, KeyQuestion::Caring],
        focus_areas: &["Safeguarding basics", "Dignity in personal care", "Risk and independence"],
    },
    ScenarioDefinition {
        id: "senior-carer-clinical",
        title: "Senior Carer Clinical Focus",
        description: "Medication, care planning and end-of-life practice for shift leaders.",
        difficulty: Difficulty::Standard,
        duration_minutes: 20,
        target_role: TargetRole::SeniorCarer,
        key_questions: &[KeyQuestion::Safe, KeyQuestion::Effective, KeyQuestion::Responsive],
        focus_areas: &["Medicines management", "Care plan reviews", "Advance care planning"],
    },
    ScenarioDefinition {
        id: "manager-governance",
        title: "Manager Governance Deep Dive",
        description: "A challenging interview probing governance, staffing and the learning culture expected of a registered manager.",
        difficulty: Difficulty::Challenging,
        duration_minutes: 40,
        target_role: TargetRole::Manager,
        key_questions: &[KeyQuestion::Safe, KeyQuestion::Effective, KeyQuestion::WellLed],
        focus_areas: &["Quality assurance", "Safe staffing", "Incident learning", "Provider oversight"],
    },
    ScenarioDefinition {
        id: "responsive-care-review",
        title: "Responsive Care Review",
        description: "How well the home listens, adapts and plans around the people it supports.",
        difficulty: Difficulty::Challenging,
        duration_minutes: 30,
        target_role: TargetRole::All,
        key_questions: &[KeyQuestion::Responsive, KeyQuestion::Caring, KeyQuestion::Effective],
        focus_areas: &["Complaints and feedback", "Person-centred routines", "Accessible information"],
    },
    ScenarioDefinition {
        id: "full-mock-inspection",
        title: "Full Mock Inspection",
        description: "An intensive rehearsal across all five key questions, mirroring the breadth of a real CQC site visit.",
        difficulty: Difficulty::Intensive,
        duration_minutes: 90,
        target_role: TargetRole::All,
        key_questions: &[
            KeyQuestion::Safe,
            KeyQuestion::Effective,
            KeyQuestion::Caring,
            KeyQuestion::Responsive,
            KeyQuestion::WellLed,
        ],
        focus_areas: &["Whole-home readiness", "All key questions", "Cross-role consistency"],
    },
];
