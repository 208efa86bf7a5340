use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::Utc;
use hiring_guru::assessments::{
    Assessment, AssessmentKind, AssessmentRepository, DifficultyLevel, RoundTemplate, RoundType,
};
use hiring_guru::ids::{AssessmentId, RoundTemplateId};
use hiring_guru::memory::{
    InMemoryAnalyses, InMemoryAssessments, InMemoryProcesses, InMemoryQuestions,
    InMemorySessions, InMemorySubmissions, InMemoryUsers,
};
use hiring_guru::repository::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every in-memory store the service runs on.
#[derive(Default, Clone)]
pub(crate) struct Stores {
    pub(crate) assessments: Arc<InMemoryAssessments>,
    pub(crate) processes: Arc<InMemoryProcesses>,
    pub(crate) questions: Arc<InMemoryQuestions>,
    pub(crate) submissions: Arc<InMemorySubmissions>,
    pub(crate) users: Arc<InMemoryUsers>,
    pub(crate) sessions: Arc<InMemorySessions>,
    pub(crate) analyses: Arc<InMemoryAnalyses>,
}

impl Stores {
    /// Empty stores with the predefined catalogue loaded.
    pub(crate) fn seeded() -> Result<Self, RepositoryError> {
        let stores = Self::default();
        for assessment in predefined_catalogue() {
            stores.assessments.insert(assessment)?;
        }
        Ok(stores)
    }
}

struct SeedRound {
    round_type: RoundType,
    name: &'static str,
    duration: u32,
    config: Value,
}

fn seed(
    name: &str,
    description: &str,
    difficulty: DifficultyLevel,
    rounds: Vec<SeedRound>,
) -> Assessment {
    let now = Utc::now();
    let rounds: Vec<RoundTemplate> = rounds
        .into_iter()
        .zip(1u32..)
        .map(|(round, sequence)| RoundTemplate {
            id: RoundTemplateId::generate(),
            round_type: round.round_type,
            name: round.name.to_string(),
            description: None,
            duration: round.duration,
            sequence,
            config: round.config,
        })
        .collect();

    Assessment {
        id: AssessmentId::generate(),
        kind: AssessmentKind::Predefined,
        owner: None,
        name: name.to_string(),
        description: Some(description.to_string()),
        difficulty,
        total_duration: rounds.iter().map(|round| round.duration).sum(),
        round_count: rounds.len() as u32,
        is_active: true,
        rounds,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn predefined_catalogue() -> Vec<Assessment> {
    vec![
        seed(
            "Backend Engineer",
            "Screening, algorithms and a system design discussion for server-side roles.",
            DifficultyLevel::Medium,
            vec![
                SeedRound {
                    round_type: RoundType::Screening,
                    name: "Recruiter screening",
                    duration: 20,
                    config: Value::Null,
                },
                SeedRound {
                    round_type: RoundType::Coding,
                    name: "Algorithms",
                    duration: 60,
                    config: json!({ "questionCount": 2, "languages": ["python", "java", "go"] }),
                },
                SeedRound {
                    round_type: RoundType::SystemDesign,
                    name: "System design",
                    duration: 45,
                    config: Value::Null,
                },
            ],
        ),
        seed(
            "Frontend Engineer",
            "Aptitude, a technical interview and a UI coding exercise.",
            DifficultyLevel::Medium,
            vec![
                SeedRound {
                    round_type: RoundType::Aptitude,
                    name: "Aptitude",
                    duration: 30,
                    config: json!({ "questionCount": 15 }),
                },
                SeedRound {
                    round_type: RoundType::Technical,
                    name: "Browser fundamentals",
                    duration: 40,
                    config: json!({ "questionCount": 8 }),
                },
                SeedRound {
                    round_type: RoundType::Coding,
                    name: "UI exercise",
                    duration: 60,
                    config: json!({ "languages": ["javascript", "typescript"] }),
                },
            ],
        ),
        seed(
            "Graduate Software Engineer",
            "Entry-level loop focused on fundamentals and communication.",
            DifficultyLevel::Easy,
            vec![
                SeedRound {
                    round_type: RoundType::Aptitude,
                    name: "Aptitude",
                    duration: 30,
                    config: json!({ "questionCount": 20 }),
                },
                SeedRound {
                    round_type: RoundType::Communication,
                    name: "Communication",
                    duration: 20,
                    config: Value::Null,
                },
                SeedRound {
                    round_type: RoundType::Behavioral,
                    name: "Behavioral",
                    duration: 30,
                    config: json!({ "questionCount": 5 }),
                },
            ],
        ),
    ]
}
