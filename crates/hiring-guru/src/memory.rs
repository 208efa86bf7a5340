//! Mutex-guarded in-memory implementations of every repository trait.
//!
//! Used by the api service in place of a database and by the tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::assessments::domain::{Assessment, AssessmentKind};
use crate::assessments::repository::AssessmentRepository;
use crate::coding::domain::CodingSubmission;
use crate::coding::repository::SubmissionRepository;
use crate::hiring::domain::HiringProcess;
use crate::hiring::repository::HiringProcessRepository;
use crate::ids::{AssessmentId, ProcessId, QuestionId, RoundId, SubmissionId, UserId};
use crate::repository::RepositoryError;
use crate::rounds::domain::{Question, Round, RoundResponse, RoundStatus};
use crate::rounds::repository::QuestionRepository;
use crate::users::domain::{AuthProvider, ProfileAnalysis, Session, User};
use crate::users::repository::{AnalysisRepository, SessionStore, UserRepository};

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{name} mutex poisoned")))
}

#[derive(Default, Clone)]
pub struct InMemoryAssessments {
    records: Arc<Mutex<Vec<Assessment>>>,
}

impl AssessmentRepository for InMemoryAssessments {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = lock(&self.records, "assessment")?;
        if guard.iter().any(|existing| existing.id == assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(assessment.clone());
        Ok(assessment)
    }

    fn update(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "assessment")?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == assessment.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = assessment;
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = lock(&self.records, "assessment")?;
        Ok(guard.iter().find(|assessment| &assessment.id == id).cloned())
    }

    fn list_kind(&self, kind: AssessmentKind) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = lock(&self.records, "assessment")?;
        Ok(guard
            .iter()
            .filter(|assessment| assessment.kind == kind)
            .cloned()
            .collect())
    }

    fn owned_by(&self, owner: &UserId) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = lock(&self.records, "assessment")?;
        Ok(guard
            .iter()
            .filter(|assessment| assessment.is_owned_by(owner))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct ProcessTables {
    /// Insertion order.
    processes: Vec<HiringProcess>,
    rounds: HashMap<RoundId, Round>,
}

/// Processes and rounds share one lock so the active-process check and insert are atomic.
#[derive(Default, Clone)]
pub struct InMemoryProcesses {
    tables: Arc<Mutex<ProcessTables>>,
}

impl HiringProcessRepository for InMemoryProcesses {
    fn start_exclusive(
        &self,
        process: HiringProcess,
        rounds: Vec<Round>,
    ) -> Result<HiringProcess, RepositoryError> {
        let mut guard = lock(&self.tables, "process")?;
        let already_active = guard
            .processes
            .iter()
            .any(|existing| existing.user_id == process.user_id && existing.is_active());
        if already_active || guard.processes.iter().any(|existing| existing.id == process.id) {
            return Err(RepositoryError::Conflict);
        }

        for round in rounds {
            guard.rounds.insert(round.id.clone(), round);
        }
        guard.processes.push(process.clone());
        Ok(process)
    }

    fn fetch_process(&self, id: &ProcessId) -> Result<Option<HiringProcess>, RepositoryError> {
        let guard = lock(&self.tables, "process")?;
        Ok(guard.processes.iter().find(|process| &process.id == id).cloned())
    }

    fn update_process(&self, process: HiringProcess) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables, "process")?;
        let slot = guard
            .processes
            .iter_mut()
            .find(|existing| existing.id == process.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = process;
        Ok(())
    }

    fn processes_for_user(&self, user: &UserId) -> Result<Vec<HiringProcess>, RepositoryError> {
        let guard = lock(&self.tables, "process")?;
        Ok(guard
            .processes
            .iter()
            .rev()
            .filter(|process| &process.user_id == user)
            .cloned()
            .collect())
    }

    fn processes_referencing(
        &self,
        assessment: &AssessmentId,
    ) -> Result<Vec<HiringProcess>, RepositoryError> {
        let guard = lock(&self.tables, "process")?;
        Ok(guard
            .processes
            .iter()
            .filter(|process| &process.assessment_id == assessment)
            .cloned()
            .collect())
    }

    fn fetch_round(&self, id: &RoundId) -> Result<Option<Round>, RepositoryError> {
        let guard = lock(&self.tables, "process")?;
        Ok(guard.rounds.get(id).cloned())
    }

    fn update_round(&self, round: Round) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables, "process")?;
        match guard.rounds.get_mut(&round.id) {
            Some(slot) => {
                *slot = round;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn update_round_if(&self, round: Round, expected: RoundStatus) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tables, "process")?;
        let slot = guard
            .rounds
            .get_mut(&round.id)
            .ok_or(RepositoryError::NotFound)?;
        if slot.status != expected {
            return Err(RepositoryError::Conflict);
        }
        *slot = round;
        Ok(())
    }

    fn rounds_for_process(&self, id: &ProcessId) -> Result<Vec<Round>, RepositoryError> {
        let guard = lock(&self.tables, "process")?;
        let mut rounds: Vec<Round> = guard
            .rounds
            .values()
            .filter(|round| &round.process_id == id)
            .cloned()
            .collect();
        rounds.sort_by_key(|round| round.sequence);
        Ok(rounds)
    }
}

#[derive(Default)]
struct QuestionTables {
    questions: Vec<Question>,
    responses: Vec<RoundResponse>,
}

#[derive(Default, Clone)]
pub struct InMemoryQuestions {
    tables: Arc<Mutex<QuestionTables>>,
}

impl QuestionRepository for InMemoryQuestions {
    fn insert_questions(&self, questions: Vec<Question>) -> Result<Vec<Question>, RepositoryError> {
        let mut guard = lock(&self.tables, "question")?;
        guard.questions.extend(questions.iter().cloned());
        Ok(questions)
    }

    fn fetch_question(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError> {
        let guard = lock(&self.tables, "question")?;
        Ok(guard.questions.iter().find(|question| &question.id == id).cloned())
    }

    fn questions_for_round(&self, round_id: &RoundId) -> Result<Vec<Question>, RepositoryError> {
        let guard = lock(&self.tables, "question")?;
        Ok(guard
            .questions
            .iter()
            .filter(|question| &question.round_id == round_id)
            .cloned()
            .collect())
    }

    fn insert_responses(
        &self,
        responses: Vec<RoundResponse>,
    ) -> Result<Vec<RoundResponse>, RepositoryError> {
        let mut guard = lock(&self.tables, "question")?;
        guard.responses.extend(responses.iter().cloned());
        Ok(responses)
    }

    #[cfg(test)]
    fn responses_for_round(
        &self,
        round_id: &RoundId,
    ) -> Result<Vec<RoundResponse>, RepositoryError> {
        let guard = lock(&self.tables, "question")?;
        Ok(guard
            .responses
            .iter()
            .filter(|response| &response.round_id == round_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemorySubmissions {
    records: Arc<Mutex<Vec<CodingSubmission>>>,
}

impl SubmissionRepository for InMemorySubmissions {
    fn insert(&self, submission: CodingSubmission) -> Result<CodingSubmission, RepositoryError> {
        let mut guard = lock(&self.records, "submission")?;
        if guard.iter().any(|existing| existing.id == submission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(submission.clone());
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<CodingSubmission>, RepositoryError> {
        let guard = lock(&self.records, "submission")?;
        Ok(guard.iter().find(|submission| &submission.id == id).cloned())
    }

    fn for_round(&self, round_id: &RoundId) -> Result<Vec<CodingSubmission>, RepositoryError> {
        let guard = lock(&self.records, "submission")?;
        Ok(guard
            .iter()
            .rev()
            .filter(|submission| &submission.round_id == round_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryUsers {
    records: Arc<Mutex<HashMap<UserId, User>>>,
}

impl InMemoryUsers {
    fn find<F>(&self, predicate: F) -> Result<Option<User>, RepositoryError>
    where
        F: Fn(&User) -> bool,
    {
        let guard = lock(&self.records, "user")?;
        Ok(guard.values().find(|user| predicate(user)).cloned())
    }
}

impl UserRepository for InMemoryUsers {
    fn insert(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = lock(&self.records, "user")?;
        let duplicate = guard.values().any(|existing| {
            existing.email == user.email
                || (existing.auth_provider == user.auth_provider
                    && existing.auth_provider_id == user.auth_provider_id)
                || (user.github_username.is_some()
                    && existing.github_username == user.github_username)
        });
        if duplicate || guard.contains_key(&user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn update(&self, user: User) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "user")?;
        match guard.get_mut(&user.id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = lock(&self.records, "user")?;
        Ok(guard.get(id).cloned())
    }

    fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.find(|user| user.auth_provider == provider && user.auth_provider_id == provider_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find(|user| user.email == email)
    }

    fn find_by_github_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find(|user| user.github_username.as_deref() == Some(username))
    }
}

#[derive(Default, Clone)]
pub struct InMemorySessions {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore for InMemorySessions {
    fn insert(&self, session: Session) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.sessions, "session")?;
        if guard.contains_key(&session.token) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.token.clone(), session);
        Ok(())
    }

    fn fetch(&self, token: &str) -> Result<Option<Session>, RepositoryError> {
        let guard = lock(&self.sessions, "session")?;
        Ok(guard.get(token).cloned())
    }

    fn remove(&self, token: &str) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.sessions, "session")?;
        Ok(guard.remove(token).is_some())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryAnalyses {
    records: Arc<Mutex<Vec<ProfileAnalysis>>>,
}

impl AnalysisRepository for InMemoryAnalyses {
    fn insert(&self, analysis: ProfileAnalysis) -> Result<ProfileAnalysis, RepositoryError> {
        let mut guard = lock(&self.records, "analysis")?;
        guard.push(analysis.clone());
        Ok(analysis)
    }

    fn recent_for_user(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<ProfileAnalysis>, RepositoryError> {
        let guard = lock(&self.records, "analysis")?;
        Ok(guard
            .iter()
            .rev()
            .filter(|analysis| &analysis.user_id == user)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::domain::{AssessmentKind, RoundType};
    use crate::hiring::domain::{ConfigSnapshot, ProcessStatus};
    use crate::ids::RoundTemplateId;
    use chrono::Utc;

    fn process(user: &str, status: ProcessStatus) -> HiringProcess {
        let now = Utc::now();
        HiringProcess {
            id: ProcessId::generate(),
            user_id: UserId::from(user),
            assessment_type: AssessmentKind::Predefined,
            assessment_id: AssessmentId::from("assessment-1"),
            status,
            is_locked: true,
            locked_at: Some(now),
            started_at: Some(now),
            completed_at: None,
            config_snapshot: ConfigSnapshot {
                assessment_type: AssessmentKind::Predefined,
                assessment_name: "Backend".to_string(),
                total_duration: 60,
                round_count: 1,
                rounds: Vec::new(),
                snapshot_taken_at: now,
            },
            created_at: now,
        }
    }

    fn round_for(process: &HiringProcess, sequence: u32) -> Round {
        Round {
            id: RoundId::generate(),
            process_id: process.id.clone(),
            user_id: process.user_id.clone(),
            template_id: RoundTemplateId::generate(),
            round_type: RoundType::Coding,
            name: format!("round {sequence}"),
            description: None,
            sequence,
            duration: 30,
            status: RoundStatus::NotStarted,
            started_at: None,
            completed_at: None,
            time_spent: None,
        }
    }

    #[test]
    fn start_exclusive_refuses_a_second_active_process() {
        let repository = InMemoryProcesses::default();
        let first = process("user-1", ProcessStatus::InProgress);
        let rounds = vec![round_for(&first, 2), round_for(&first, 1)];
        repository
            .start_exclusive(first.clone(), rounds)
            .expect("first process stored");

        let second = process("user-1", ProcessStatus::InProgress);
        let second_round = round_for(&second, 1);
        let err = repository
            .start_exclusive(second.clone(), vec![second_round.clone()])
            .expect_err("second active process refused");

        assert!(matches!(err, RepositoryError::Conflict));
        assert!(repository.fetch_round(&second_round.id).unwrap().is_none());
        let sequences: Vec<u32> = repository
            .rounds_for_process(&first.id)
            .unwrap()
            .iter()
            .map(|round| round.sequence)
            .collect();
        assert_eq!(sequences, vec![1, 2]);
    }

    #[test]
    fn completed_processes_do_not_block_new_ones() {
        let repository = InMemoryProcesses::default();
        repository
            .start_exclusive(process("user-1", ProcessStatus::Completed), Vec::new())
            .expect("completed stored");
        repository
            .start_exclusive(process("user-1", ProcessStatus::InProgress), Vec::new())
            .expect("new active process allowed");
        repository
            .start_exclusive(process("user-2", ProcessStatus::InProgress), Vec::new())
            .expect("other users unaffected");

        assert_eq!(
            repository
                .processes_for_user(&UserId::from("user-1"))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn concurrent_starts_admit_exactly_one() {
        let repository = InMemoryProcesses::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = repository.clone();
                std::thread::spawn(move || {
                    repository
                        .start_exclusive(process("racer", ProcessStatus::InProgress), Vec::new())
                        .is_ok()
                })
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread finished"))
            .filter(|admitted| *admitted)
            .count();
        assert_eq!(admitted, 1);
    }

    #[test]
    fn conditional_round_update_requires_the_expected_status() {
        let repository = InMemoryProcesses::default();
        let owner = process("user-1", ProcessStatus::InProgress);
        let round = round_for(&owner, 1);
        repository
            .start_exclusive(owner, vec![round.clone()])
            .expect("process stored");

        let mut started = round.clone();
        started.status = RoundStatus::InProgress;
        repository
            .update_round_if(started, RoundStatus::NotStarted)
            .expect("status matched");

        let mut stale = round.clone();
        stale.status = RoundStatus::InPreparation;
        let err = repository
            .update_round_if(stale, RoundStatus::NotStarted)
            .expect_err("status moved on");
        assert!(matches!(err, RepositoryError::Conflict));
        assert_eq!(
            repository.fetch_round(&round.id).unwrap().map(|r| r.status),
            Some(RoundStatus::InProgress)
        );

        let missing = round_for(&process("user-2", ProcessStatus::InProgress), 1);
        assert!(matches!(
            repository.update_round_if(missing, RoundStatus::NotStarted),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn analyses_are_returned_newest_first_and_limited() {
        let repository = InMemoryAnalyses::default();
        let user = UserId::from("user-1");
        for index in 0..12 {
            repository
                .insert(ProfileAnalysis {
                    id: crate::ids::AnalysisId::from(format!("analysis-{index}")),
                    user_id: user.clone(),
                    github_username: None,
                    skills: Vec::new(),
                    contribution_freq: "weekly".to_string(),
                    projects_count: index,
                    top_languages: None,
                    recent_activity: None,
                    repository_stats: None,
                    target_role: "Software Developer".to_string(),
                    dream_companies: Vec::new(),
                    confidence_score: None,
                    reasoning: None,
                    skill_gaps: Vec::new(),
                    career_path: Vec::new(),
                    created_at: Utc::now(),
                })
                .expect("stored");
        }

        let recent = repository.recent_for_user(&user, 10).unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].id.as_str(), "analysis-11");
        assert_eq!(recent[9].id.as_str(), "analysis-2");
    }
}
