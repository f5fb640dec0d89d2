//! Session data models.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::SessionMode;
use crate::assessor::AssessorReply;

/// Raw input form submission, exactly as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputForm {
    pub names: String,
    pub research_question: String,
    pub evidence: String,
    pub meaning: String,
    pub teacher_email: String,
}

/// The group's answers, created once at input submission.
///
/// `evidence`/`meaning` hold the current revision and are overwritten each
/// round; `first_evidence`/`first_meaning` are immutable snapshots of what
/// was submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialAnswers {
    pub names: String,
    pub research_question: String,
    pub evidence: String,
    pub meaning: String,
    pub teacher_email: String,
    pub first_evidence: String,
    pub first_meaning: String,
    pub submitted_at: DateTime<Utc>,
}

impl InitialAnswers {
    /// Snapshot a validated form. `first_*` equal the submitted values and
    /// never change afterwards.
    pub fn from_form(form: InputForm) -> Self {
        Self {
            names: form.names,
            research_question: form.research_question,
            first_evidence: form.evidence.clone(),
            first_meaning: form.meaning.clone(),
            evidence: form.evidence,
            meaning: form.meaning,
            teacher_email: form.teacher_email,
            submitted_at: Utc::now(),
        }
    }
}

/// The two follow-up questions of one round, each bound to a group member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowupQuestion {
    pub evidence_question: String,
    pub evidence_person: String,
    pub explanation_question: String,
    pub explanation_person: String,
}

/// A revised pair of answers submitted in the follow-up phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Revision {
    pub updated_evidence: String,
    pub updated_meaning: String,
}

/// One completed follow-up round. Appended to the history, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowupEntry {
    pub question: FollowupQuestion,
    pub answer: Revision,
}

/// The latest assessor round: raw reply plus the two people bound to its
/// questions. Lives until the next accepted revision clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingFollowup {
    pub reply: AssessorReply,
    pub evidence_person: String,
    pub explanation_person: String,
}

impl PendingFollowup {
    /// Bind the parsed questions to their assigned people.
    pub fn question(&self) -> FollowupQuestion {
        FollowupQuestion {
            evidence_question: self.reply.evidence_question.clone(),
            evidence_person: self.evidence_person.clone(),
            explanation_question: self.reply.explanation_question.clone(),
            explanation_person: self.explanation_person.clone(),
        }
    }
}

/// The whole session as an explicit value object.
///
/// Phase handlers on `SessionManager` take this by reference and return the
/// resulting mode; nothing in the workflow lives in ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    pub mode: SessionMode,
    pub answers: Option<InitialAnswers>,
    pub history: Vec<FollowupEntry>,
    pub used_names: HashSet<String>,
    pub pending: Option<PendingFollowup>,
    pub started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            mode: SessionMode::Input,
            answers: None,
            history: Vec::new(),
            used_names: HashSet::new(),
            pending: None,
            started_at: Utc::now(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
