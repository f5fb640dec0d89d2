//! SessionManager — phase handlers driving the reflection workflow.
//!
//! The manager owns the external collaborators (assessor, mailer) but no
//! session data: every handler takes the explicit [`SessionState`] value
//! object and returns the resulting mode. Validation failures leave the
//! state untouched.

use std::sync::Arc;

use crate::assessor::Assessor;
use crate::config::SUMMARY_SUBJECT;
use crate::error::{Result, SessionError};
use crate::mail::Mailer;
use crate::roster;
use crate::summary;

use super::model::{
    FollowupEntry, InitialAnswers, InputForm, PendingFollowup, Revision, SessionState,
};
use super::state::SessionMode;

/// Outcome of the terminal send.
#[derive(Debug, Clone)]
pub struct SendReport {
    pub message_id: String,
    pub recipient: String,
}

/// Coordinates the three phases of a session.
pub struct SessionManager {
    assessor: Assessor,
    mailer: Arc<dyn Mailer>,
}

impl SessionManager {
    pub fn new(assessor: Assessor, mailer: Arc<dyn Mailer>) -> Self {
        Self { assessor, mailer }
    }

    /// Submit the input form. All fields must be non-empty; on success the
    /// answers are snapshotted and the session enters the follow-up phase.
    pub fn submit_input(&self, state: &mut SessionState, form: InputForm) -> Result<SessionMode> {
        require_mode(state, SessionMode::Input, "submit_input")?;
        validate_form(&form)?;

        state.answers = Some(InitialAnswers::from_form(form));
        transition(state, SessionMode::Followup);
        tracing::info!(session = %state.id, "Input accepted, entering follow-up phase");
        Ok(state.mode)
    }

    /// Produce the follow-up round to present: the existing pending round if
    /// one is waiting, otherwise a fresh assessment with two rotated names
    /// bound to its questions.
    pub async fn prepare_followup(&self, state: &mut SessionState) -> Result<PendingFollowup> {
        require_mode(state, SessionMode::Followup, "prepare_followup")?;
        if let Some(pending) = &state.pending {
            return Ok(pending.clone());
        }

        let (reply, names) = {
            let answers = current_answers(state, "prepare_followup")?;
            let reply = self.assessor.assess(answers, &state.history).await?;
            (reply, answers.names.clone())
        };

        let (evidence_person, explanation_person) =
            roster::pick_pair(&names, &mut state.used_names, &mut rand::thread_rng())?;

        tracing::info!(
            session = %state.id,
            round = state.history.len() + 1,
            %evidence_person,
            %explanation_person,
            "Follow-up round prepared"
        );

        let pending = PendingFollowup {
            reply,
            evidence_person,
            explanation_person,
        };
        state.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Accept a revision and stay in the follow-up phase; the next
    /// `prepare_followup` re-assesses the updated answers.
    pub fn submit_revision(
        &self,
        state: &mut SessionState,
        revision: Revision,
    ) -> Result<SessionMode> {
        require_mode(state, SessionMode::Followup, "submit_revision")?;
        self.accept_revision(state, revision)?;
        transition(state, SessionMode::Followup);
        Ok(state.mode)
    }

    /// Accept a final revision and move to the terminal send phase.
    pub fn finish(&self, state: &mut SessionState, revision: Revision) -> Result<SessionMode> {
        require_mode(state, SessionMode::Followup, "finish")?;
        self.accept_revision(state, revision)?;
        transition(state, SessionMode::SendSummary);
        tracing::info!(
            session = %state.id,
            rounds = state.history.len(),
            "Follow-up phase finished"
        );
        Ok(state.mode)
    }

    /// Render the transcript that `send_summary` will email.
    pub fn preview(&self, state: &SessionState) -> Result<String> {
        require_mode(state, SessionMode::SendSummary, "preview")?;
        let answers = current_answers(state, "preview")?;
        Ok(summary::compose(answers, &state.history))
    }

    /// Compose the transcript and send it to the teacher. Terminal: a failure
    /// is surfaced but the machine never re-enters this phase on its own.
    pub async fn send_summary(&self, state: &SessionState) -> Result<SendReport> {
        require_mode(state, SessionMode::SendSummary, "send_summary")?;
        let answers = current_answers(state, "send_summary")?;

        let body = summary::compose(answers, &state.history);
        let message_id = self
            .mailer
            .send(&answers.teacher_email, SUMMARY_SUBJECT, &body)
            .await?;

        Ok(SendReport {
            message_id,
            recipient: answers.teacher_email.clone(),
        })
    }

    /// Shared revision path: validate, bind the pending questions to the
    /// revision, overwrite the current answers, clear the pending round.
    fn accept_revision(&self, state: &mut SessionState, revision: Revision) -> Result<()> {
        if revision.updated_evidence.trim().is_empty() {
            return Err(SessionError::EmptyField {
                field: "updated_evidence",
            }
            .into());
        }
        if revision.updated_meaning.trim().is_empty() {
            return Err(SessionError::EmptyField {
                field: "updated_meaning",
            }
            .into());
        }

        let Some(answers) = state.answers.as_mut() else {
            return Err(SessionError::WrongMode {
                action: "accept_revision",
                mode: state.mode.to_string(),
            }
            .into());
        };
        let Some(pending) = state.pending.take() else {
            return Err(SessionError::NoPendingRound.into());
        };

        answers.evidence = revision.updated_evidence.clone();
        answers.meaning = revision.updated_meaning.clone();
        state.history.push(FollowupEntry {
            question: pending.question(),
            answer: revision,
        });
        Ok(())
    }
}

fn require_mode(
    state: &SessionState,
    expected: SessionMode,
    action: &'static str,
) -> std::result::Result<(), SessionError> {
    if state.mode != expected {
        return Err(SessionError::WrongMode {
            action,
            mode: state.mode.to_string(),
        });
    }
    Ok(())
}

fn transition(state: &mut SessionState, target: SessionMode) {
    debug_assert!(state.mode.can_transition_to(target));
    state.mode = target;
}

fn current_answers<'a>(
    state: &'a SessionState,
    action: &'static str,
) -> std::result::Result<&'a InitialAnswers, SessionError> {
    state.answers.as_ref().ok_or(SessionError::WrongMode {
        action,
        mode: state.mode.to_string(),
    })
}

fn validate_form(form: &InputForm) -> std::result::Result<(), SessionError> {
    let fields: [(&'static str, &str); 5] = [
        ("names", &form.names),
        ("research_question", &form.research_question),
        ("evidence", &form.evidence),
        ("meaning", &form.meaning),
        ("teacher_email", &form.teacher_email),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(SessionError::EmptyField { field });
        }
    }
    Ok(())
}
