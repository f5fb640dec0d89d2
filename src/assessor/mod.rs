//! Rubric assessment — prompt the model, parse its fixed-layout reply.

pub mod prompt;
pub mod reply;

pub use prompt::build_prompt;
pub use reply::{AssessorReply, parse_reply};

use std::sync::Arc;

use crate::error::AssessorError;
use crate::llm::{CompletionRequest, LlmProvider};
use crate::session::model::{FollowupEntry, InitialAnswers};

/// Sampling temperature for assessment calls.
const TEMPERATURE: f64 = 0.7;
/// Reply budget. The fixed layout fits comfortably.
const MAX_TOKENS: u64 = 1024;

/// Scores the group's answers against the rubric and generates follow-up
/// questions.
pub struct Assessor {
    llm: Arc<dyn LlmProvider>,
}

impl Assessor {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Run one assessment cycle against the current answers.
    ///
    /// Blocks until the provider returns. Transport/auth failures surface as
    /// `AssessorError::Llm`; layout violations as
    /// `AssessorError::MalformedReply`.
    pub async fn assess(
        &self,
        answers: &InitialAnswers,
        history: &[FollowupEntry],
    ) -> Result<AssessorReply, AssessorError> {
        let prior = prior_questions(history);
        let rendered = build_prompt(answers, &prior);

        let request = CompletionRequest::new(rendered)
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS);

        let response = self.llm.complete(request).await?;
        tracing::debug!(
            model = self.llm.model_name(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Assessment cycle completed"
        );

        parse_reply(&response.content)
    }
}

/// Every question asked so far, in transcript order.
fn prior_questions(history: &[FollowupEntry]) -> Vec<String> {
    let mut questions = Vec::with_capacity(history.len() * 2);
    for entry in history {
        questions.push(entry.question.evidence_question.clone());
        questions.push(entry.question.explanation_question.clone());
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::LlmError;
    use crate::llm::CompletionResponse;
    use crate::session::model::{FollowupQuestion, InputForm, Revision};

    /// Returns a canned reply and records the prompt it was given.
    struct CannedProvider {
        reply: String,
        prompts: std::sync::Mutex<Vec<String>>,
    }

    impl CannedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.prompts.lock().unwrap().push(request.prompt);
            Ok(CompletionResponse {
                content: self.reply.clone(),
                input_tokens: 0,
                output_tokens: 0,
            })
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn answers() -> InitialAnswers {
        InitialAnswers::from_form(InputForm {
            names: "Alex, Bea".into(),
            research_question: "Does salt affect boiling point?".into(),
            evidence: "Water with salt boiled at 102C".into(),
            meaning: "Salt raises boiling point".into(),
            teacher_email: "t@school.edu".into(),
        })
    }

    const REPLY: &str = "\
Assessment:
- Evidence: Evidence Score: 3
- Explanation: Explanation Score: 2

Follow-Up Questions:
- Evidence Question: How many trials did you run?
- Explanation Question: Why would salt change the boiling temperature?";

    #[tokio::test]
    async fn assess_parses_canned_reply() {
        let provider = Arc::new(CannedProvider::new(REPLY));
        let assessor = Assessor::new(provider);

        let reply = assessor.assess(&answers(), &[]).await.unwrap();
        assert_eq!(reply.evidence_score, Some(3));
        assert_eq!(reply.evidence_question, "How many trials did you run?");
    }

    #[tokio::test]
    async fn assess_feeds_history_into_prompt() {
        let provider = Arc::new(CannedProvider::new(REPLY));
        let assessor = Assessor::new(Arc::clone(&provider) as Arc<dyn LlmProvider>);

        let history = vec![FollowupEntry {
            question: FollowupQuestion {
                evidence_question: "What units did you use?".into(),
                evidence_person: "Alex".into(),
                explanation_question: "What else could explain it?".into(),
                explanation_person: "Bea".into(),
            },
            answer: Revision {
                updated_evidence: "102.1C on a calibrated thermometer".into(),
                updated_meaning: "Salt elevates the boiling point".into(),
            },
        }];

        assessor.assess(&answers(), &history).await.unwrap();

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("- What units did you use?"));
        assert!(prompts[0].contains("- What else could explain it?"));
    }

    #[tokio::test]
    async fn malformed_reply_is_surfaced() {
        let provider = Arc::new(CannedProvider::new("I refuse to follow layouts."));
        let assessor = Assessor::new(provider);

        let err = assessor.assess(&answers(), &[]).await.unwrap_err();
        assert!(matches!(err, AssessorError::MalformedReply { .. }));
    }

    #[test]
    fn prior_questions_preserve_order() {
        let entry = |n: usize| FollowupEntry {
            question: FollowupQuestion {
                evidence_question: format!("ev{n}"),
                evidence_person: "Alex".into(),
                explanation_question: format!("ex{n}"),
                explanation_person: "Bea".into(),
            },
            answer: Revision::default(),
        };
        let questions = prior_questions(&[entry(1), entry(2)]);
        assert_eq!(questions, vec!["ev1", "ex1", "ev2", "ex2"]);
    }
}
