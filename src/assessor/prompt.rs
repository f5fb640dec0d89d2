//! Rubric prompt construction.
//!
//! One deterministic instruction block per assessment cycle: the fixed
//! two-criterion rubric, scoring rules, question-selection rules keyed by
//! score level, the questions already asked (so the model does not repeat
//! itself), the group's current answers, and the exact reply layout the
//! parser expects.

use crate::session::model::InitialAnswers;

const RUBRIC: &str = "\
You are helping a group of students reflect on a science investigation.
Assess their current answers against this rubric, then write two follow-up
questions for them.

RUBRIC — Presenting Evidence (score 1-4):
1. No relevant data or observations are presented.
2. Some data is mentioned but it is vague, unquantified, or disconnected from the research question.
3. Relevant data is presented with specifics (quantities, units, conditions) but coverage is incomplete, e.g. a single trial or no comparison.
4. Specific, quantified data is clearly tied to the research question, including comparisons or controls where applicable.

RUBRIC — Constructing an Explanation (score 1-4):
1. No interpretation is offered, or the data is merely restated.
2. A claim is made with little or no link to the evidence.
3. A claim is linked to the evidence but the scientific reasoning is incomplete.
4. A claim is clearly justified by the evidence using correct scientific reasoning.

Scoring rules:
- Score only what is written in the answers below. Do not assume unstated work.
- When an answer sits between two levels, give the lower score.
- Judge the current answers, not earlier versions.

Follow-up question rules:
- Write exactly one question per rubric: one about the evidence, one about the explanation.
- Score 1 or 2: ask an easier, concrete question that helps them supply what is missing.
- Score 3: ask them to add the specific comparison, quantity, or reasoning step that would complete the answer.
- Score 4: ask a harder extension question that stretches their thinking.
- Never ask a yes/no question.
- Never repeat a question from the list of already-asked questions.";

const REPLY_LAYOUT: &str = "\
Reply in exactly this layout and nothing else:

Assessment:
- Evidence: Evidence Score: <n>
- Explanation: Explanation Score: <n>

Follow-Up Questions:
- Evidence Question: <text>
- Explanation Question: <text>";

/// Render the full assessment prompt.
pub fn build_prompt(answers: &InitialAnswers, prior_questions: &[String]) -> String {
    let asked = if prior_questions.is_empty() {
        "(none yet)".to_string()
    } else {
        prior_questions
            .iter()
            .map(|q| format!("- {q}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{RUBRIC}\n\n\
         Already-asked questions:\n{asked}\n\n\
         The group's current answers:\n\
         Research Question: {research_question}\n\
         Evidence Collected: {evidence}\n\
         Interpretation: {meaning}\n\n\
         {REPLY_LAYOUT}",
        research_question = answers.research_question,
        evidence = answers.evidence,
        meaning = answers.meaning,
    )
}
