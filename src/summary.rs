//! Transcript composition for the teacher email.

use crate::session::model::{FollowupEntry, InitialAnswers};

/// Render the full session transcript as plain text.
///
/// Pure function of the answers and the follow-up history: same inputs, same
/// bytes. The header carries the final revisions first, then the answers
/// exactly as first submitted, then every follow-up round in order.
pub fn compose(answers: &InitialAnswers, history: &[FollowupEntry]) -> String {
    let mut out = format!(
        "Student Names: {names}\n\
         Research Question: {research_question}\n\n\
         Final Evidence: {evidence}\n\
         Final Interpretation: {meaning}\n\n\
         Original Evidence: {first_evidence}\n\
         Original Interpretation: {first_meaning}\n\n\
         Follow-Up Discussion:\n",
        names = answers.names,
        research_question = answers.research_question,
        evidence = answers.evidence,
        meaning = answers.meaning,
        first_evidence = answers.first_evidence,
        first_meaning = answers.first_meaning,
    );

    if history.is_empty() {
        out.push_str("\n(no follow-up rounds)\n");
        return out;
    }

    for (idx, entry) in history.iter().enumerate() {
        let n = idx + 1;
        out.push_str(&format!(
            "\nQ{n} Evidence (asked of {evidence_person}): {evidence_question}\n\
             Q{n} Explanation (asked of {explanation_person}): {explanation_question}\n\
             A{n} Evidence: {updated_evidence}\n\
             A{n} Interpretation: {updated_meaning}\n",
            evidence_person = entry.question.evidence_person,
            evidence_question = entry.question.evidence_question,
            explanation_person = entry.question.explanation_person,
            explanation_question = entry.question.explanation_question,
            updated_evidence = entry.answer.updated_evidence,
            updated_meaning = entry.answer.updated_meaning,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::{FollowupQuestion, InputForm, Revision};

    fn answers() -> InitialAnswers {
        InitialAnswers::from_form(InputForm {
            names: "Alex, Bea".into(),
            research_question: "Does salt affect boiling point?".into(),
            evidence: "Water with salt boiled at 102C".into(),
            meaning: "Salt raises boiling point".into(),
            teacher_email: "t@school.edu".into(),
        })
    }

    fn entry(n: usize) -> FollowupEntry {
        FollowupEntry {
            question: FollowupQuestion {
                evidence_question: format!("Evidence question {n}?"),
                evidence_person: "Alex".into(),
                explanation_question: format!("Explanation question {n}?"),
                explanation_person: "Bea".into(),
            },
            answer: Revision {
                updated_evidence: format!("Evidence revision {n}"),
                updated_meaning: format!("Interpretation revision {n}"),
            },
        }
    }

    #[test]
    fn header_contains_names_and_question() {
        let text = compose(&answers(), &[]);
        assert!(text.contains("Student Names: Alex, Bea"));
        assert!(text.contains("Research Question: Does salt affect boiling point?"));
    }

    #[test]
    fn originals_survive_revisions() {
        let mut answers = answers();
        answers.evidence = "Three trials, 101.8C to 102.1C".into();
        answers.meaning = "Dissolved salt elevates the boiling point".into();

        let text = compose(&answers, &[entry(1), entry(2)]);
        assert!(text.contains("Original Evidence: Water with salt boiled at 102C"));
        assert!(text.contains("Original Interpretation: Salt raises boiling point"));
        assert!(text.contains("Final Evidence: Three trials, 101.8C to 102.1C"));
    }

    #[test]
    fn rounds_are_listed_in_order() {
        let text = compose(&answers(), &[entry(1), entry(2)]);
        let q1 = text.find("Q1 Evidence (asked of Alex): Evidence question 1?").unwrap();
        let a1 = text.find("A1 Evidence: Evidence revision 1").unwrap();
        let q2 = text.find("Q2 Evidence (asked of Alex): Evidence question 2?").unwrap();
        let a2 = text.find("A2 Interpretation: Interpretation revision 2").unwrap();
        assert!(q1 < a1 && a1 < q2 && q2 < a2);
    }

    #[test]
    fn empty_history_is_marked() {
        let text = compose(&answers(), &[]);
        assert!(text.contains("(no follow-up rounds)"));
    }

    #[test]
    fn compose_is_pure() {
        let answers = answers();
        let history = [entry(1)];
        assert_eq!(compose(&answers, &history), compose(&answers, &history));
    }
}
