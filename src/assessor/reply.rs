//! Strict parsing of the assessor's fixed-layout reply.
//!
//! The model is instructed to answer in a fixed textual layout (see
//! [`super::prompt`]). The two follow-up questions are the structured part of
//! that protocol and are required; a reply missing the marker or either
//! labeled line is a recognized `MalformedReply` error, not an unguarded
//! split. The ordinal scores are advisory and scanned leniently because the
//! assessment text is shown to the group verbatim anyway.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AssessorError;

/// Section marker separating the assessment from the questions.
pub const QUESTIONS_MARKER: &str = "Follow-Up Questions:";
/// Label prefixing the evidence follow-up question line.
pub const EVIDENCE_LABEL: &str = "Evidence Question:";
/// Label prefixing the explanation follow-up question line.
pub const EXPLANATION_LABEL: &str = "Explanation Question:";

static EVIDENCE_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Evidence Score:\s*(\d)").expect("static pattern"));
static EXPLANATION_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Explanation Score:\s*(\d)").expect("static pattern"));

/// A parsed assessor reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessorReply {
    /// Assessment section (everything above the questions marker), verbatim.
    pub assessment: String,
    /// Ordinal rubric score for Presenting Evidence, if stated (1–4).
    pub evidence_score: Option<u8>,
    /// Ordinal rubric score for Constructing an Explanation, if stated (1–4).
    pub explanation_score: Option<u8>,
    pub evidence_question: String,
    pub explanation_question: String,
    /// Full raw model output.
    pub raw: String,
}

/// Parse a raw model reply into its structured parts.
pub fn parse_reply(raw: &str) -> Result<AssessorReply, AssessorError> {
    let marker_at = raw.find(QUESTIONS_MARKER).ok_or_else(|| {
        AssessorError::MalformedReply {
            reason: format!("missing {QUESTIONS_MARKER:?} marker"),
        }
    })?;

    let assessment = raw[..marker_at].trim().to_string();
    let questions = &raw[marker_at + QUESTIONS_MARKER.len()..];

    let evidence_question = labeled_line(questions, EVIDENCE_LABEL)?;
    let explanation_question = labeled_line(questions, EXPLANATION_LABEL)?;

    Ok(AssessorReply {
        evidence_score: scan_score(&EVIDENCE_SCORE, raw),
        explanation_score: scan_score(&EXPLANATION_SCORE, raw),
        assessment,
        evidence_question,
        explanation_question,
        raw: raw.to_string(),
    })
}

/// Find the first line carrying `label` and return its text with the label
/// (and any list bullet) stripped. The text must be non-empty.
fn labeled_line(section: &str, label: &str) -> Result<String, AssessorError> {
    let line = section
        .lines()
        .map(|line| line.trim().trim_start_matches('-').trim_start())
        .find(|line| line.starts_with(label))
        .ok_or_else(|| AssessorError::MalformedReply {
            reason: format!("missing {label:?} line"),
        })?;

    let text = line[label.len()..].trim();
    if text.is_empty() {
        return Err(AssessorError::MalformedReply {
            reason: format!("empty text after {label:?}"),
        });
    }
    Ok(text.to_string())
}

fn scan_score(pattern: &Regex, raw: &str) -> Option<u8> {
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .filter(|n| (1..=4).contains(n))
}
