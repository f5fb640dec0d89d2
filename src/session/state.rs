//! Session mode — tracks which screen/logic runs.

use serde::{Deserialize, Serialize};

/// The phases of a reflection session.
///
/// Progresses `Input` → `Followup`, loops in `Followup` while the group
/// revises, then ends at `SendSummary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Input,
    Followup,
    SendSummary,
}

impl SessionMode {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: SessionMode) -> bool {
        use SessionMode::*;
        matches!(
            (self, target),
            (Input, Followup) | (Followup, Followup) | (Followup, SendSummary)
        )
    }

    /// Whether this mode is terminal (the session is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SendSummary)
    }
}

impl Default for SessionMode {
    fn default() -> Self {
        Self::Input
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Input => "input",
            Self::Followup => "followup",
            Self::SendSummary => "send_summary",
        };
        write!(f, "{s}")
    }
}
