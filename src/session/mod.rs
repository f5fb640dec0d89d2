//! Reflection session — the workflow state machine.
//!
//! One session is one group's pass through the three phases: input,
//! follow-up revision rounds, summary send. All mutable workflow data lives
//! in the [`SessionState`] value object; [`SessionManager`] holds the
//! external collaborators and the phase handlers.

pub mod manager;
pub mod model;
pub mod state;

pub use manager::{SendReport, SessionManager};
pub use model::{
    FollowupEntry, FollowupQuestion, InitialAnswers, InputForm, PendingFollowup, Revision,
    SessionState,
};
pub use state::SessionMode;
