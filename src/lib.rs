//! Lab Coach — guided reflection workflow for student science lab reports.
//!
//! A student group submits their investigation answers, a language model
//! scores them against a fixed two-criterion rubric and asks two follow-up
//! questions per round, the group revises until they finish, and the full
//! transcript is emailed to their teacher.

pub mod assessor;
pub mod config;
pub mod console;
pub mod error;
pub mod llm;
pub mod mail;
pub mod roster;
pub mod session;
pub mod summary;
