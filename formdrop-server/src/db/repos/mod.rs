//! Repository implementations for database access
//!
//! Repositories borrow the shared pool and map rows into plain structs.

pub mod submissions;

pub use submissions::{DeleteOutcome, Submission, SubmissionRepo};
