//! Request models with validation at construction
//!
//! Form input is checked when building these types.
//! Invalid input returns ValidationError, not panic.

pub mod submission;
pub mod validation;

pub use submission::{NewSubmission, SubmissionForm};
pub use validation::ValidationError;
