//! Core types for the identity-verification demo API.
//!
//! Defines the advertised validation rules, the mocked verification
//! lookup, and the submission echo record. Nothing here performs I/O.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod rules;
pub mod submission;
pub mod verification;

pub use error::CoreError;
pub use rules::{ValidationRules, VALIDATION_RULES};
pub use submission::{
    SubmissionDraft, SubmissionReceipt, SubmissionRecord, ID_FILE_FIELD, SUBMISSION_MESSAGE,
};
pub use verification::{VerificationResult, VerificationStatus};
