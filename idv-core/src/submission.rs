use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Multipart part name carrying the identity document.
pub const ID_FILE_FIELD: &str = "id_file";

/// Confirmation text returned for every accepted submission.
pub const SUBMISSION_MESSAGE: &str = "Submission successful";

/// Echo of an accepted form submission.
///
/// Only the declared file name is kept; the uploaded bytes never reach
/// this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SubmissionRecord {
    pub name: String,
    pub email: String,
    /// Date of birth, unparsed.
    pub dob: String,
    /// Client-declared name of the uploaded file.
    pub filename: String,
}

/// Parts collected from a multipart stream before every field is known.
///
/// Assigning a field twice overwrites the earlier value, so the last
/// occurrence in the request wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct SubmissionDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub filename: Option<String>,
}

impl SubmissionDraft {
    /// Stores a text part by its form field name.
    ///
    /// Returns `false` (and stores nothing) for names that are not one of
    /// `name`, `email` or `dob`.
    pub fn set_text(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "dob" => &mut self.dob,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Completes the record.
    ///
    /// An empty `name`, `email` or `dob` counts as absent.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingField`] naming the first absent part, checked
    /// in the order `name`, `email`, `dob`, `id_file`.
    pub fn finish(self) -> Result<SubmissionRecord, CoreError> {
        Ok(SubmissionRecord {
            name: required_text(self.name, "name")?,
            email: required_text(self.email, "email")?,
            dob: required_text(self.dob, "dob")?,
            filename: self
                .filename
                .ok_or(CoreError::MissingField { field: ID_FILE_FIELD })?,
        })
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, CoreError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(CoreError::MissingField { field })
}

/// Response body of `POST /api/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SubmissionReceipt {
    pub message: String,
    pub data: SubmissionRecord,
}

impl From<SubmissionRecord> for SubmissionReceipt {
    fn from(data: SubmissionRecord) -> Self {
        Self {
            message: SUBMISSION_MESSAGE.to_owned(),
            data,
        }
    }
}
