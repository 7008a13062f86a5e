use std::fmt;

use serde::Serialize;

/// Outcome of a mocked user-verification lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VerificationStatus {
    /// The address contains `verified`.
    Verified,
    /// The address contains `pending` but not `verified`.
    Pending,
    /// Neither marker is present.
    #[serde(rename = "Not Found")]
    NotFound,
}

impl VerificationStatus {
    /// Classifies an email address by case-insensitive substring match.
    ///
    /// `verified` is checked before `pending`, so an address containing
    /// both is [`VerificationStatus::Verified`].
    #[must_use]
    pub fn classify(email: &str) -> Self {
        let lowered = email.to_lowercase();
        if lowered.contains("verified") {
            Self::Verified
        } else if lowered.contains("pending") {
            Self::Pending
        } else {
            Self::NotFound
        }
    }

    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Pending => "Pending",
            Self::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /api/user-verification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct VerificationResult {
    /// Classification of `email`.
    pub status: VerificationStatus,
    /// The queried address, exactly as supplied.
    pub email: String,
}

impl VerificationResult {
    /// Runs the lookup for `email`. The address is echoed back unmodified.
    pub fn lookup(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            status: VerificationStatus::classify(&email),
            email,
        }
    }
}
