use serde::Serialize;

/// Form rules advertised to clients before they submit.
///
/// The rules are informational: submission handling does not enforce
/// `min_age` or `allowed_file_types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ValidationRules {
    /// Minimum applicant age in years.
    pub min_age: u32,
    /// Form fields a submission must carry, in display order.
    pub required_fields: &'static [&'static str],
    /// MIME types accepted for the identity document upload.
    pub allowed_file_types: &'static [&'static str],
}

/// The rules served by `GET /api/validation-rules`.
pub const VALIDATION_RULES: ValidationRules = ValidationRules {
    min_age: 18,
    required_fields: &["name", "email", "dob"],
    allowed_file_types: &["image/png", "image/jpeg", "application/pdf"],
};
