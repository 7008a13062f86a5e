/// Errors produced by the `idv-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A required form field, file part, or query parameter was not supplied.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
}
