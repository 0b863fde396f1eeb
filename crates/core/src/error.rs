/// Errors raised while providing, extracting or configuring a scenario.
///
/// Each variant is one failure class a render pass can end with. The simulated stepper has no
/// error path, so nothing here originates from it.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to parse scenario document: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("scenario schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialise scenario: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ScenarioError {
    /// Stable, machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioError::InvalidInput(_) => "invalid_input",
            ScenarioError::Parse(_) => "parse_error",
            ScenarioError::Schema { .. } => "schema_error",
            ScenarioError::Io(_) => "io_error",
            ScenarioError::Serialization(_) => "serialization_error",
        }
    }
}

pub type ScenarioResult<T> = std::result::Result<T, ScenarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_the_failing_path() {
        let err = ScenarioError::Schema {
            path: "OSCE_Examination.Test_Results".into(),
            message: "missing field".into(),
        };
        assert_eq!(err.kind(), "schema_error");
        assert_eq!(
            err.to_string(),
            "scenario schema mismatch at OSCE_Examination.Test_Results: missing field"
        );
    }

    #[test]
    fn parse_error_wraps_serde_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ScenarioError::Parse(source);
        assert_eq!(err.kind(), "parse_error");
        assert!(err.to_string().starts_with("failed to parse scenario document"));
    }
}
