//! Error types for source analysis.

use std::path::PathBuf;

/// Errors that can occur while turning one source file into records.
///
/// Every variant is scoped to a single file. Batch entry points convert
/// these into [`ParseError`](crate::analysis::ParseError) records instead of
/// propagating them, so one bad file never aborts a scan.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to parse {file}: {message}")]
    ParseSyntax { file: String, message: String },

    #[error("failed to parse {file}: {message}")]
    StructuralAssumptionViolation { file: String, message: String },

    #[error("language not available: {0}")]
    Language(String),

    #[error("failed to read {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_syntax_message_names_file() {
        let err = AnalysisError::ParseSyntax {
            file: "Broken.java".to_string(),
            message: "syntax error at 3:5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse Broken.java: syntax error at 3:5"
        );
    }

    #[test]
    fn test_io_error_file() {
        let err = AnalysisError::Io {
            file: PathBuf::from("missing/Foo.java"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("failed to read missing/Foo.java"));
    }
}
