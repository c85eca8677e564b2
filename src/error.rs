//! Error types for the Podium Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only a few of them are fatal for a run (no usable sources, every
//! extraction failed); the others are logged by the component that hits them
//! and the work continues with the next line, rule or source.

use thiserror::Error;

/// The main error type for the Podium Engine.
///
/// # Example
///
/// ```
/// use podium_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/palmares.txt".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/palmares.txt");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No trusted source survived configuration parsing.
    #[error("No valid source URL in the configuration")]
    NoSources,

    /// A rule's rank specification is neither `best`, `start-end` nor a bare integer.
    #[error("Invalid rank specification '{spec}' in rule '{category}'")]
    InvalidRankSpec {
        /// The category of the offending rule.
        category: String,
        /// The raw rank specification.
        spec: String,
    },

    /// A tournament page could not be fetched or understood.
    #[error("Extraction failed for '{url}': {message}")]
    ExtractionFailed {
        /// The source identifier that failed.
        url: String,
        /// A description of the failure.
        message: String,
    },

    /// Every source of a run failed extraction.
    #[error("No tournament processed successfully ({attempted} attempted)")]
    AllSourcesFailed {
        /// How many sources were attempted.
        attempted: usize,
    },

    /// An output document could not be written.
    #[error("Failed to render '{path}': {message}")]
    RenderError {
        /// The output path.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/palmares.txt".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/palmares.txt"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_no_sources_message() {
        assert_eq!(
            EngineError::NoSources.to_string(),
            "No valid source URL in the configuration"
        );
    }

    #[test]
    fn test_invalid_rank_spec_displays_category_and_spec() {
        let error = EngineError::InvalidRankSpec {
            category: "Podium Cadets".to_string(),
            spec: "top3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid rank specification 'top3' in rule 'Podium Cadets'"
        );
    }

    #[test]
    fn test_extraction_failed_displays_source_and_message() {
        let error = EngineError::ExtractionFailed {
            url: "https://echecs.asso.fr/x".to_string(),
            message: "results table not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Extraction failed for 'https://echecs.asso.fr/x': results table not found"
        );
    }

    #[test]
    fn test_all_sources_failed_displays_count() {
        let error = EngineError::AllSourcesFailed { attempted: 3 };
        assert_eq!(
            error.to_string(),
            "No tournament processed successfully (3 attempted)"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_no_sources() -> EngineResult<()> {
            Err(EngineError::NoSources)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_no_sources()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(EngineError::NoSources)));
    }
}
