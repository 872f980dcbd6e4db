use thiserror::Error;

/// Errors that can occur while building a Scenecut parser.
///
/// Parsing itself never fails: every input yields a [`ParsedRelease`],
/// possibly with most fields absent. These errors only surface when a
/// parser is constructed from a broken configuration.
///
/// [`ParsedRelease`]: crate::types::ParsedRelease
#[derive(Debug, Error)]
pub enum ScenecutError {
    /// A vocabulary entry holds a pattern that does not compile.
    #[error("invalid pattern {pattern:?} in {table} vocabulary: {source}")]
    InvalidPattern {
        /// Name of the vocabulary table holding the entry.
        table: &'static str,
        /// The offending pattern text.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A built-in regex failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The configured year range is empty.
    #[error("invalid year range: {min}..={max}")]
    InvalidYearRange {
        /// Lower bound of the range.
        min: u16,
        /// Upper bound of the range.
        max: u16,
    },

    /// A configuration document could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for Scenecut operations.
pub type Result<T> = std::result::Result<T, ScenecutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ScenecutError::InvalidYearRange {
            min: 2100,
            max: 1900,
        };
        assert_eq!(err.to_string(), "invalid year range: 2100..=1900");

        let err = ScenecutError::Config("missing field `pattern`".into());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn invalid_pattern_names_table() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ScenecutError::InvalidPattern {
            table: "source",
            pattern: "(unclosed".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("source vocabulary"));
        assert!(msg.contains("(unclosed"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScenecutError>();
    }
}
