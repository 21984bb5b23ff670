//! Error types for card-template.

use thiserror::Error;

/// Result type alias using RenderError.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that abort a render.
///
/// An invalid card (no field reference satisfied on the front) is not an
/// error; it is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("directive pattern `{pattern}` matched without capture group `{group}`")]
    MalformedDirective {
        pattern: &'static str,
        group: &'static str,
    },

    #[error("invalid directive pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("card position {0} does not fit in an ordinal")]
    OrdinalOutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_directive_display() {
        let error = RenderError::MalformedDirective {
            pattern: "cloze",
            group: "index",
        };
        assert_eq!(
            error.to_string(),
            "directive pattern `cloze` matched without capture group `index`"
        );
    }

    #[test]
    fn invalid_pattern_from_regex_error() {
        let error: RenderError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(error, RenderError::InvalidPattern(_)));
        assert!(error.to_string().starts_with("invalid directive pattern"));
    }

    #[test]
    fn ordinal_out_of_range_display() {
        let error = RenderError::OrdinalOutOfRange(5_000_000_000);
        assert_eq!(
            error.to_string(),
            "card position 5000000000 does not fit in an ordinal"
        );
    }
}
