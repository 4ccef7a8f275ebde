//! Parse error types for card templates.

use thiserror::Error;

/// An error that occurred while parsing a template.
///
/// Every variant carries the 1-based line and column of the tag that
/// triggered it. Parsing never yields a partial template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `{{` without a closing `}}`.
    #[error("unterminated tag at {line}:{column}: missing '}}}}'")]
    UnterminatedTag { line: usize, column: usize },

    /// A section that was opened but never closed.
    #[error("unterminated section '{name}' opened at {line}:{column}")]
    UnterminatedSection {
        name: String,
        line: usize,
        column: usize,
    },

    /// A close tag naming a different field than the innermost open section.
    #[error("mismatched close at {line}:{column}: expected '{{{{/{expected}}}}}', found '{{{{/{found}}}}}'")]
    MismatchedClose {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// A close tag with no open section.
    #[error("unexpected close tag '{{{{/{name}}}}}' at {line}:{column}: no section is open")]
    UnexpectedClose {
        name: String,
        line: usize,
        column: usize,
    },

    /// A tag with no field name, such as `{{}}` or `{{#}}`.
    #[error("empty tag at {line}:{column}")]
    EmptyTag { line: usize, column: usize },

    /// A filter keyword outside the supported set.
    #[error("unknown filter '{name}' at {line}:{column}{}", format_suggestions(suggestions))]
    UnknownFilter {
        name: String,
        suggestions: Vec<String>,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// The 1-based (line, column) the error points at.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::UnterminatedTag { line, column }
            | ParseError::UnterminatedSection { line, column, .. }
            | ParseError::MismatchedClose { line, column, .. }
            | ParseError::UnexpectedClose { line, column, .. }
            | ParseError::EmptyTag { line, column }
            | ParseError::UnknownFilter { line, column, .. } => (*line, *column),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}
