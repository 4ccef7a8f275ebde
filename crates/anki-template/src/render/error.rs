//! Error types for rendering.

use thiserror::Error;

use crate::parser::{ParseError, Side};

/// An error that prevented a render from producing output.
///
/// Rendering never returns partial HTML: every variant is detected before
/// evaluation starts.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template could not be parsed.
    #[error("template error: {0}")]
    Template(#[from] ParseError),

    /// One side of a card could not be parsed.
    #[error("{side} template error: {source}")]
    CardSide {
        side: Side,
        #[source]
        source: ParseError,
    },

    /// The fields payload was not a flat JSON object of strings.
    #[error("Invalid JSON: {0}")]
    InvalidFields(#[from] serde_json::Error),
}

impl RenderError {
    /// The underlying parse error, if this is a template failure.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            RenderError::Template(source) | RenderError::CardSide { source, .. } => Some(source),
            RenderError::InvalidFields(_) => None,
        }
    }
}
