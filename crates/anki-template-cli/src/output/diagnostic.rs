//! Miette diagnostic wrapper for template parse errors.

use anki_template::ParseError;
use anki_template::render::FilterKind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for template parse errors.
///
/// Fields are read by the miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("template error: {message}")]
#[diagnostic(code(anki_template::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    ///
    /// `name` is shown as the source's name: a file path, or a description
    /// such as `<question template>` for inline templates.
    pub fn from_parse_error(name: &str, content: &str, err: &ParseError) -> Self {
        let (line, column) = err.position();

        // Convert line:column to byte offset.
        let offset = content
            .split('\n')
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp to content length to avoid a miette panic on out-of-bounds spans
        let offset = offset.min(content.len());
        let len = if content[offset..].starts_with("{{") { 2 } else { 0 };

        TemplateDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, len).into(),
            message: err.to_string(),
            help: help_for(err),
        }
    }
}

fn help_for(err: &ParseError) -> Option<String> {
    match err {
        ParseError::UnterminatedTag { .. } => Some("close the tag with '}}'".to_string()),
        ParseError::UnterminatedSection { name, .. } => {
            Some(format!("add '{{{{/{name}}}}}' after the section body"))
        }
        ParseError::MismatchedClose { expected, .. } => {
            Some(format!("the innermost open section is '{expected}'"))
        }
        ParseError::UnknownFilter { suggestions, .. } if suggestions.is_empty() => Some(format!(
            "supported filters: {}",
            FilterKind::KEYWORDS.join(", ")
        )),
        ParseError::UnknownFilter { suggestions, .. } => {
            Some(format!("did you mean: {}?", suggestions.join(", ")))
        }
        ParseError::UnexpectedClose { .. } | ParseError::EmptyTag { .. } => None,
    }
}
