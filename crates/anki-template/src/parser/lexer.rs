//! Template scanner using winnow.
//!
//! Splits a template string into literal text runs and `{{...}}` tags. Tag
//! delimiters do not nest: a tag body runs to the first `}}` after its `{{`.

use winnow::combinator::{alt, delimited};
use winnow::prelude::*;
use winnow::token::{rest, take_until};

use super::error::ParseError;

/// A token produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'i> {
    /// Literal text between tags.
    Text(&'i str),
    /// The raw body of a `{{...}}` tag, untrimmed.
    Tag {
        body: &'i str,
        /// Byte offset of the opening `{{` in the source.
        offset: usize,
    },
}

/// Scan a template into tokens.
///
/// Fails with [`ParseError::UnterminatedTag`] when a `{{` has no matching
/// `}}`.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let mut remaining = input;
    let mut tokens = Vec::new();

    while !remaining.is_empty() {
        let offset = input.len() - remaining.len();
        let token = alt((
            tag_body.map(|body| Token::Tag { body, offset }),
            text.map(Token::Text),
        ))
        .parse_next(&mut remaining);

        match token {
            Ok(token) => tokens.push(token),
            Err(_) => {
                let (line, column) = position_at(input, offset);
                return Err(ParseError::UnterminatedTag { line, column });
            }
        }
    }

    Ok(tokens)
}

/// Parse `{{ body }}`, yielding the body.
fn tag_body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited("{{", take_until(0.., "}}"), "}}").parse_next(input)
}

/// Parse a non-empty literal run up to the next `{{` or the end of input.
fn text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        take_until(1.., "{{"),
        rest.verify(|s: &str| !s.is_empty() && !s.contains("{{")),
    ))
    .parse_next(input)
}

/// Calculate the 1-based line and column of a byte offset in `source`.
pub(crate) fn position_at(source: &str, offset: usize) -> (usize, usize) {
    let consumed = &source[..offset];
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => offset - pos,
        None => offset + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_text_and_tags() {
        let tokens = tokenize("Hello {{Name}}!").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Text("Hello "),
                Token::Tag {
                    body: "Name",
                    offset: 6
                },
                Token::Text("!"),
            ]
        );
    }

    #[test]
    fn test_adjacent_tags() {
        let tokens = tokenize("{{#A}}{{A}}{{/A}}").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[2], Token::Tag { body: "/A", offset: 11 }));
    }

    #[test]
    fn test_stray_close_braces_are_text() {
        let tokens = tokenize("a }} b").unwrap();
        assert_eq!(tokens, vec![Token::Text("a }} b")]);
    }

    #[test]
    fn test_unterminated_tag_reports_position() {
        let err = tokenize("line one\nsee {{Front").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedTag { line: 2, column: 5 });
    }

    #[test]
    fn test_tag_bodies_do_not_nest() {
        let tokens = tokenize("{{a{{b}}").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Tag {
                body: "a{{b",
                offset: 0
            }]
        );
    }
}
