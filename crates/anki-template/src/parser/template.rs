//! Template parser.
//!
//! Turns the scanner's token stream into a [`Template`]. Sections are
//! tracked with an explicit stack of open frames rather than recursion, so
//! nesting depth is bounded only by memory.

use strsim::levenshtein;

use super::ast::{Node, Template};
use super::error::ParseError;
use super::lexer::{Token, position_at, tokenize};
use crate::render::FilterKind;

/// Parse a template string into an AST.
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let tokens = tokenize(input)?;
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => {
                current_body(&mut root, &mut stack).push(Node::Text(text.to_string()));
            }
            Token::Tag { body, offset } => match classify_tag(body.trim(), input, offset)? {
                TagKind::Open { name, negated } => stack.push(Frame {
                    name,
                    negated,
                    body: Vec::new(),
                    offset,
                }),
                TagKind::Close { name } => {
                    let Some(frame) = stack.pop() else {
                        let (line, column) = position_at(input, offset);
                        return Err(ParseError::UnexpectedClose { name, line, column });
                    };
                    if frame.name != name {
                        let (line, column) = position_at(input, offset);
                        return Err(ParseError::MismatchedClose {
                            expected: frame.name,
                            found: name,
                            line,
                            column,
                        });
                    }
                    current_body(&mut root, &mut stack).push(Node::Section {
                        name: frame.name,
                        negated: frame.negated,
                        body: frame.body,
                    });
                }
                TagKind::Field { name, filters } => {
                    current_body(&mut root, &mut stack).push(Node::Field { name, filters });
                }
            },
        }
    }

    if let Some(frame) = stack.pop() {
        let (line, column) = position_at(input, frame.offset);
        return Err(ParseError::UnterminatedSection {
            name: frame.name,
            line,
            column,
        });
    }

    Ok(Template { nodes: root })
}

/// An open section awaiting its close tag.
struct Frame {
    name: String,
    negated: bool,
    body: Vec<Node>,
    /// Offset of the open tag, for error reporting.
    offset: usize,
}

/// What a tag body means.
enum TagKind {
    Open { name: String, negated: bool },
    Close { name: String },
    Field { name: String, filters: Vec<FilterKind> },
}

/// The node list new nodes are appended to: the innermost open section's
/// body, or the root.
fn current_body<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Frame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => &mut frame.body,
        None => root,
    }
}

/// Classify a trimmed tag body.
fn classify_tag(body: &str, source: &str, offset: usize) -> Result<TagKind, ParseError> {
    let empty_tag = || {
        let (line, column) = position_at(source, offset);
        ParseError::EmptyTag { line, column }
    };

    if let Some(rest) = body.strip_prefix('#') {
        let name = section_name(rest).ok_or_else(empty_tag)?;
        return Ok(TagKind::Open {
            name,
            negated: false,
        });
    }
    if let Some(rest) = body.strip_prefix('^') {
        let name = section_name(rest).ok_or_else(empty_tag)?;
        return Ok(TagKind::Open {
            name,
            negated: true,
        });
    }
    if let Some(rest) = body.strip_prefix('/') {
        let name = section_name(rest).ok_or_else(empty_tag)?;
        return Ok(TagKind::Close { name });
    }

    // filter1:filter2:Name
    let mut segments: Vec<&str> = body.split(':').collect();
    let name = segments.pop().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(empty_tag());
    }

    let mut filters = Vec::with_capacity(segments.len());
    for keyword in segments {
        let keyword = keyword.trim();
        let Some(kind) = FilterKind::from_keyword(keyword) else {
            let (line, column) = position_at(source, offset);
            return Err(ParseError::UnknownFilter {
                name: keyword.to_string(),
                suggestions: compute_suggestions(keyword, FilterKind::KEYWORDS),
                line,
                column,
            });
        };
        filters.push(kind);
    }

    Ok(TagKind::Field {
        name: name.to_string(),
        filters,
    })
}

fn section_name(rest: &str) -> Option<String> {
    let name = rest.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Compute typo suggestions for an unknown filter keyword.
///
/// Candidates within a small edit distance, closest first, at most three.
fn compute_suggestions(name: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, (*candidate).to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
