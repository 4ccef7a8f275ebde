//! Public AST types for card templates.
//!
//! These types are public so tooling can inspect a template without
//! rendering it.

use std::{fmt, mem};

use crate::render::FilterKind;

/// A parsed template: the top-level sequence of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub nodes: Vec<Node>,
}

/// A node within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, copied to the output verbatim.
    Text(String),
    /// A field substitution: `{{Name}}` or `{{filter:...:Name}}`.
    ///
    /// Filters are stored in source order and applied right to left, so
    /// `{{hint:text:Name}}` strips markup first and then wraps the result.
    Field {
        name: String,
        filters: Vec<FilterKind>,
    },
    /// A conditional block: `{{#Name}}...{{/Name}}` or `{{^Name}}...{{/Name}}`.
    Section {
        name: String,
        negated: bool,
        body: Vec<Node>,
    },
}

impl Template {
    /// Returns true if the template has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Names of every field the template references, each listed once.
    ///
    /// Section names count as references. Names at an outer level are listed
    /// before names found inside the sections at that level.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut pending: Vec<&[Node]> = vec![&self.nodes];
        while let Some(nodes) = pending.pop() {
            for node in nodes {
                let name = match node {
                    Node::Text(_) => continue,
                    Node::Field { name, .. } => name.as_str(),
                    Node::Section { name, body, .. } => {
                        pending.push(body);
                        name.as_str()
                    }
                };
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl Drop for Node {
    /// Moves nested section bodies onto a work list before dropping, so
    /// very deep sections are freed without recursion wherever the node
    /// lives.
    fn drop(&mut self) {
        let Node::Section { body, .. } = self else {
            return;
        };
        let mut pending = mem::take(body);
        while let Some(mut node) = pending.pop() {
            if let Node::Section { body, .. } = &mut node {
                pending.append(body);
            }
        }
    }
}

/// Which face of a card is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Question,
    Answer,
}

impl Side {
    /// Maps the `is_question` flag used at the binding boundary.
    pub fn from_is_question(is_question: bool) -> Self {
        if is_question {
            Side::Question
        } else {
            Side::Answer
        }
    }

    pub fn is_question(self) -> bool {
        self == Side::Question
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Question => f.write_str("question"),
            Side::Answer => f.write_str("answer"),
        }
    }
}
