//! Template evaluation.
//!
//! Walks a parsed [`Template`] against a [`RenderContext`] and produces the
//! rendered HTML. Evaluation cannot fail: structural problems are rejected
//! by the parser, and missing fields render as the empty string.

use std::slice;

use crate::parser::{Node, Template};
use crate::render::RenderContext;
use crate::render::filters::{FilterKind, apply_filter};

/// Evaluate a template, producing HTML.
///
/// - Text nodes are copied directly to the output
/// - Field nodes resolve their value and apply filters right to left
/// - Sections render their body when the field test passes: non-empty for
///   `{{#Name}}`, absent or empty for `{{^Name}}`
///
/// Section bodies are walked with an explicit stack, so deeply nested
/// templates do not grow the call stack.
pub fn eval_template(template: &Template, ctx: &RenderContext<'_>) -> String {
    let mut output = String::new();
    let mut pending: Vec<slice::Iter<'_, Node>> = vec![template.nodes.iter()];

    while let Some(nodes) = pending.last_mut() {
        let Some(node) = nodes.next() else {
            pending.pop();
            continue;
        };

        match node {
            Node::Text(text) => output.push_str(text),
            Node::Field { name, filters } => eval_field(name, filters, ctx, &mut output),
            Node::Section {
                name,
                negated,
                body,
            } => {
                if ctx.has_content(name) != *negated {
                    pending.push(body.iter());
                }
            }
        }
    }

    output
}

/// Resolve a field and apply its filter chain, innermost (rightmost) first.
fn eval_field(name: &str, filters: &[FilterKind], ctx: &RenderContext<'_>, output: &mut String) {
    let raw = ctx.field(name);
    let Some((innermost, outer)) = filters.split_last() else {
        output.push_str(raw);
        return;
    };

    let mut value = apply_filter(*innermost, raw, name, ctx);
    for filter in outer.iter().rev() {
        value = apply_filter(*filter, &value, name, ctx);
    }
    output.push_str(&value);
}
