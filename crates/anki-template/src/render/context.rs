//! Render context passed through evaluation.

use std::collections::HashMap;

use crate::parser::Side;

/// Field name to field value, as supplied by the caller.
pub type FieldMap = HashMap<String, String>;

/// Everything the evaluator needs to render one side of a card.
///
/// The context only borrows the field map and is never mutated while a
/// template is being rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    fields: &'a FieldMap,
    card_ordinal: u32,
    side: Side,
}

impl<'a> RenderContext<'a> {
    /// Create a context for rendering `side` of card `card_ordinal`.
    ///
    /// Ordinal 0 means the card is not a cloze card.
    pub fn new(fields: &'a FieldMap, card_ordinal: u32, side: Side) -> Self {
        Self {
            fields,
            card_ordinal,
            side,
        }
    }

    /// Look up a field value. Missing fields read as the empty string.
    pub fn field(&self, name: &str) -> &'a str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Whether a field exists and is non-empty.
    pub fn has_content(&self, name: &str) -> bool {
        !self.field(name).is_empty()
    }

    pub fn fields(&self) -> &'a FieldMap {
        self.fields
    }

    pub fn card_ordinal(&self) -> u32 {
        self.card_ordinal
    }

    pub fn side(&self) -> Side {
        self.side
    }
}
