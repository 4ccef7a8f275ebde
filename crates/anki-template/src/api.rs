//! String-in, string-out entry points for host bindings.
//!
//! Fields cross this boundary as a flat JSON object mapping field names to
//! field values. Every function here is stateless: templates are parsed on
//! each call. Use [`CardRenderer`] directly to reuse parsed templates.

use crate::parser::{Side, parse_template};
use crate::render::cloze::count_ordinals;
use crate::render::{CardRender, CardRenderer, FieldMap, RenderContext, RenderError, eval_template};

/// Render a template with the given fields.
///
/// Cloze filters in the template reveal every deletion unmarked, since no
/// card ordinal is active.
///
/// # Errors
///
/// Fails if `fields_json` is not a JSON object of strings or the template
/// does not parse.
pub fn render_template(template: &str, fields_json: &str) -> Result<String, RenderError> {
    render_side(template, fields_json, 0, Side::Question)
}

/// Render one side of a cloze card.
///
/// `card_ord` is the 1-based ordinal of the active deletion and
/// `is_question` selects the question (front) or answer (back) side.
///
/// # Errors
///
/// Same failures as [`render_template`].
pub fn render_cloze_card(
    template: &str,
    fields_json: &str,
    card_ord: u32,
    is_question: bool,
) -> Result<String, RenderError> {
    render_side(
        template,
        fields_json,
        card_ord,
        Side::from_is_question(is_question),
    )
}

/// Render both sides of a card in one call, injecting `FrontSide` for the
/// back. Pass `card_ord = 0` for cards that are not cloze cards.
///
/// # Errors
///
/// Returns [`RenderError::InvalidFields`] for a bad fields payload, or
/// [`RenderError::CardSide`] naming the template that failed to parse.
pub fn render_card(
    front: &str,
    back: &str,
    fields_json: &str,
    card_ord: u32,
) -> Result<CardRender, RenderError> {
    let fields = parse_fields(fields_json)?;
    CardRenderer::uncached().render_card(front, back, &fields, card_ord)
}

/// Number of cards a cloze field generates: its count of distinct ordinals.
pub fn count_cloze_cards(field_content: &str) -> u32 {
    count_ordinals(field_content)
}

/// The library version.
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Decode a fields payload.
///
/// # Errors
///
/// Returns [`RenderError::InvalidFields`] unless `fields_json` is a flat
/// JSON object whose values are all strings.
pub fn parse_fields(fields_json: &str) -> Result<FieldMap, RenderError> {
    Ok(serde_json::from_str(fields_json)?)
}

fn render_side(
    template: &str,
    fields_json: &str,
    card_ord: u32,
    side: Side,
) -> Result<String, RenderError> {
    let fields = parse_fields(fields_json)?;
    let template = parse_template(template)?;
    Ok(eval_template(
        &template,
        &RenderContext::new(&fields, card_ord, side),
    ))
}
