//! Two-pass card rendering.
//!
//! The back of a card usually embeds the rendered front through
//! `{{FrontSide}}`, so the back is rendered after the front, against the
//! caller's fields plus a synthetic `FrontSide` field holding the question.

use std::sync::Arc;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::{ParseError, Side, Template, parse_template};
use crate::render::cache::TemplateCache;
use crate::render::cloze::ordinals;
use crate::render::{FieldMap, RenderContext, RenderError, eval_template};

/// Name of the field the rendered question is exposed as on the back.
pub const FRONT_SIDE_FIELD: &str = "FrontSide";

/// Rendered HTML for both sides of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRender {
    pub question: String,
    pub answer: String,
}

/// Renders cards from front/back template pairs.
///
/// By default parsed templates are cached by their text, so rendering many
/// notes with the same card type parses each template once. The renderer is
/// `Send + Sync` and can be shared between threads.
///
/// # Example
///
/// ```
/// use anki_template::{CardRenderer, fields};
///
/// let renderer = CardRenderer::new();
/// let card = renderer
///     .render_card(
///         "<b>{{Front}}</b>",
///         "{{FrontSide}}<hr>{{Back}}",
///         &fields! { "Front" => "Bold Question", "Back" => "Answer" },
///         0,
///     )
///     .unwrap();
/// assert_eq!(card.question, "<b>Bold Question</b>");
/// assert_eq!(card.answer, "<b>Bold Question</b><hr>Answer");
/// ```
#[derive(Debug, Builder)]
pub struct CardRenderer {
    /// Keep parsed templates between calls.
    #[builder(default = true)]
    cache_templates: bool,

    #[builder(skip)]
    cache: TemplateCache,
}

impl Default for CardRenderer {
    fn default() -> Self {
        CardRenderer::builder().build()
    }
}

impl CardRenderer {
    /// Create a renderer with template caching enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that parses templates on every call.
    pub fn uncached() -> Self {
        CardRenderer::builder().cache_templates(false).build()
    }

    /// The template cache. Empty when caching is disabled.
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Render both sides of a card.
    ///
    /// `card_ordinal` selects the active cloze deletion; pass 0 for cards
    /// that are not cloze cards. Any `FrontSide` entry in `fields` is
    /// replaced by the rendered question when rendering the back.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CardSide`] naming the side whose template
    /// failed to parse. Both templates are parsed before anything is
    /// rendered.
    pub fn render_card(
        &self,
        front: &str,
        back: &str,
        fields: &FieldMap,
        card_ordinal: u32,
    ) -> Result<CardRender, RenderError> {
        let (front, back) = self.card_templates(front, back)?;
        Ok(render_parsed(&front, &back, fields, card_ordinal))
    }

    /// Render every card a cloze note generates, one per distinct ordinal in
    /// `cloze_field`, in ascending ordinal order.
    ///
    /// A note whose cloze field has no deletions generates no cards.
    pub fn render_cloze_cards(
        &self,
        front: &str,
        back: &str,
        fields: &FieldMap,
        cloze_field: &str,
    ) -> Result<Vec<(u32, CardRender)>, RenderError> {
        let (front, back) = self.card_templates(front, back)?;
        let raw = fields.get(cloze_field).map(String::as_str).unwrap_or_default();
        Ok(ordinals(raw)
            .into_iter()
            .map(|ordinal| (ordinal, render_parsed(&front, &back, fields, ordinal)))
            .collect())
    }

    /// Render a single side of a card.
    ///
    /// No `FrontSide` field is added; callers rendering a back template on
    /// its own supply it themselves.
    pub fn render_side(
        &self,
        template: &str,
        fields: &FieldMap,
        card_ordinal: u32,
        side: Side,
    ) -> Result<String, RenderError> {
        let template = self.template(template)?;
        debug!(card_ordinal, %side, "rendering template");
        Ok(eval_template(
            &template,
            &RenderContext::new(fields, card_ordinal, side),
        ))
    }

    fn card_templates(
        &self,
        front: &str,
        back: &str,
    ) -> Result<(Arc<Template>, Arc<Template>), RenderError> {
        let front = self.template(front).map_err(|source| RenderError::CardSide {
            side: Side::Question,
            source,
        })?;
        let back = self.template(back).map_err(|source| RenderError::CardSide {
            side: Side::Answer,
            source,
        })?;
        Ok((front, back))
    }

    fn template(&self, source: &str) -> Result<Arc<Template>, ParseError> {
        if self.cache_templates {
            self.cache.get_or_parse(source)
        } else {
            parse_template(source).map(Arc::new)
        }
    }
}

/// The two evaluation passes over already-parsed templates.
fn render_parsed(
    front: &Template,
    back: &Template,
    fields: &FieldMap,
    card_ordinal: u32,
) -> CardRender {
    debug!(card_ordinal, "rendering card");
    let question = eval_template(
        front,
        &RenderContext::new(fields, card_ordinal, Side::Question),
    );

    let mut back_fields = fields.clone();
    back_fields.insert(FRONT_SIDE_FIELD.to_string(), question.clone());
    let answer = eval_template(
        back,
        &RenderContext::new(&back_fields, card_ordinal, Side::Answer),
    );

    debug!(
        card_ordinal,
        question_len = question.len(),
        answer_len = answer.len(),
        "rendered card"
    );
    CardRender { question, answer }
}
