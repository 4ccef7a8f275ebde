//! Card template renderer.
//!
//! This module evaluates parsed templates against field values: it resolves
//! field references, applies filters, renders cloze deletions for the active
//! card and orchestrates the question/answer passes of a full card.

mod cache;
mod card;
pub mod cloze;
mod context;
mod error;
mod evaluator;
mod filters;

pub use cache::TemplateCache;
pub use card::{CardRender, CardRenderer, FRONT_SIDE_FIELD};
pub use cloze::ClozeSpan;
pub use context::{FieldMap, RenderContext};
pub use error::RenderError;
pub use evaluator::eval_template;
pub use filters::{FilterKind, HINT_HIDDEN_CLASS, HINT_VISIBLE_CLASS, apply_filter};
