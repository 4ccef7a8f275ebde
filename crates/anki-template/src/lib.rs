pub mod api;
pub mod parser;
pub mod render;

pub use api::{count_cloze_cards, render_card, render_cloze_card, render_template, version};
pub use parser::{Node, ParseError, Side, Template, parse_template};
pub use render::{
    CardRender, CardRenderer, ClozeSpan, FieldMap, FilterKind, RenderContext, RenderError,
    TemplateCache, eval_template,
};

/// Creates a [`FieldMap`] from key-value pairs.
///
/// Keys and values may be anything with a `ToString` implementation.
///
/// # Example
///
/// ```
/// use anki_template::fields;
///
/// let f = fields! { "Front" => "Question", "Back" => "Answer" };
/// assert_eq!(f.len(), 2);
/// assert_eq!(f["Front"], "Question");
/// ```
#[macro_export]
macro_rules! fields {
    {} => {
        $crate::FieldMap::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::FieldMap::new();
            $(
                map.insert($key.to_string(), $value.to_string());
            )+
            map
        }
    };
}
