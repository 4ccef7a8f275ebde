//! Field filters.
//!
//! Filters form a closed set: each keyword maps to one [`FilterKind`]
//! variant and one function, and dispatch is an exhaustive `match`.

use std::fmt;
use std::sync::LazyLock;

use const_fnv1a_hash::fnv1a_hash_str_64;
use regex::Regex;

use crate::render::RenderContext;
use crate::render::cloze::render_cloze_field;

/// Class marking a hint's content as hidden.
pub const HINT_HIDDEN_CLASS: &str = "hint-hidden";
/// Class a front end swaps in for [`HINT_HIDDEN_CLASS`] once the hint is opened.
pub const HINT_VISIBLE_CLASS: &str = "hint-visible";

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</br>").expect("line break pattern is valid"));

/// `base[reading]`, where the base is a run without whitespace, brackets or
/// angle brackets.
static BRACKET_RUBY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\s\[\]<>]+)\[([^\]]+)\]").expect("bracket ruby pattern is valid")
});

/// `<ruby>base<rt>reading</rt></ruby>`
static HTML_RUBY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<ruby>([^<]*)<rt>([^<]*)</rt></ruby>").expect("ruby pattern is valid")
});

/// A named transform applied to a field value before insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// `text:` strips HTML tags.
    Text,
    /// `hint:` wraps the value in a click-to-reveal disclosure.
    Hint,
    /// `cloze:` renders cloze deletions for the active card.
    Cloze,
    /// `furigana:` turns `base[reading]` into ruby annotations.
    Furigana,
    /// `type:` emits a type-in-the-answer input.
    Type,
    /// `kanji:` keeps only the base of ruby annotations.
    Kanji,
    /// `kana:` keeps only the reading of ruby annotations.
    Kana,
}

impl FilterKind {
    /// Every supported filter keyword.
    pub const KEYWORDS: &'static [&'static str] =
        &["text", "hint", "cloze", "furigana", "type", "kanji", "kana"];

    /// Look up a filter by its template keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "text" => Some(FilterKind::Text),
            "hint" => Some(FilterKind::Hint),
            "cloze" => Some(FilterKind::Cloze),
            "furigana" => Some(FilterKind::Furigana),
            "type" => Some(FilterKind::Type),
            "kanji" => Some(FilterKind::Kanji),
            "kana" => Some(FilterKind::Kana),
            _ => None,
        }
    }

    /// The keyword used for this filter in templates.
    pub fn keyword(self) -> &'static str {
        match self {
            FilterKind::Text => "text",
            FilterKind::Hint => "hint",
            FilterKind::Cloze => "cloze",
            FilterKind::Furigana => "furigana",
            FilterKind::Type => "type",
            FilterKind::Kanji => "kanji",
            FilterKind::Kana => "kana",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Apply one filter to a field value.
///
/// `field_name` is the field the value came from; `ctx` supplies the card
/// ordinal and side for the cloze filter.
pub fn apply_filter(
    kind: FilterKind,
    value: &str,
    field_name: &str,
    ctx: &RenderContext<'_>,
) -> String {
    match kind {
        FilterKind::Text => strip_html(value),
        FilterKind::Hint => hint(value, field_name),
        FilterKind::Cloze => render_cloze_field(value, ctx.card_ordinal(), ctx.side()),
        FilterKind::Furigana => furigana(value),
        FilterKind::Type => type_answer(value, field_name),
        FilterKind::Kanji => kanji(value),
        FilterKind::Kana => kana(value),
    }
}

/// Line breaks become newlines, every other tag is removed.
fn strip_html(value: &str) -> String {
    let value = LINE_BREAK.replace_all(value, "\n");
    HTML_TAG.replace_all(&value, "").into_owned()
}

fn hint(value: &str, field_name: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let id = fnv1a_hash_str_64(&format!("{field_name}\u{1f}{value}"));
    format!(
        "<a class=\"hint\" href=\"#\" data-hint-target=\"hint{id:016x}\" \
         data-visible-class=\"{HINT_VISIBLE_CLASS}\">Show Hint</a>\
         <div id=\"hint{id:016x}\" class=\"hint-content {HINT_HIDDEN_CLASS}\">{value}</div>"
    )
}

fn type_answer(value: &str, field_name: &str) -> String {
    format!(
        "<input type=\"text\" id=\"typeans\" class=\"type-answer\" data-field=\"{}\" data-expected=\"{}\"/>",
        htmlescape::encode_attribute(field_name),
        htmlescape::encode_attribute(value)
    )
}

fn furigana(value: &str) -> String {
    BRACKET_RUBY
        .replace_all(value, "<ruby>$1<rt>$2</rt></ruby>")
        .into_owned()
}

fn kanji(value: &str) -> String {
    let value = HTML_RUBY.replace_all(value, "$1");
    BRACKET_RUBY.replace_all(&value, "$1").into_owned()
}

fn kana(value: &str) -> String {
    let value = HTML_RUBY.replace_all(value, "$2");
    BRACKET_RUBY.replace_all(&value, "$2").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Side;
    use crate::render::FieldMap;

    fn apply(kind: FilterKind, value: &str) -> String {
        let fields = FieldMap::new();
        let ctx = RenderContext::new(&fields, 1, Side::Question);
        apply_filter(kind, value, "Field", &ctx)
    }

    // text

    #[test]
    fn test_text_strips_html() {
        assert_eq!(apply(FilterKind::Text, "<b>Bold</b> text"), "Bold text");
        assert_eq!(
            apply(
                FilterKind::Text,
                "<div class=\"foo\"><span>Hello</span> <em>World</em></div>"
            ),
            "Hello World"
        );
    }

    #[test]
    fn test_text_turns_line_breaks_into_newlines() {
        assert_eq!(apply(FilterKind::Text, "Line1<br>Line2"), "Line1\nLine2");
        assert_eq!(apply(FilterKind::Text, "Line1<br/>Line2"), "Line1\nLine2");
        assert_eq!(apply(FilterKind::Text, "Line1<BR />Line2"), "Line1\nLine2");
    }

    #[test]
    fn test_text_leaves_entities_alone() {
        assert_eq!(apply(FilterKind::Text, "a &amp; <i>b</i>"), "a &amp; b");
    }

    // hint

    #[test]
    fn test_hint_has_label_and_hidden_content() {
        let result = apply(FilterKind::Hint, "The answer");
        assert!(result.contains("Show Hint"));
        assert!(result.contains(">The answer</div>"));
        assert!(result.contains(HINT_HIDDEN_CLASS));
        assert!(result.contains(&format!("data-visible-class=\"{HINT_VISIBLE_CLASS}\"")));
    }

    #[test]
    fn test_hint_label_targets_its_content() {
        let result = apply(FilterKind::Hint, "The answer");
        let id = fnv1a_hash_str_64("Field\u{1f}The answer");
        assert!(result.contains(&format!("data-hint-target=\"hint{id:016x}\"")));
        assert!(result.contains(&format!("id=\"hint{id:016x}\"")));
    }

    #[test]
    fn test_hint_of_empty_value_is_empty() {
        assert_eq!(apply(FilterKind::Hint, ""), "");
    }

    // type

    #[test]
    fn test_type_creates_input() {
        let result = apply(FilterKind::Type, "answer");
        assert!(result.contains("<input"));
        assert!(result.contains("type=\"text\""));
        assert!(result.contains("data-expected=\"answer\""));
    }

    #[test]
    fn test_type_escapes_attribute() {
        let result = apply(FilterKind::Type, "<script>alert(1)</script>");
        assert!(result.contains("&lt;script&gt;"));
        assert!(!result.contains("<script>"));
    }

    // furigana, kanji, kana

    #[test]
    fn test_furigana_bracket_to_ruby() {
        assert_eq!(
            apply(FilterKind::Furigana, "漢字[かんじ]"),
            "<ruby>漢字<rt>かんじ</rt></ruby>"
        );
    }

    #[test]
    fn test_furigana_keeps_surrounding_text() {
        assert_eq!(
            apply(FilterKind::Furigana, "私は 日本語[にほんご]を 勉強[べんきょう]"),
            "私は <ruby>日本語<rt>にほんご</rt></ruby>を <ruby>勉強<rt>べんきょう</rt></ruby>"
        );
    }

    #[test]
    fn test_furigana_preserves_existing_ruby() {
        let input = "<ruby>漢字<rt>かんじ</rt></ruby>";
        assert_eq!(apply(FilterKind::Furigana, input), input);
    }

    #[test]
    fn test_furigana_base_stops_at_markup() {
        assert_eq!(
            apply(FilterKind::Furigana, "<b>漢字[かんじ]</b>"),
            "<b><ruby>漢字<rt>かんじ</rt></ruby></b>"
        );
    }

    #[test]
    fn test_kanji_and_kana_split_annotations() {
        assert_eq!(apply(FilterKind::Kanji, "漢字[かんじ]"), "漢字");
        assert_eq!(apply(FilterKind::Kana, "漢字[かんじ]"), "かんじ");
        assert_eq!(
            apply(FilterKind::Kanji, "<ruby>漢字<rt>かんじ</rt></ruby>"),
            "漢字"
        );
        assert_eq!(
            apply(FilterKind::Kana, "<ruby>漢字<rt>かんじ</rt></ruby>"),
            "かんじ"
        );
    }

    // keywords

    #[test]
    fn test_keywords_round_trip() {
        for keyword in FilterKind::KEYWORDS {
            let kind = FilterKind::from_keyword(keyword).unwrap();
            assert_eq!(kind.keyword(), *keyword);
        }
        assert_eq!(FilterKind::from_keyword("tts"), None);
    }
}
