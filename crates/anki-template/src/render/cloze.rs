//! Cloze deletion extraction and rendering.
//!
//! A cloze deletion is written `{{cN::answer}}` or `{{cN::answer::hint}}`
//! inside a field value, where `N` is the 1-based ordinal of the card that
//! blanks it out. Several deletions may share an ordinal; they are blanked
//! and revealed together.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::Side;

/// Class placed on the active deletion, masked or revealed.
pub const CLOZE_CLASS: &str = "cloze";

static CLOZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{c([1-9][0-9]*)::([^}]*?)(?:::([^}]*?))?\}\}").expect("cloze pattern is valid")
});

/// One cloze deletion found in a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClozeSpan {
    /// 1-based card ordinal.
    pub ordinal: u32,
    /// The deleted text.
    pub answer: String,
    /// Optional hint shown in place of `...` on the question side.
    pub hint: Option<String>,
}

/// A deletion borrowed from the field value, with its byte range.
struct Occurrence<'a> {
    range: Range<usize>,
    ordinal: u32,
    answer: &'a str,
    hint: Option<&'a str>,
}

fn occurrences(raw: &str) -> impl Iterator<Item = Occurrence<'_>> {
    CLOZE_PATTERN.captures_iter(raw).filter_map(|caps| {
        let whole = caps.get(0)?;
        // Ordinals that overflow u32 are left in the text as written.
        let ordinal = caps[1].parse::<u32>().ok()?;
        Some(Occurrence {
            range: whole.range(),
            ordinal,
            answer: caps.get(2).map_or("", |m| m.as_str()),
            hint: caps
                .get(3)
                .map(|m| m.as_str())
                .filter(|hint| !hint.is_empty()),
        })
    })
}

/// Every deletion in `raw`, in document order. Repeated ordinals are kept.
pub fn extract_spans(raw: &str) -> Vec<ClozeSpan> {
    occurrences(raw)
        .map(|o| ClozeSpan {
            ordinal: o.ordinal,
            answer: o.answer.to_string(),
            hint: o.hint.map(ToString::to_string),
        })
        .collect()
}

/// The distinct ordinals used in `raw`, ascending.
pub fn ordinals(raw: &str) -> BTreeSet<u32> {
    occurrences(raw).map(|o| o.ordinal).collect()
}

/// Number of distinct ordinals in `raw`, i.e. how many cards it generates.
pub fn count_ordinals(raw: &str) -> u32 {
    u32::try_from(ordinals(raw).len()).unwrap_or(u32::MAX)
}

/// Render `raw` for card `target` on the given side.
///
/// Deletions with the target ordinal are masked on the question side and
/// highlighted on the answer side. All other deletions show their answer as
/// plain text. When nothing matches `target` (including `target == 0`),
/// every deletion is shown as plain text.
pub fn render_cloze_field(raw: &str, target: u32, side: Side) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut last = 0;

    for occurrence in occurrences(raw) {
        output.push_str(&raw[last..occurrence.range.start]);
        last = occurrence.range.end;

        if occurrence.ordinal != target {
            output.push_str(occurrence.answer);
            continue;
        }

        let shown = match side {
            Side::Question => format!("[{}]", occurrence.hint.unwrap_or("...")),
            Side::Answer => occurrence.answer.to_string(),
        };
        output.push_str(&format!("<span class=\"{CLOZE_CLASS}\">{shown}</span>"));
    }

    output.push_str(&raw[last..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPITAL: &str = "{{c1::Paris}} is the capital of {{c2::France}}";

    #[test]
    fn test_question_masks_target_only() {
        assert_eq!(
            render_cloze_field(CAPITAL, 1, Side::Question),
            "<span class=\"cloze\">[...]</span> is the capital of France"
        );
        assert_eq!(
            render_cloze_field(CAPITAL, 2, Side::Question),
            "Paris is the capital of <span class=\"cloze\">[...]</span>"
        );
    }

    #[test]
    fn test_answer_reveals_target() {
        assert_eq!(
            render_cloze_field(CAPITAL, 1, Side::Answer),
            "<span class=\"cloze\">Paris</span> is the capital of France"
        );
    }

    #[test]
    fn test_hint_replaces_ellipsis_on_question_only() {
        let field = "{{c1::Paris::capital city}} is in France";
        assert_eq!(
            render_cloze_field(field, 1, Side::Question),
            "<span class=\"cloze\">[capital city]</span> is in France"
        );
        assert_eq!(
            render_cloze_field(field, 1, Side::Answer),
            "<span class=\"cloze\">Paris</span> is in France"
        );
    }

    #[test]
    fn test_empty_hint_is_ignored() {
        assert_eq!(
            render_cloze_field("{{c1::Paris::}}", 1, Side::Question),
            "<span class=\"cloze\">[...]</span>"
        );
    }

    #[test]
    fn test_repeated_ordinal_masks_every_occurrence() {
        assert_eq!(
            render_cloze_field("{{c1::word1}} and {{c1::word2}}", 1, Side::Question),
            "<span class=\"cloze\">[...]</span> and <span class=\"cloze\">[...]</span>"
        );
    }

    #[test]
    fn test_missing_target_reveals_everything() {
        assert_eq!(
            render_cloze_field(CAPITAL, 3, Side::Question),
            "Paris is the capital of France"
        );
        assert_eq!(
            render_cloze_field(CAPITAL, 0, Side::Answer),
            "Paris is the capital of France"
        );
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(
            render_cloze_field("Just plain text", 1, Side::Question),
            "Just plain text"
        );
    }

    #[test]
    fn test_zero_ordinal_is_not_a_deletion() {
        assert!(extract_spans("{{c0::nope}}").is_empty());
        assert_eq!(
            render_cloze_field("{{c0::nope}}", 0, Side::Answer),
            "{{c0::nope}}"
        );
    }

    #[test]
    fn test_spans_keep_duplicates_in_order() {
        let spans = extract_spans("{{c2::b}} {{c1::a::hint}} {{c2::c}}");
        assert_eq!(
            spans,
            vec![
                ClozeSpan {
                    ordinal: 2,
                    answer: "b".into(),
                    hint: None
                },
                ClozeSpan {
                    ordinal: 1,
                    answer: "a".into(),
                    hint: Some("hint".into())
                },
                ClozeSpan {
                    ordinal: 2,
                    answer: "c".into(),
                    hint: None
                },
            ]
        );
    }

    #[test]
    fn test_counts_distinct_ordinals() {
        assert_eq!(count_ordinals(CAPITAL), 2);
        assert_eq!(count_ordinals("{{c1::one}} and {{c1::another}}"), 1);
        assert_eq!(count_ordinals("{{c1::a}} {{c2::b}} {{c3::c}} {{c1::d}}"), 3);
        assert_eq!(count_ordinals("plain text"), 0);
    }

    #[test]
    fn test_counts_sparse_ordinals_as_distinct() {
        assert_eq!(count_ordinals("{{c1::a}} {{c5::b}}"), 2);
        assert_eq!(
            ordinals("{{c5::b}} {{c1::a}}").into_iter().collect::<Vec<_>>(),
            vec![1, 5]
        );
    }
}
