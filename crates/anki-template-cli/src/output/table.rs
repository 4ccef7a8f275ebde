//! Table formatting utilities for CLI output.

use anki_template::ClozeSpan;
use comfy_table::{ContentArrangement, Table, presets};

/// The deletions of one cloze ordinal, i.e. one generated card.
pub struct ClozeCard {
    /// 1-based card ordinal.
    pub ordinal: u32,
    /// Answers blanked on this card, in document order.
    pub answers: Vec<String>,
    /// Hints given for those answers.
    pub hints: Vec<String>,
}

/// Group spans by ordinal, ascending.
pub fn group_by_ordinal(spans: &[ClozeSpan]) -> Vec<ClozeCard> {
    let mut cards: Vec<ClozeCard> = Vec::new();
    for span in spans {
        let index = match cards.binary_search_by_key(&span.ordinal, |card| card.ordinal) {
            Ok(index) => index,
            Err(index) => {
                cards.insert(
                    index,
                    ClozeCard {
                        ordinal: span.ordinal,
                        answers: Vec::new(),
                        hints: Vec::new(),
                    },
                );
                index
            }
        };
        cards[index].answers.push(span.answer.clone());
        if let Some(hint) = &span.hint {
            cards[index].hints.push(hint.clone());
        }
    }
    cards
}

/// Format cloze cards as an ASCII table.
pub fn format_cloze_table(cards: &[ClozeCard]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Card", "Deletions", "Answers", "Hints"]);

    for card in cards {
        table.add_row(vec![
            format!("c{}", card.ordinal),
            card.answers.len().to_string(),
            card.answers.join(" | "),
            card.hints.join(" | "),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use anki_template::render::cloze::extract_spans;

    use super::*;

    #[test]
    fn test_groups_spans_in_ordinal_order() {
        let spans = extract_spans("{{c2::b}} {{c1::a::first}} {{c2::c}}");
        let cards = group_by_ordinal(&spans);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].ordinal, 1);
        assert_eq!(cards[0].answers, vec!["a"]);
        assert_eq!(cards[0].hints, vec!["first"]);
        assert_eq!(cards[1].ordinal, 2);
        assert_eq!(cards[1].answers, vec!["b", "c"]);
        assert!(cards[1].hints.is_empty());
    }

    #[test]
    fn test_table_has_a_row_per_card() {
        let spans = extract_spans("{{c1::a}} {{c2::b}}");
        let table = format_cloze_table(&group_by_ordinal(&spans));
        let rendered = table.to_string();
        assert!(rendered.contains("c1"));
        assert!(rendered.contains("c2"));
        assert!(rendered.contains("Answers"));
    }
}
