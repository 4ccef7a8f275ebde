//! Implementation of the `anki-template cloze` command.

use anki_template::count_cloze_cards;
use anki_template::render::cloze::extract_spans;
use serde::Serialize;

use crate::output::table::{format_cloze_table, group_by_ordinal};

/// Arguments for the cloze command.
#[derive(Debug, clap::Args)]
pub struct ClozeArgs {
    /// Field content containing cloze deletions
    #[arg(required = true)]
    pub text: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one generated card.
#[derive(Serialize)]
pub struct ClozeCardOutput {
    pub ordinal: u32,
    pub answers: Vec<String>,
    pub hints: Vec<String>,
}

/// JSON output for the cloze command.
#[derive(Serialize)]
pub struct ClozeOutput {
    pub cards: u32,
    pub deletions: Vec<ClozeCardOutput>,
}

/// Run the cloze command.
pub fn run_cloze(args: ClozeArgs) -> miette::Result<i32> {
    let card_count = count_cloze_cards(&args.text);
    let cards = group_by_ordinal(&extract_spans(&args.text));

    if args.json {
        let output = ClozeOutput {
            cards: card_count,
            deletions: cards
                .into_iter()
                .map(|card| ClozeCardOutput {
                    ordinal: card.ordinal,
                    answers: card.answers,
                    hints: card.hints,
                })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("JSON serialization should not fail")
        );
    } else if cards.is_empty() {
        println!("No cloze deletions found.");
    } else {
        println!("{}", format_cloze_table(&cards));
        println!("{} card(s)", card_count);
    }

    Ok(exitcode::OK)
}
