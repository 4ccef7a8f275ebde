//! Implementation of the `anki-template render` command.

use anki_template::{CardRender, CardRenderer};
use serde::Serialize;
use tracing::debug;

use super::{FieldArgs, report_render_error};

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Front (question) template
    #[arg(long, required = true)]
    pub front: String,

    /// Back (answer) template
    #[arg(long, required = true)]
    pub back: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Cloze ordinal of the card (0 for cards that are not cloze cards)
    #[arg(long, default_value_t = 0, conflicts_with = "cloze_field")]
    pub ordinal: u32,

    /// Render every card generated by the cloze deletions in this field
    #[arg(long, value_name = "FIELD")]
    pub cloze_field: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one card of a cloze note.
#[derive(Serialize)]
pub struct RenderedCard {
    pub ordinal: u32,
    #[serde(flatten)]
    pub card: CardRender,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let fields = match args.fields.load() {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(e.exit_code());
        }
    };

    let renderer = CardRenderer::new();
    let result = match &args.cloze_field {
        Some(cloze_field) => {
            renderer.render_cloze_cards(&args.front, &args.back, &fields, cloze_field)
        }
        None => renderer
            .render_card(&args.front, &args.back, &fields, args.ordinal)
            .map(|card| vec![(args.ordinal, card)]),
    };

    let cards = match result {
        Ok(cards) => cards,
        Err(e) => {
            report_render_error(
                &e,
                &[
                    ("<question template>", args.front.as_str()),
                    ("<answer template>", args.back.as_str()),
                ],
                args.json,
            );
            return Ok(exitcode::DATAERR);
        }
    };

    debug!(cards = cards.len(), "rendered");

    if args.json {
        let json = if args.cloze_field.is_some() {
            let output: Vec<RenderedCard> = cards
                .into_iter()
                .map(|(ordinal, card)| RenderedCard { ordinal, card })
                .collect();
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string_pretty(&cards.first().map(|(_, card)| card))
        };
        println!("{}", json.expect("JSON serialization should not fail"));
    } else {
        for (i, (ordinal, card)) in cards.iter().enumerate() {
            if i > 0 {
                println!();
            }
            if args.cloze_field.is_some() {
                println!("== c{} ==", ordinal);
            }
            println!("{}", card.question);
            println!("---");
            println!("{}", card.answer);
        }
    }

    Ok(exitcode::OK)
}
