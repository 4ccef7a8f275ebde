//! Implementation of the `anki-template side` command.

use anki_template::{CardRenderer, Side};
use serde::Serialize;

use super::{FieldArgs, report_render_error};

/// Arguments for the side command.
#[derive(Debug, clap::Args)]
pub struct SideArgs {
    /// Template to render
    #[arg(long, required = true)]
    pub template: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Cloze ordinal of the card (0 for cards that are not cloze cards)
    #[arg(long, default_value_t = 0)]
    pub ordinal: u32,

    /// Render the answer side instead of the question side
    #[arg(long)]
    pub answer: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for side results.
#[derive(Serialize)]
pub struct SideResult {
    pub side: String,
    pub result: String,
}

/// Run the side command.
pub fn run_side(args: SideArgs) -> miette::Result<i32> {
    let fields = match args.fields.load() {
        Ok(fields) => fields,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(e.exit_code());
        }
    };

    let side = if args.answer {
        Side::Answer
    } else {
        Side::Question
    };

    match CardRenderer::uncached().render_side(&args.template, &fields, args.ordinal, side) {
        Ok(result) => {
            if args.json {
                let output = SideResult {
                    side: side.to_string(),
                    result,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                println!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            report_render_error(&e, &[("<template>", args.template.as_str())], args.json);
            Ok(exitcode::DATAERR)
        }
    }
}
