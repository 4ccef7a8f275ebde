//! anki-template CLI entry point.
//!
//! Command-line tools for Anki card templates:
//! - `anki-template render` - Render both sides of a card
//! - `anki-template side` - Render a single template
//! - `anki-template check` - Validate template files
//! - `anki-template cloze` - List the cloze deletions in a field

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    CheckArgs, ClozeArgs, RenderArgs, SideArgs, run_check, run_cloze, run_render, run_side,
};
use tracing_subscriber::EnvFilter;

/// Anki card template tools.
#[derive(Debug, Parser)]
#[command(name = "anki-template")]
#[command(about = "Render and check Anki card templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(
        long,
        value_enum,
        default_value_t = ColorWhen::Auto,
        global = true,
        env = "ANKI_TEMPLATE_COLOR"
    )]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the question and answer of a card
    Render(RenderArgs),
    /// Render one side of a card from a single template
    Side(SideArgs),
    /// Check template files for syntax errors
    Check(CheckArgs),
    /// List the cloze deletions in a field value
    Cloze(ClozeArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` wins unless `--verbose` is given.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Side(args) => run_side(args),
        Commands::Check(args) => run_check(args),
        Commands::Cloze(args) => run_cloze(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
