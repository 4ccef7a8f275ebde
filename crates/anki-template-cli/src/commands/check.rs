//! Implementation of the `anki-template check` command.

use std::path::{Path, PathBuf};

use anki_template::parse_template;
use miette::Report;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use super::read_file;
use crate::output::diagnostic::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Fields the template references, when it parsed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());
    let mut exit = exitcode::OK;

    for path in &args.files {
        debug!(file = %path.display(), "checking template");
        let content = match read_file(path) {
            Ok(content) => content,
            Err(e) => {
                reports.push(FileReport {
                    file: path.display().to_string(),
                    ok: false,
                    error: Some(e.to_string()),
                    line: None,
                    column: None,
                    fields: Vec::new(),
                });
                if !args.json {
                    eprintln!("{} {}", "error:".red().bold(), e);
                }
                exit = e.exit_code();
                continue;
            }
        };

        let report = check_content(path, &content, args.json);
        if !report.ok && exit == exitcode::OK {
            exit = exitcode::DATAERR;
        }
        reports.push(report);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).expect("JSON serialization should not fail")
        );
    } else {
        let failed = reports.iter().filter(|r| !r.ok).count();
        if failed == 0 {
            println!("{} {} template(s) OK", "✓".green(), reports.len());
        } else {
            println!(
                "{} {} of {} template(s) failed",
                "✗".red(),
                failed,
                reports.len()
            );
        }
    }

    Ok(exit)
}

/// Parse one template, printing a diagnostic on failure unless `quiet`.
fn check_content(path: &Path, content: &str, quiet: bool) -> FileReport {
    let file = path.display().to_string();
    match parse_template(content) {
        Ok(template) => FileReport {
            file,
            ok: true,
            error: None,
            line: None,
            column: None,
            fields: template
                .field_names()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        },
        Err(err) => {
            if !quiet {
                let diagnostic = TemplateDiagnostic::from_parse_error(&file, content, &err);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            let (line, column) = err.position();
            FileReport {
                file,
                ok: false,
                error: Some(err.to_string()),
                line: Some(line),
                column: Some(column),
                fields: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_reports_fields_of_valid_template() {
        let report = check_content(
            Path::new("front.html"),
            "{{Front}}{{#Extra}}{{hint:Extra}}{{/Extra}}",
            true,
        );
        assert!(report.ok);
        assert_eq!(report.fields, vec!["Front", "Extra"]);
    }

    #[test]
    fn test_reports_position_of_error() {
        let report = check_content(Path::new("back.html"), "{{FrontSide}}\n{{/Back}}", true);
        assert!(!report.ok);
        assert_eq!(report.line, Some(2));
        assert_eq!(report.column, Some(1));
    }

    #[test]
    fn test_checks_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.html");
        let bad = dir.path().join("bad.html");
        fs::write(&good, "{{Front}}").unwrap();
        fs::write(&bad, "{{#Front}}").unwrap();

        let code = run_check(CheckArgs {
            files: vec![good.clone()],
            json: true,
        })
        .unwrap();
        assert_eq!(code, exitcode::OK);

        let code = run_check(CheckArgs {
            files: vec![good, bad],
            json: true,
        })
        .unwrap();
        assert_eq!(code, exitcode::DATAERR);

        let code = run_check(CheckArgs {
            files: vec![dir.path().join("missing.html")],
            json: true,
        })
        .unwrap();
        assert_eq!(code, exitcode::NOINPUT);
    }
}
