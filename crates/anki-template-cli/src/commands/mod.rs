//! CLI command implementations.

mod check;
mod cloze;
mod render;
mod side;

use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};

use anki_template::api::parse_fields;
use anki_template::{FieldMap, RenderError};
use miette::Report;
use thiserror::Error;

use crate::output::diagnostic::TemplateDiagnostic;

pub use check::{CheckArgs, run_check};
pub use cloze::{ClozeArgs, run_cloze};
pub use render::{RenderArgs, run_render};
pub use side::{SideArgs, run_side};

/// Field sources shared by the rendering commands.
#[derive(Debug, clap::Args)]
pub struct FieldArgs {
    /// JSON file holding a flat object of field name to value
    #[arg(long = "fields", value_name = "FILE")]
    pub fields_file: Option<PathBuf>,

    /// Field in name=value format (repeatable, overrides --fields)
    #[arg(short = 'f', long = "field", value_parser = parse_key_val)]
    pub fields: Vec<(String, String)>,
}

/// Failures a command reports before rendering starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bad fields file {}: {source}", path.display())]
    Fields {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl InputError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            InputError::Io { .. } => exitcode::NOINPUT,
            InputError::Fields { .. } => exitcode::DATAERR,
        }
    }
}

impl FieldArgs {
    /// Build the field map: the JSON file first, then `-f` pairs on top.
    pub fn load(self) -> Result<FieldMap, InputError> {
        let mut fields = match &self.fields_file {
            Some(path) => load_fields_file(path)?,
            None => FieldMap::new(),
        };
        fields.extend(self.fields);
        Ok(fields)
    }
}

fn load_fields_file(path: &Path) -> Result<FieldMap, InputError> {
    let content = read_file(path)?;
    parse_fields(&content).map_err(|source| InputError::Fields {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a UTF-8 file.
pub(crate) fn read_file(path: &Path) -> Result<String, InputError> {
    read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a key=value field string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid field format '{}': expected name=value", s))?;
    Ok((key.to_string(), value.to_string()))
}

/// Print a render failure, with source context when a template failed to
/// parse. `templates` pairs each template's display name with its text, in
/// question/answer order.
pub(crate) fn report_render_error(err: &RenderError, templates: &[(&str, &str)], json: bool) {
    if json {
        let output = serde_json::json!({ "error": err.to_string() });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&output).expect("JSON serialization should not fail")
        );
        return;
    }

    let source = match err {
        RenderError::CardSide { side, .. } if side.is_question() => templates.first(),
        RenderError::CardSide { .. } => templates.get(1),
        RenderError::Template(_) => templates.first(),
        RenderError::InvalidFields(_) => None,
    };

    match (source, err.parse_error()) {
        (Some((name, content)), Some(parse_error)) => {
            let diagnostic = TemplateDiagnostic::from_parse_error(name, content, parse_error);
            eprintln!("{:?}", Report::new(diagnostic));
        }
        _ => eprintln!("Render error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parses_key_val() {
        assert_eq!(
            parse_key_val("Front=a=b").unwrap(),
            ("Front".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("Front").is_err());
    }

    #[test]
    fn test_pairs_override_fields_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"Front": "from file", "Back": "kept"}}"#).unwrap();
        let args = FieldArgs {
            fields_file: Some(file.path().to_path_buf()),
            fields: vec![("Front".to_string(), "from flag".to_string())],
        };
        let fields = args.load().unwrap();
        assert_eq!(fields["Front"], "from flag");
        assert_eq!(fields["Back"], "kept");
    }

    #[test]
    fn test_bad_fields_file_is_data_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let args = FieldArgs {
            fields_file: Some(file.path().to_path_buf()),
            fields: vec![],
        };
        let err = args.load().unwrap_err();
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn test_missing_fields_file_is_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = FieldArgs {
            fields_file: Some(dir.path().join("missing.json")),
            fields: vec![],
        };
        let err = args.load().unwrap_err();
        assert_eq!(err.exit_code(), exitcode::NOINPUT);
    }
}
