//! # Validate Subcommand
//!
//! Runs template content files through the same validator the service uses
//! on every write, one line per file, then a summary.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use cms_schema::{ContentError, ContentSchema};

/// Arguments for `cms validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Template content files (JSON).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Outcome of validating one file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileReport {
    /// Content is valid; carries the derived template name.
    Valid(String),
    /// Content was rejected.
    Invalid(ContentError),
}

/// Validate a single file.
pub fn validate_file(path: &Path) -> Result<FileReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(match ContentSchema::validate(&content) {
        Ok(validated) => FileReport::Valid(validated.name().to_string()),
        Err(err) => FileReport::Invalid(err),
    })
}

/// Execute `cms validate`.
pub fn run_validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<u8> {
    let mut failed = 0usize;

    for path in &args.files {
        match validate_file(path)? {
            FileReport::Valid(name) => {
                writeln!(out, "  OK: {} — name {name:?}", path.display())?;
            }
            FileReport::Invalid(err) => {
                tracing::debug!(path = %path.display(), code = err.code(), "content rejected");
                writeln!(out, "  FAIL: {} — {err} ({})", path.display(), err.code())?;
                failed += 1;
            }
        }
    }

    let total = args.files.len();
    writeln!(out, "Templates: {}/{total} passed", total - failed)?;

    Ok(if failed > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn run(files: Vec<PathBuf>) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_validate(&ValidateArgs { files }, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn valid_file_reports_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "home.json", r#"{"name":"home","zones":{}}"#);
        assert_eq!(validate_file(&path).unwrap(), FileReport::Valid("home".into()));

        let (code, output) = run(vec![path]);
        assert_eq!(code, 0);
        assert!(output.contains("OK:"));
        assert!(output.contains("name \"home\""));
        assert!(output.contains("Templates: 1/1 passed"));
    }

    #[test]
    fn any_failure_sets_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(&dir, "home.json", r#"{"name":"home"}"#);
        let bad = write(&dir, "about.json", r#"{"title":"about"}"#);

        let (code, output) = run(vec![good, bad]);
        assert_eq!(code, 1);
        assert!(output.contains("unknown key \"title\" (UNKNOWN_KEY)"));
        assert!(output.contains("Templates: 1/2 passed"));
    }

    #[test]
    fn empty_object_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "empty.json", "{}");
        assert_eq!(
            validate_file(&path).unwrap(),
            FileReport::Invalid(ContentError::NotAnObject)
        );
    }

    #[test]
    fn missing_file_is_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
