//! # Compile Subcommand
//!
//! Compiles a template content file against a layout content file with the
//! default layout merger, without a running service.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use cms_compile::{compile_template, LayoutMerger};
use cms_core::to_pretty_string;
use cms_entity::{Layout, Template};

/// Arguments for `cms compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Template content file (JSON).
    #[arg(long, value_name = "FILE")]
    pub template: PathBuf,

    /// Layout content file (JSON object).
    #[arg(long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Layout name recorded in the definition. Defaults to the file stem.
    #[arg(long)]
    pub layout_name: Option<String>,

    /// Print only the compiled definition instead of `{"content": ...}`.
    #[arg(long)]
    pub content_only: bool,
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Execute `cms compile`.
pub fn run_compile(args: &CompileArgs, out: &mut dyn Write) -> Result<u8> {
    let layout_name = match &args.layout_name {
        Some(name) => name.clone(),
        None => args
            .layout
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "layout".to_string()),
    };
    let layout = Layout::new(layout_name, read(&args.layout)?);

    let template = match Template::new(read(&args.template)?, layout.id()) {
        Ok(template) => template,
        Err(err) => {
            writeln!(
                out,
                "  FAIL: {} — {err} ({})",
                args.template.display(),
                err.code()
            )?;
            return Ok(1);
        }
    };

    let response = compile_template(&LayoutMerger, &template, &layout)
        .with_context(|| format!("failed to compile {}", args.template.display()))?;

    if args.content_only {
        writeln!(out, "{}", response.content)?;
    } else {
        writeln!(out, "{}", to_pretty_string(&response)?)?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Fixture {
        _dir: tempfile::TempDir,
        template: PathBuf,
        layout: PathBuf,
    }

    fn fixture(template: &str, layout: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("home.json");
        let layout_path = dir.path().join("base.json");
        fs::write(&template_path, template).unwrap();
        fs::write(&layout_path, layout).unwrap();
        Fixture {
            _dir: dir,
            template: template_path,
            layout: layout_path,
        }
    }

    fn run(f: &Fixture, content_only: bool) -> Result<(u8, String)> {
        let args = CompileArgs {
            template: f.template.clone(),
            layout: f.layout.clone(),
            layout_name: None,
            content_only,
        };
        let mut out = Vec::new();
        let code = run_compile(&args, &mut out)?;
        Ok((code, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn prints_wrapped_response() {
        let f = fixture(
            r#"{"name":"home","filename":"pages/home.html"}"#,
            r#"{"zones":{"main":[]}}"#,
        );
        let (code, output) = run(&f, false).unwrap();
        assert_eq!(code, 0);
        let response: serde_json::Value = serde_json::from_str(&output).unwrap();
        let definition: serde_json::Value =
            serde_json::from_str(response["content"].as_str().unwrap()).unwrap();
        assert_eq!(definition["name"], "home");
        assert_eq!(definition["layout"], "base");
        assert_eq!(definition["filename"], "pages/home.html");
    }

    #[test]
    fn content_only_prints_definition() {
        let f = fixture(r#"{"name":"home"}"#, "{}");
        let (code, output) = run(&f, true).unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            output,
            "{\n    \"name\": \"home\",\n    \"layout\": \"base\"\n}\n"
        );
    }

    #[test]
    fn invalid_template_reports_failure() {
        let f = fixture(r#"{"title":"home"}"#, "{}");
        let (code, output) = run(&f, false).unwrap();
        assert_eq!(code, 1);
        assert!(output.contains("UNKNOWN_KEY"));
    }

    #[test]
    fn non_object_layout_is_error() {
        let f = fixture(r#"{"name":"home"}"#, "[]");
        let err = run(&f, false).unwrap_err();
        assert!(format!("{err:#}").contains("cannot be compiled"));
    }
}
