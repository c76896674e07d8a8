//! `deltamark render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use deltamark_config::{CliSettings, Config, OutputFormat};
use deltamark_delta::Delta;
use deltamark_renderer::{HtmlRenderer, MarkdownRenderer, RenderResult};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Delta JSON file (default: stdin, also read for `-`).
    input: Option<PathBuf>,

    /// Output format: html or markdown (overrides config).
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover deltamark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Escape HTML special characters in text (overrides config).
    #[arg(long)]
    escape: bool,

    /// Do not append a trailing newline to the output.
    #[arg(long)]
    no_trailing_newline: bool,

    /// Enable verbose output (debug logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read or
    /// decoded, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            format: self.format,
            escape_text: self.escape.then_some(true),
            trailing_newline: self.no_trailing_newline.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let json = read_input(self.input.as_deref())?;
        let delta = Delta::from_json(&json)?;
        tracing::debug!(
            ops = delta.ops().len(),
            format = %config.render.format,
            "Rendering delta"
        );

        let result = render(&delta, &config);
        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        let rendered = finish(result.output, config.output.trailing_newline);

        if let Some(path) = &self.output {
            std::fs::write(path, rendered)?;
            output.success(&format!("Wrote {}", path.display()));
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }

        Ok(())
    }
}

/// Render with the configured format and escaping.
fn render(delta: &Delta, config: &Config) -> RenderResult {
    let escape = config.render.escape_text;
    match config.render.format {
        OutputFormat::Html => HtmlRenderer::new().with_escaping(escape).render(delta),
        OutputFormat::Markdown => MarkdownRenderer::new().with_escaping(escape).render(delta),
    }
}

/// Append a trailing newline to non-empty output when requested.
fn finish(mut rendered: String, trailing_newline: bool) -> String {
    if trailing_newline && !rendered.is_empty() && !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}

/// Read the delta document from a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
