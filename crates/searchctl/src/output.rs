//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Tables use `tabled`,
//! structured formats use serde, plain emits one value per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, builder::Builder, settings::Style};

use searchctl_core::Feedback;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one value per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
        structured => render_structured(structured, data),
    }
}

/// Render pre-formatted rows under a dynamic header.
///
/// Structured formats serialize `data` instead of the display rows, so
/// scripts see raw values rather than formatted strings.
pub fn render_grid<T>(
    format: &OutputFormat,
    data: &T,
    header: &[&str],
    rows: &[Vec<String>],
    plain: impl Fn() -> Vec<String>,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(header.iter().map(ToString::to_string));
            for row in rows {
                builder.push_record(row.clone());
            }
            Ok(builder.build().with(Style::rounded()).to_string())
        }
        OutputFormat::Plain => Ok(plain().join("\n")),
        structured => render_structured(structured, data),
    }
}

/// JSON / YAML for any serializable value; table and plain fall back to
/// pretty JSON.
pub fn render_structured<T>(format: &OutputFormat, data: &T) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Json | OutputFormat::Table | OutputFormat::Plain => render_json(data, false),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Report an admin action's feedback: success goes to stderr, failure
/// becomes the command's error.
pub fn finish_action(feedback: Feedback, global: &GlobalOpts) -> Result<(), CliError> {
    if !feedback.is_success() {
        return Err(CliError::ActionFailed {
            message: feedback.message,
        });
    }
    if !global.quiet {
        if should_color(&global.color) {
            eprintln!("{} {}", "✓".green(), feedback.message);
        } else {
            eprintln!("✓ {}", feedback.message);
        }
    }
    Ok(())
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}
