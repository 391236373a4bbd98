//! Rendering of load results for stdout.
//!
//! Invariants:
//! - Flattened output is rendered as a single-level mapping of canonical
//!   leaf paths to values.
//! - Output always ends with a newline.

use layerconf_loader::LoadOutput;
use serde::Serialize;
use serde_json::Value;

use crate::args::OutputFormat;

/// Render a full load result.
pub fn render_output(output: &LoadOutput, format: OutputFormat) -> anyhow::Result<String> {
    match output {
        LoadOutput::Flattened(flat) => render(&flat.leaves(), format),
        LoadOutput::Document(document) => render(document, format),
    }
}

/// Render a single value.
pub fn render_value(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    render(value, format)
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let mut out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
