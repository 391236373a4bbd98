//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `--set KEY=VALUE` pairs into forced data.
//!
//! Non-responsibilities:
//! - Does not load files (see `main.rs`).
//! - Does not render output (see `output` module).

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use layerconf_loader::{Document, path};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "layerconf")]
#[command(about = "Load a layered configuration file and print the merged result", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  layerconf config/app.json\n  layerconf config/app.json --env test --format yaml\n  layerconf config/app.json --set server.port=8080 --get server\n  layerconf config/app.json --flatten\n"
)]
pub struct Cli {
    /// Configuration file to load
    pub file: PathBuf,

    /// Environment suffix; `app.json` also loads `app_<ENV>.json` when present
    #[arg(short, long = "env", env = "LAYERCONF_ENV")]
    pub environment: Option<String>,

    /// JSON object merged into every loaded file with the highest precedence
    #[arg(long)]
    pub data: Option<String>,

    /// Force a single value (`path=value`; value parsed as JSON, else taken as a string)
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub set: Vec<String>,

    /// Key holding the import list
    #[arg(long, env = "LAYERCONF_IMPORTS_KEY")]
    pub imports_key: Option<String>,

    /// Print every leaf as a `path: value` entry instead of the nested document
    #[arg(long)]
    pub flatten: bool,

    /// Do not expose process environment variables as `${env:NAME}`
    #[arg(long)]
    pub no_process_env: bool,

    /// Skip the final reference pass and print placeholders as written
    #[arg(long)]
    pub raw: bool,

    /// Print only the value at this path
    #[arg(long, value_name = "PATH")]
    pub get: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log at debug level to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl Cli {
    /// Forced data assembled from `--data` and then `--set` (later wins).
    pub fn forced_data(&self) -> anyhow::Result<Document> {
        let mut data = match &self.data {
            Some(raw) => match serde_json::from_str::<Value>(raw).context("--data is not valid JSON")? {
                Value::Object(map) => map,
                _ => bail!("--data must be a JSON object"),
            },
            None => Document::new(),
        };

        for assignment in &self.set {
            let (key, raw) = assignment
                .split_once('=')
                .with_context(|| format!("--set '{assignment}' is missing '='"))?;
            let segments = path::parse_path(key.trim())?;
            let value =
                serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            path::set_in(&mut data, &segments, value)?;
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("layerconf").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["app.json"]);
        assert_eq!(cli.file, PathBuf::from("app.json"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.flatten);
        assert!(cli.forced_data().unwrap().is_empty());
    }

    #[test]
    fn test_forced_data_combines_data_and_set() {
        let cli = parse(&[
            "app.json",
            "--data",
            r#"{"server": {"host": "a", "port": 1}}"#,
            "--set",
            "server.port=8080",
            "--set",
            "name=svc",
            "--set",
            "tags=[\"x\"]",
        ]);
        let data = cli.forced_data().unwrap();
        assert_eq!(
            Value::Object(data),
            json!({"server": {"host": "a", "port": 8080}, "name": "svc", "tags": ["x"]})
        );
    }

    #[test]
    fn test_forced_data_errors() {
        assert!(parse(&["a.json", "--data", "[1]"]).forced_data().is_err());
        assert!(parse(&["a.json", "--data", "{oops"]).forced_data().is_err());
        assert!(parse(&["a.json", "--set", "novalue"]).forced_data().is_err());
        assert!(parse(&["a.json", "--set", "a..b=1"]).forced_data().is_err());
    }
}
