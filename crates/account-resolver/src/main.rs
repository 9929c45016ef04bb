//! account-resolver CLI
//!
//! Reads a JSON object of account keys to payloads, resolves the Twitter
//! usernames in it and prints the canonical result object on stdout.

use std::io::Read;
use std::path::PathBuf;

use account_resolver::{
    AccountResolver, BatchOptions, InputMap, ResolverConfig, ResolverError, Result,
    TwitterResolver,
};
use clap::Parser;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "account-resolver", about = "Resolve Twitter usernames to canonical account IDs")]
struct Cli {
    /// JSON file mapping account keys to payloads (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Usernames per lookup request
    #[arg(long, default_value_t = 100)]
    batch_size: usize,

    /// Lookup requests in flight per wave
    #[arg(long, default_value_t = 20)]
    concurrency: usize,

    /// Skip accounts that fail to resolve (also SH_IGNORE_RESOLVING_ERRORS)
    #[arg(long)]
    ignore_errors: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    info!(
        keys = config.api_keys.len(),
        batch_size = config.batch.batch_size(),
        concurrency = config.batch.concurrency(),
        ignore_errors = config.ignore_resolving_errors,
        "Starting account resolution"
    );

    let input = read_input(cli.input.as_ref())?;
    let resolver = TwitterResolver::new(&config)?;
    let resolved = resolver.resolve(input).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&resolved)?
    } else {
        serde_json::to_string(&resolved)?
    };
    println!("{}", output);
    Ok(())
}

fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::from_default_env().add_directive("account_resolver=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ResolverConfig> {
    let mut config = ResolverConfig::from_env();
    config.batch = BatchOptions::new(cli.batch_size, cli.concurrency)?;
    config.ignore_resolving_errors |= cli.ignore_errors;
    config.validate()?;
    Ok(config)
}

fn read_input(path: Option<&PathBuf>) -> Result<InputMap<Value>> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(p)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_input(&raw)
}

fn parse_input(raw: &str) -> Result<InputMap<Value>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ResolverError::Config(format!(
            "input must be a JSON object of account keys, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["account-resolver"]).unwrap();
        assert!(cli.input.is_none());
        assert_eq!(cli.batch_size, 100);
        assert_eq!(cli.concurrency, 20);
        assert!(!cli.ignore_errors);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "account-resolver",
            "--input",
            "accounts.json",
            "--batch-size",
            "5",
            "--concurrency",
            "2",
            "--ignore-errors",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("accounts.json")));
        assert_eq!(
            BatchOptions::new(cli.batch_size, cli.concurrency).unwrap(),
            BatchOptions::CONSERVATIVE
        );
        assert!(cli.ignore_errors);
    }

    #[test]
    fn test_build_config_returns_error_for_zero_concurrency() {
        let cli = Cli::try_parse_from(["account-resolver", "--concurrency", "0"]).unwrap();
        let err = build_config(&cli).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Configuration error: concurrency must be at least 1"
        );
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"twitter:alice": 1, "twitter:bob:999": {{"weight": 2}}}}"#).unwrap();

        let input = read_input(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(input.len(), 2);
        assert_eq!(input["twitter:alice"], Value::from(1));
        assert_eq!(input["twitter:bob:999"]["weight"], 2);
    }

    #[test]
    fn test_parse_input_rejects_non_object() {
        let err = parse_input("[1, 2]").unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Configuration error: input must be a JSON object of account keys, got an array"
        );
        assert!(matches!(parse_input("not json"), Err(ResolverError::Json(_))));
    }
}
