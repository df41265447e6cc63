use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use jobquery::config::Config;
use jobquery::query::{parts_from_json, QueryEngine};

mod cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let config = Config::load_with(get_base_path()?)?;
    let engine = QueryEngine::from_config(&config);

    tracing::debug!(command = ?args.command, "dispatching");

    match args.command {
        cli::Command::Build { parts } => {
            let parts = match parts.json.clone() {
                Some(source) => parts_from_json(&read_source(&source)?)?,
                None => parts.into_parts()?,
            };
            println!("{}", engine.build_query(&parts)?);
        }
        cli::Command::Parse { query } => print_json(&engine.parse_query(&query)?)?,
        cli::Command::Variations { query, count } => {
            let engine = match count {
                Some(count) => engine.with_variation_count(count),
                None => engine,
            };
            print_json(&engine.get_variations(&query)?)?;
        }
        cli::Command::Shape { query } => print_json(&engine.get_query_parts(&query)?)?,
        cli::Command::Url { query } => println!("{}", engine.search_url(&query)?),
        cli::Command::Id { query } => println!("{}", engine.fingerprint(&query)?),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read parts from stdin")?;
        return Ok(buf);
    }

    std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
}

/// `$JOBQUERY_BASE_PATH`, or `~/.config/jobquery`
fn get_base_path() -> Result<PathBuf> {
    if let Ok(base_path) = std::env::var("JOBQUERY_BASE_PATH") {
        return Ok(PathBuf::from(base_path));
    }

    let home = homedir::my_home()
        .map_err(|e| anyhow!("could not determine home directory: {e}"))?
        .context("home directory path is empty")?;

    Ok(home.join(".config").join("jobquery"))
}
