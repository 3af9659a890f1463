// Copyright 2025 Cowboy AI, LLC.

use std::env;
use std::process;

use anyhow::{bail, Context, Result};
use cim_ontology::{EngineConfig, Interpreter};

const USAGE: &str = "Usage: codsl [--strict] [--config <config.json>] <source.codsl>";

// Usage:
// codsl [--strict] [--config <config.json>] <source.codsl>
// Prints the JSON projection of every ontology, functor and result.
fn main() -> Result<()> {
    let mut strict = false;
    let mut config_path = None;
    let mut source_path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strict" => strict = true,
            "--config" => config_path = Some(args.next().context("--config needs a file")?),
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            other if other.starts_with("--") => bail!("unknown argument: {other}\n{USAGE}"),
            other => source_path = Some(other.to_string()),
        }
    }

    let Some(source_path) = source_path else {
        eprintln!("{USAGE}");
        process::exit(2);
    };

    let mut config = match &config_path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config {path}"))?,
        None => EngineConfig::default(),
    };
    if strict {
        config.strict_references = true;
    }

    let env = match Interpreter::new(config).execute_file(&source_path) {
        Ok(env) => env,
        Err(err) => {
            eprintln!("{source_path}: {err}");
            process::exit(1);
        }
    };

    for warning in &env.warnings {
        eprintln!("{source_path}:{warning}");
    }
    println!("{}", serde_json::to_string_pretty(&env.to_json()?)?);
    Ok(())
}
