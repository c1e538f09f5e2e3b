mod cli;

use pixelpolicy::config;
use pixelpolicy::flat::{generate_schema, FlatBag, FlatCodec};
use pixelpolicy::model::{compare, decode_json, encode_json_pretty, Comparison};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = config::load_config_or_default(cli.config.as_deref());

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "pixelpolicy=trace,pixelpolicy_model=trace,pixelpolicy_flat=trace".to_string()
        } else {
            let level = config
                .as_ref()
                .map(|c| c.logging.level.clone())
                .unwrap_or_else(|_| "info".to_string());
            format!("pixelpolicy={level},pixelpolicy_model={level},pixelpolicy_flat={level}")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Schema { kind, depth, count } => {
            let config = config?;
            let depth = depth.unwrap_or(config.codec.max_depth);
            print_schema(kind, depth, count)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::DecodeFlat { bag } => {
            decode_flat(&bag, config?.codec())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::EncodeFlat { policy } => {
            encode_flat(&policy, config?.codec())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Diff { left, right } => diff(&left, &right),
        Commands::ValidateConfig {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

fn print_schema(kind: Option<pixelpolicy::flat::SchemaKind>, depth: usize, count: bool) -> Result<()> {
    let depth = pixelpolicy::flat::clamp_depth(depth);
    let layout = match kind {
        Some(kind) => generate_schema(kind, depth)?,
        None => pixelpolicy::flat::policy_schema(depth)?,
    };

    if count {
        println!("{}", layout.leaf_count());
        return Ok(());
    }

    for path in layout.leaf_paths() {
        println!("{}", path);
    }
    Ok(())
}

fn decode_flat(path: &Path, codec: FlatCodec) -> Result<()> {
    let content = read_file(path)?;
    let bag: FlatBag = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse flat bag {:?}", path))?;

    let policy = codec
        .decode(&bag)
        .with_context(|| format!("Failed to decode flat bag {:?}", path))?;
    tracing::debug!(
        transformations = policy.transformations.len(),
        "Decoded flat bag"
    );

    println!("{}", encode_json_pretty(&policy)?);
    Ok(())
}

fn encode_flat(path: &Path, codec: FlatCodec) -> Result<()> {
    let content = read_file(path)?;
    let policy =
        decode_json(&content).with_context(|| format!("Failed to decode policy {:?}", path))?;

    let bag = codec.encode(&policy)?;
    tracing::debug!(entries = bag.len(), depth = codec.depth(), "Encoded flat bag");

    println!("{}", serde_json::to_string_pretty(&bag)?);
    Ok(())
}

fn diff(left: &Path, right: &Path) -> Result<ExitCode> {
    let a = read_file(left)?;
    let b = read_file(right)?;

    match compare(&a, &b) {
        Comparison::Equivalent => {
            println!("equivalent");
            Ok(ExitCode::SUCCESS)
        }
        Comparison::Different => {
            println!("different");
            Ok(ExitCode::from(1))
        }
        Comparison::Undecidable(err) => {
            eprintln!("cannot compare: {}", err);
            Ok(ExitCode::from(2))
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Max depth: {}", config.codec.max_depth);
            println!("  Log level: {}", config.logging.level);
            println!(
                "  Activate on production: {}",
                config.activation.activate_on_production
            );
            if let Some(set) = &config.activation.policy_set {
                println!("  Policy set: {}", set);
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Max depth: {}", config.codec.max_depth);
        }
    }

    Ok(())
}
