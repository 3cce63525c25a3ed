//! phantom-refine CLI — `phr` command.
//!
//! Loads refinement type definitions, inspects them, and checks or parses
//! JSON values against them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use phantom_refine::{ArrayMode, Refinement, TypeRegistry, Value};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// phantom-refine CLI — inspect refinement types, check and parse values.
#[derive(Parser, Debug)]
#[command(
    name = "phr",
    about = "phantom-refine CLI",
    version,
    long_about = "phr — phantom-refine CLI\n\nLoad refinement type definitions, inspect them, and check or parse\nJSON values against them."
)]
struct Cli {
    /// Definition file to load (repeatable, loaded in order)
    #[arg(long = "defs", global = true, value_name = "FILE")]
    defs: Vec<PathBuf>,

    /// How JSON arrays are read
    #[arg(long, global = true, value_enum, default_value_t = Arrays::Tuple)]
    arrays: Arrays,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Arrays {
    /// Immutable tuples
    Tuple,
    /// Mutable lists
    List,
}

impl From<Arrays> for ArrayMode {
    fn from(arrays: Arrays) -> Self {
        match arrays {
            Arrays::Tuple => ArrayMode::Tuple,
            Arrays::List => ArrayMode::List,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered refinement types
    List,

    /// Display a refinement type
    Show {
        /// Type name (fully qualified or unique short name)
        name: String,
    },

    /// Check whether a JSON value is a member of a type
    Check {
        /// Type name (fully qualified or unique short name)
        name: String,
        /// JSON value
        value: String,
    },

    /// Parse a JSON value, printing it back when it is a member
    Parse {
        /// Type name (fully qualified or unique short name)
        name: String,
        /// JSON value
        value: String,
    },

    /// Print the schema of a type
    Schema {
        /// Type name (fully qualified or unique short name)
        name: String,
    },
}

// ── Main entry point ──────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let arrays = ArrayMode::from(cli.arrays);

    let result = load_registry(&cli.defs).and_then(|registry| match &cli.command {
        Commands::List => cmd_list(&registry, verbose),
        Commands::Show { name } => cmd_show(&registry, name),
        Commands::Check { name, value } => cmd_check(&registry, name, value, arrays, verbose),
        Commands::Parse { name, value } => cmd_parse(&registry, name, value, arrays),
        Commands::Schema { name } => cmd_schema(&registry, name),
    });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_registry(defs: &[PathBuf]) -> Result<TypeRegistry> {
    let mut registry = TypeRegistry::with_builtins().context("failed to define built-in types")?;
    for path in defs {
        let loaded = registry
            .load_path(path)
            .with_context(|| format!("failed to load definitions from {}", path.display()))?;
        log::info!("{}: {} type(s)", path.display(), loaded.len());
    }
    Ok(registry)
}

fn read_value(json: &str, arrays: ArrayMode) -> Result<Value> {
    let json: serde_json::Value =
        serde_json::from_str(json).with_context(|| format!("invalid JSON value: {json}"))?;
    Ok(Value::from_json(&json, arrays))
}

// ── Command implementations ───────────────────────────────────────────────────

/// `phr list`
fn cmd_list(registry: &TypeRegistry, verbose: bool) -> Result<()> {
    if registry.is_empty() {
        println!("No refinement types registered");
        return Ok(());
    }
    for refinement in registry.iter() {
        let marker = if refinement.is_abstract() { " (abstract)" } else { "" };
        if verbose {
            let bound = refinement
                .bound()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string());
            println!("{}{marker}  bound: {bound}", refinement.name());
        } else {
            println!("{}{marker}", refinement.name());
        }
    }
    Ok(())
}

/// `phr show NAME`
fn cmd_show(registry: &TypeRegistry, name: &str) -> Result<()> {
    let refinement = registry.get(name)?;

    println!("Type: {}", refinement.name());
    println!("  Abstract:  {}", refinement.is_abstract());
    match (refinement.bound(), refinement.bound_source()) {
        (Some(bound), Some(source)) => println!("  Bound:     {bound} ({source})"),
        _ => println!("  Bound:     none"),
    }
    match refinement.predicate() {
        Some(predicate) => println!("  Predicate: {predicate}"),
        None => println!("  Predicate: none"),
    }
    let ancestors = refinement.ancestors();
    if !ancestors.is_empty() {
        let names: Vec<&str> = ancestors.iter().map(|a| a.name()).collect();
        println!("  Ancestors: {}", names.join(" -> "));
    }
    if let Some(description) = refinement.description() {
        println!("  Description: {description}");
    }
    Ok(())
}

/// `phr check NAME VALUE`
fn cmd_check(
    registry: &TypeRegistry,
    name: &str,
    json: &str,
    arrays: ArrayMode,
    verbose: bool,
) -> Result<()> {
    let refinement = registry.get(name)?;
    let value = read_value(json, arrays)?;

    if verbose {
        if let Some(reason) = refinement.diagnose(&value)? {
            eprintln!("{reason}");
        }
    }
    println!("{}", refinement.conforms(&value)?);
    Ok(())
}

/// `phr parse NAME VALUE`
fn cmd_parse(registry: &TypeRegistry, name: &str, json: &str, arrays: ArrayMode) -> Result<()> {
    let value = read_value(json, arrays)?;
    let parsed = registry.parse(name, value)?;
    let rendered =
        serde_json::to_string(&parsed.to_json()).context("failed to serialize parsed value")?;
    println!("{rendered}");
    Ok(())
}

/// `phr schema NAME`
fn cmd_schema(registry: &TypeRegistry, name: &str) -> Result<()> {
    let refinement = registry.get(name)?;
    let schema = serde_json::Value::Object(refinement.schema());
    let rendered = serde_json::to_string_pretty(&schema).context("failed to serialize schema")?;
    println!("{rendered}");
    Ok(())
}
