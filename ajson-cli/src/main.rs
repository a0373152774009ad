//! AJSON CLI - Command-line tool for typed JSON with extra fields
//!
//! This binary provides command-line interfaces for:
//! - merge: inject dotted key-path extras into a JSON object
//! - split: separate a payload into known and unknown top-level fields

use ajson_codec::{merge_all, retain_unknown, Extras, DEFAULT_PATH_SEPARATOR};
use ajson_format::expect_object;
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::error::Error;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ajson")]
#[command(about = "Merge and split extra fields of JSON records")]
#[command(version)]
struct Cli {
    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge extra fields into a JSON object
    ///
    /// Examples:
    ///   ajson merge record.json --extras extras.json
    ///   ajson merge record.json --extras extras.json --separator / --pretty
    Merge {
        /// Input file holding a JSON object ("-" for stdin)
        input: PathBuf,
        /// File holding a JSON object of key-path → value pairs
        #[arg(long)]
        extras: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Separator between key-path segments
        #[arg(long, default_value_t = DEFAULT_PATH_SEPARATOR)]
        separator: char,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Split a payload into known and unknown fields
    ///
    /// Examples:
    ///   ajson split payload.json --known name,age
    Split {
        /// Input file holding a JSON object ("-" for stdin)
        input: PathBuf,
        /// Comma-separated wire names treated as known
        #[arg(long, value_delimiter = ',')]
        known: Vec<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Merge {
            input,
            extras,
            output,
            separator,
            pretty,
        } => {
            handle_merge(&input, &extras, output.as_deref(), separator, pretty)?;
        }
        Commands::Split {
            input,
            known,
            output,
            pretty,
        } => {
            handle_split(&input, &known, output.as_deref(), pretty)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_merge(
    input: &Path,
    extras_path: &Path,
    output: Option<&Path>,
    separator: char,
    pretty: bool,
) -> Result<(), Box<dyn Error>> {
    let mut record = read_object(input)?;
    let extras: Extras = read_object(extras_path)?.into_iter().collect();

    let applied = merge_all(&mut record, &extras, separator);
    tracing::info!(applied, input = %input.display(), "merged extras");

    write_json(output, &Value::Object(record), pretty)
}

fn handle_split(
    input: &Path,
    known_names: &[String],
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), Box<dyn Error>> {
    let mut unknown = read_object(input)?;
    let known: Map<String, Value> = known_names
        .iter()
        .filter_map(|name| unknown.get(name).map(|value| (name.clone(), value.clone())))
        .collect();

    let claimed = retain_unknown(&mut unknown, known_names);
    tracing::info!(claimed, unknown = unknown.len(), "split payload");

    write_json(output, &json!({"known": known, "unknown": unknown}), pretty)
}

fn read_object(path: &Path) -> Result<Map<String, Value>, Box<dyn Error>> {
    let mut text = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut text)?;
    } else {
        text = fs::read_to_string(path)
            .map_err(|e| format!("reading {} failed: {e}", path.display()))?;
    }

    let value: Value = serde_json::from_str(&text)
        .map_err(|e| format!("parsing {} failed: {e}", path.display()))?;
    Ok(expect_object(value)?)
}

fn write_json(output: Option<&Path>, value: &Value, pretty: bool) -> Result<(), Box<dyn Error>> {
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    bytes.push(b'\n');

    match output {
        Some(path) => fs::write(path, bytes)?,
        None => std::io::stdout().lock().write_all(&bytes)?,
    }
    Ok(())
}
