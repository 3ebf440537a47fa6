//! ermap CLI - Infer entities and edges from a database catalog
//!
//! Usage:
//!   ermap import [--dsn <dsn>] [--schema <name>] [--tables a,b] [--format json|builder]
//!   ermap inspect [--dsn <dsn>] [--schema <name>] [--tables a,b]
//!
//! Examples:
//!   ermap import --dsn sqlite://./app.db --format builder
//!   ermap import --dsn "host=localhost dbname=test search_path=app" --snapshot catalog.json
//!   ermap inspect --dsn ./app.db --output catalog.json

use clap::{Args, Parser, Subcommand, ValueEnum};
use ermap::catalog::to_snapshot_json;
use ermap::config::Settings;
use ermap::import::{open_reader, ImportOptions, Importer};
use ermap::SchemaMutations;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ermap")]
#[command(about = "ermap - Infer an entity-relationship model from a database catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer entities, fields and edges
    Import {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Dump the inspected catalog as a JSON snapshot
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Database connection string
    #[arg(long)]
    dsn: Option<String>,

    /// Schema to inspect (derived from the DSN if not specified)
    #[arg(short, long)]
    schema: Option<String>,

    /// Only inspect these tables
    #[arg(short, long, value_delimiter = ',')]
    tables: Vec<String>,

    /// Read the catalog from a JSON snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Config file (defaults to ERMAP_CONFIG, ./ermap.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// SchemaMutations as JSON
    Json,
    /// Compact builder form, one block per entity
    Builder,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ermap=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { source, format } => cmd_import(source, format).await,
        Commands::Inspect { source } => cmd_inspect(source).await,
    }
}

/// Resolved CLI + config file state.
struct Resolved {
    options: ImportOptions,
    output: Option<PathBuf>,
    format: OutputFormat,
}

fn resolve(source: SourceArgs, format: Option<OutputFormat>) -> Result<Resolved, String> {
    let settings = match &source.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
    .map_err(|e| format!("Error loading config: {}", e))?;

    let mut options = ImportOptions::from_settings(&settings.import)
        .map_err(|e| format!("Error loading config: {}", e))?;

    // Flags override the config file
    if let Some(dsn) = source.dsn {
        options.dsn = Some(dsn);
    }
    if let Some(schema) = source.schema {
        options.schema = Some(schema);
    }
    if !source.tables.is_empty() {
        options.tables = source.tables;
    }
    if let Some(snapshot) = source.snapshot {
        options.snapshot = Some(snapshot);
    }

    let format = match format {
        Some(format) => format,
        None => match settings.output.format.as_str() {
            "json" => OutputFormat::Json,
            "builder" => OutputFormat::Builder,
            other => return Err(format!("Unknown output format in config: {}", other)),
        },
    };

    Ok(Resolved {
        options,
        output: source.output.or(settings.output.path),
        format,
    })
}

async fn cmd_import(source: SourceArgs, format: Option<OutputFormat>) -> ExitCode {
    let resolved = match resolve(source, format) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let reader = match open_reader(&resolved.options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error opening catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let importer = Importer::new(reader, resolved.options);
    let mutations = match importer.schema_mutations().await {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Import error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rendered = match resolved.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&mutations) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Builder => render_builder(&mutations),
    };

    write_output(resolved.output, &rendered)
}

async fn cmd_inspect(source: SourceArgs) -> ExitCode {
    let resolved = match resolve(source, Some(OutputFormat::Json)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let reader = match open_reader(&resolved.options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error opening catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let importer = Importer::new(reader, resolved.options);
    let json = match importer.inspect().await.map_err(|e| e.to_string()).and_then(|catalog| {
        to_snapshot_json(&catalog).map_err(|e| e.to_string())
    }) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Inspect error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    write_output(resolved.output, &json)
}

fn render_builder(mutations: &SchemaMutations) -> String {
    let mut out = String::new();
    for entity in mutations.iter() {
        let _ = writeln!(out, "{} ({})", entity.name, entity.table);
        let _ = writeln!(out, "  fields:");
        for field in &entity.fields {
            let _ = writeln!(out, "    {}", field);
        }
        if !entity.edges.is_empty() {
            let _ = writeln!(out, "  edges:");
            for edge in &entity.edges {
                let _ = writeln!(out, "    {}", edge);
            }
        }
        out.push('\n');
    }
    out
}

fn write_output(path: Option<PathBuf>, content: &str) -> ExitCode {
    match path {
        Some(path) => match fs::write(&path, content) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "wrote output");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error writing '{}': {}", path.display(), e);
                ExitCode::FAILURE
            }
        },
        None => {
            println!("{}", content.trim_end());
            ExitCode::SUCCESS
        }
    }
}
