//! bookgraph CLI: build a theme graph for one book.
//!
//! Usage:
//!   bookgraph build [ISBN] [--format json|dot|text] [--output path] [--embeddings]
//!   bookgraph config
//!
//! Global flags: `--config path`, `-v`/`-vv`.

use bookgraph::export;
use bookgraph::semantic::{EmbeddingScorer, LexicalEmbedder, SemanticScorer};
use bookgraph::{BookGraphPipeline, Config, ExportFormat, FixedPause, OpenLibraryClient};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bookgraph",
    version,
    about = "Theme tags and a related-book graph for a single ISBN"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve tags and related works, then export the graph
    Build {
        /// ISBN-10 or ISBN-13; prompted for when omitted
        isbn: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Score subjects with the ONNX embedding model (requires the
        /// `embeddings` feature)
        #[arg(long)]
        embeddings: bool,
    },
    /// Print the effective configuration as YAML
    Config,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn prompt_identifier() -> Result<String, String> {
    eprint!("Enter ISBN: ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("failed to read ISBN from stdin: {}", e))?;
    Ok(line.trim().to_string())
}

fn make_scorer(config: &Config, use_embeddings: bool) -> Result<Arc<dyn SemanticScorer>, String> {
    if use_embeddings {
        #[cfg(feature = "embeddings")]
        {
            let embedder = bookgraph::semantic::FastEmbedEmbedder::default_model()
                .map_err(|e| format!("failed to load embedding model: {}", e))?;
            return Ok(Arc::new(EmbeddingScorer::new(Box::new(embedder))));
        }
        #[cfg(not(feature = "embeddings"))]
        return Err("--embeddings requires a build with the `embeddings` feature".to_string());
    }
    let embedder = LexicalEmbedder::from_vocabulary(&config.tags.theme_vocabulary);
    Ok(Arc::new(EmbeddingScorer::new(Box::new(embedder))))
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    Config::load_or_default(path).map_err(|e| e.to_string())
}

fn write_output(rendered: &str, output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(path) => std::fs::write(path, rendered)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e)),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

fn run_build(
    config: &Config,
    isbn: Option<String>,
    format: ExportFormat,
    output: Option<&Path>,
    embeddings: bool,
) -> Result<(), String> {
    let identifier = match isbn {
        Some(isbn) => isbn,
        None => prompt_identifier()?,
    };

    let catalog = OpenLibraryClient::new(&config.catalog)
        .map_err(|e| format!("failed to create catalog client: {}", e))?;
    let scorer = make_scorer(config, embeddings)?;
    let pacer = FixedPause(config.pacing.pause());
    let pipeline = BookGraphPipeline::from_config(config, Arc::new(catalog), scorer, Arc::new(pacer))
        .map_err(|e| format!("failed to prepare theme vocabulary: {}", e))?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| format!("failed to start runtime: {}", e))?;
    let graph = runtime
        .block_on(pipeline.build(&identifier))
        .map_err(|e| e.to_string())?;

    let rendered = export::render(&graph, format).map_err(|e| format!("failed to render graph: {}", e))?;
    write_output(&rendered, output)
}

fn cmd_build(
    config: Option<&Path>,
    isbn: Option<String>,
    format: ExportFormat,
    output: Option<&Path>,
    embeddings: bool,
) -> i32 {
    let result = load_config(config).and_then(|cfg| run_build(&cfg, isbn, format, output, embeddings));
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_config(config: Option<&Path>) -> i32 {
    let rendered = load_config(config).and_then(|cfg| cfg.to_yaml().map_err(|e| e.to_string()));
    match rendered {
        Ok(yaml) => {
            print!("{}", yaml);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let code = match cli.command {
        Commands::Build {
            isbn,
            format,
            output,
            embeddings,
        } => cmd_build(cli.config.as_deref(), isbn, format, output.as_deref(), embeddings),
        Commands::Config => cmd_config(cli.config.as_deref()),
    };
    std::process::exit(code);
}
