use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vicinity_core::persist::{save_index, save_meta, IndexPaths, MetaFile};
use vicinity_core::{CorpusStats, IndexBuilder, InvertedIndex, Normalizer};
use walkdir::WalkDir;

use std::fs;
use std::path::Path;

#[derive(Parser)]
#[command(name = "vicinity-indexer")]
#[command(about = "Build a positional inverted index from a folder of documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a folder of plain-text documents
    Build {
        /// Folder of documents; each file becomes one document, its file
        /// name its document id
        #[arg(long)]
        input: String,
        /// Output index folder (created if absent)
        #[arg(long)]
        output: String,
        /// Skip unreadable documents with a warning instead of aborting
        #[arg(long, default_value_t = false)]
        skip_unreadable: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, skip_unreadable } => {
            build(&input, &output, skip_unreadable)
        }
    }
}

fn build(input: &str, output: &str, skip_unreadable: bool) -> Result<()> {
    let normalizer = Normalizer::new();
    let (index, stats) = scan_documents(Path::new(input), &normalizer, skip_unreadable)?;

    let paths = IndexPaths::new(output);
    save_index(&paths, &index).with_context(|| format!("writing index to {output}"))?;

    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::new());
    let meta = MetaFile {
        document_count: stats.document_count,
        token_count: stats.token_count,
        term_count: stats.term_count,
        created_at,
        version: 1,
    };
    save_meta(&paths, &meta)?;

    println!("Total number of documents: {}", stats.document_count);
    println!("Total number of tokens: {}", stats.token_count);
    println!("Total number of terms: {}", stats.term_count);
    tracing::info!(output, "index build complete");
    Ok(())
}

/// One pass over the document folder in file-name ascending order, so
/// rebuilding an unchanged corpus yields a byte-identical artifact.
fn scan_documents(
    input: &Path,
    normalizer: &Normalizer,
    skip_unreadable: bool,
) -> Result<(InvertedIndex, CorpusStats)> {
    let mut builder = IndexBuilder::new();
    let walker = WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("reading document folder {}", input.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let doc_id = entry.file_name().to_string_lossy().into_owned();
        let text = match fs::read_to_string(entry.path()) {
            Ok(text) => text,
            Err(err) if skip_unreadable => {
                tracing::warn!(%doc_id, %err, "skipping unreadable document");
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading document {doc_id}"));
            }
        };
        builder.add_document(&doc_id, normalizer.normalize(&text));
    }
    Ok(builder.finish())
}
