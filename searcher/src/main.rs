use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use vicinity_core::persist::{load_index, load_meta, IndexPaths};
use vicinity_core::Normalizer;
use vicinity_searcher::search;

use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "vicinity-searcher")]
#[command(about = "Answer phrase-proximity queries against a built index", long_about = None)]
struct Args {
    /// Index folder produced by the indexer
    #[arg(long, default_value = "./index")]
    index: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let paths = IndexPaths::new(&args.index);
    let index = load_index(&paths).with_context(|| format!("loading index from {}", args.index))?;
    match load_meta(&paths) {
        Ok(meta) => tracing::info!(
            documents = meta.document_count,
            terms = index.len(),
            "index loaded"
        ),
        Err(_) => tracing::info!(terms = index.len(), "index loaded"),
    }
    let normalizer = Normalizer::new();

    // One query per stdin line until EOF. A query that matches nothing is a
    // normal result; it never ends the session.
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let query = line?;
        let results = search(&index, &normalizer, &query);
        if results.is_empty() {
            writeln!(out, "Not found")?;
        } else {
            for doc_id in results {
                writeln!(out, "{doc_id}")?;
            }
        }
    }
    Ok(())
}
