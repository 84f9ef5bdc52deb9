//! Blobsniff - Main Entry Point
//!
//! Classifies files on disk and prints one JSON document per file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blobsniff::{Blob, ClassifierConfig};

#[derive(Debug, Parser)]
#[command(name = "blobsniff", version, about = "Classify repository files")]
struct Cli {
    /// Repository root. Relative PATHs are resolved against it and reported
    /// relative to it.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Files to classify
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "blobsniff=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let config = ClassifierConfig::from_env();
    let cli = Cli::parse();

    debug!(?config, root = %cli.root.display(), "starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for path in &cli.paths {
        let full = cli.root.join(path);
        let blob = match Blob::from_file(&cli.root, &full) {
            Ok(blob) => blob.with_config(config.clone()),
            Err(e) => {
                warn!(path = %full.display(), error = %e, "skipping");
                failures += 1;
                continue;
            }
        };

        let summary = blob.classify();
        let json = if cli.pretty {
            serde_json::to_string_pretty(&summary)
        } else {
            serde_json::to_string(&summary)
        }
        .context("failed to serialize classification")?;

        writeln!(out, "{json}").context("failed to write output")?;
    }

    info!(
        classified = cli.paths.len() - failures,
        failed = failures,
        "done"
    );

    if failures > 0 {
        anyhow::bail!("{failures} file(s) could not be classified");
    }
    Ok(())
}
