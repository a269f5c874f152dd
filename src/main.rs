// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the project catalog
// 3. Download a logo for every project
// 4. Print a summary and exit (0 = done, 1 = catalog missing, 2 = error)
//
// Per-project failures don't change the exit code; they are logged and
// counted in the summary.
// =============================================================================

mod catalog;
mod cli;
mod github;
mod logo;
mod runner;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::path::Path;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use catalog::CatalogError;
use github::GitHubClient;
use runner::RunSummary;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{:#}", e), "fatal error");
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only carries the summary.
// RUST_LOG=debug shows every directory listing.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

// Returns:
//   Ok(0) = run completed
//   Ok(1) = catalog file not found
//   Err   = anything else fatal (bad catalog, client setup)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let projects = match catalog::load_catalog(&cli.projects_json).await {
        Ok(projects) => projects,
        Err(e @ CatalogError::NotFound { .. }) => {
            error!("{}", e);
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    let client = GitHubClient::new(cli.token.clone(), cli.timeout())
        .context("failed to create HTTP client")?
        .with_api_root(&cli.api_root)
        .context("invalid --api-root")?;

    println!("🔍 Fetching logos for {} project(s)", projects.len());

    let options = cli.run_options();
    let summary = runner::fetch_logos(&client, &projects, &options).await;

    print_summary(&summary, &options.out_dir);
    Ok(0)
}

fn print_summary(summary: &RunSummary, out_dir: &Path) {
    println!();
    println!("📊 Downloaded {} logos into {}", summary.downloaded, out_dir.display());
    println!("   🖼️  Social preview fallbacks: {}", summary.from_fallback);
    println!("   ⏭️  Already present: {}", summary.skipped_existing);
    println!("   📭 No repository listed: {}", summary.skipped_no_repos);
    println!("   ⚠️  Failed: {}", summary.failed);
}
