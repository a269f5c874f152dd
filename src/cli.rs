// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: one run downloads logos for the whole catalog
// (or the projects named with --only).
//
// Example:
//   upstream-logos --projects-json src/data/upstream-projects.json \
//                  --out public/images/project-logos --max-depth 2
// =============================================================================

use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::github::DEFAULT_API_ROOT;
use crate::runner::RunOptions;

#[derive(Parser, Debug)]
#[command(
    name = "upstream-logos",
    version,
    about = "Download logo images for upstream projects from their GitHub repositories",
    long_about = "upstream-logos reads a JSON catalog of projects and, for each one, searches its \
                  GitHub repositories for a logo-like image. When no such file exists it saves \
                  GitHub's social preview image instead."
)]
pub struct Cli {
    /// Path to the project catalog JSON file
    #[arg(long, default_value = "src/data/upstream-projects.json")]
    pub projects_json: PathBuf,

    /// Directory where logos are saved
    #[arg(long, default_value = "public/images/project-logos")]
    pub out: PathBuf,

    /// How deep to search inside each repository
    ///
    /// 0 = root files only. Below the first level, only directories like
    /// assets/, docs/ or logos/ are searched.
    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    /// Only process these projects (exact names)
    ///
    /// Example: --only "Foo Bar" Baz. A bare --only means no filter.
    #[arg(long, num_args = 0..)]
    pub only: Vec<String>,

    /// Re-download logos even if the destination file already exists
    #[arg(long)]
    pub force: bool,

    /// GitHub token, raises the API rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// GitHub API root, for GitHub Enterprise
    #[arg(long, default_value = DEFAULT_API_ROOT)]
    pub api_root: String,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            out_dir: self.out.clone(),
            max_depth: self.max_depth,
            only: (!self.only.is_empty()).then(|| self.only.iter().cloned().collect::<HashSet<_>>()),
            force: self.force,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
