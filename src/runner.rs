// src/runner.rs
// =============================================================================
// This module walks the catalog and saves one logo per project.
//
// For each project (catalog order, optionally filtered by name):
// 1. Skip it if it lists no repositories
// 2. Skip it if <out>/<slug>.<ext> already exists (unless --force)
// 3. Try its repositories in order:
//      parse URL -> find logo -> download -> write file
//    Any failure moves on to the next repository. The first success wins.
// 4. If nothing worked, log a warning and carry on with the next project
//
// Nothing in here aborts the run. Per-project problems end up in the log
// and in RunSummary.
// =============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::catalog::{select_projects, slugify, Project};
use crate::github::{parse_repo_slug, RepoHost};
use crate::logo::{find_repo_logo, LogoCandidate, LogoSource, IMAGE_EXTENSIONS};

/// Settings for one run, straight from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub out_dir: PathBuf,
    pub max_depth: usize,
    /// Only process projects with these exact names
    pub only: Option<HashSet<String>>,
    /// Download again even if a logo file already exists
    pub force: bool,
}

/// Counts of what happened to each selected project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    /// Of `downloaded`, how many were social preview images
    pub from_fallback: usize,
    pub skipped_existing: usize,
    pub skipped_no_repos: usize,
    pub failed: usize,
}

// How a single project ended
#[derive(Debug)]
enum Outcome {
    Saved(LogoCandidate),
    NoAsset,
}

// Downloads logos for every selected project in `projects`
//
// Parameters:
//   host: GitHubClient in production, a fake in tests
//   projects: the parsed catalog
//   options: output directory, depth, name filter, force flag
//
// Returns: a RunSummary. Never fails; errors are logged per project.
pub async fn fetch_logos<H>(host: &H, projects: &[Project], options: &RunOptions) -> RunSummary
where
    H: RepoHost + ?Sized,
{
    let mut summary = RunSummary::default();

    for project in select_projects(projects, options.only.as_ref()) {
        let name = project.name.as_str();

        if project.github.is_empty() {
            info!(project = %name, "no GitHub repository listed, skipping");
            summary.skipped_no_repos += 1;
            continue;
        }

        let slug = slugify(name);
        if !options.force {
            if let Some(existing) = existing_logo(&options.out_dir, &slug).await {
                info!(project = %name, path = %existing.display(), "logo already exists, skipping");
                summary.skipped_existing += 1;
                continue;
            }
        }

        match fetch_project_logo(host, project, &slug, options).await {
            Ok(Outcome::Saved(candidate)) => {
                summary.downloaded += 1;
                if candidate.source == LogoSource::OpenGraph {
                    summary.from_fallback += 1;
                }
            }
            Ok(Outcome::NoAsset) => {
                warn!(project = %name, "could not locate a logo asset");
                summary.failed += 1;
            }
            Err(e) => {
                error!(project = %name, error = %format!("{:#}", e), "failed to save logo");
                summary.failed += 1;
            }
        }
    }

    summary
}

// Tries each repository of a project until one yields a saved file
//
// Returns Err only when writing to disk fails; another repository
// wouldn't help with that.
async fn fetch_project_logo<H>(
    host: &H,
    project: &Project,
    slug: &str,
    options: &RunOptions,
) -> Result<Outcome>
where
    H: RepoHost + ?Sized,
{
    let name = project.name.as_str();

    for repo_url in &project.github {
        let Some(repo) = parse_repo_slug(repo_url) else {
            debug!(project = %name, url = %repo_url, "not a GitHub repository URL");
            continue;
        };

        let candidate = match find_repo_logo(host, &repo, options.max_depth).await {
            Ok(Some(candidate)) => candidate,
            Ok(None) => continue,
            Err(e) => {
                error!(project = %name, repo = %repo, error = %e, "failed to search repository");
                continue;
            }
        };

        let content = match host.download(&candidate.url).await {
            Ok(content) => content,
            Err(e) => {
                error!(
                    project = %name,
                    repo = %candidate.slug,
                    url = %candidate.url,
                    error = %e,
                    "unable to download logo"
                );
                continue;
            }
        };

        let dest = options
            .out_dir
            .join(format!("{}.{}", slug, candidate.extension));
        save_logo(&content, &dest).await?;

        info!(project = %name, source = %candidate, path = %dest.display(), "saved logo");
        return Ok(Outcome::Saved(candidate));
    }

    Ok(Outcome::NoAsset)
}

// Finds <slug>.<ext> in `out_dir` for any image extension
async fn existing_logo(out_dir: &Path, slug: &str) -> Option<PathBuf> {
    for ext in IMAGE_EXTENSIONS {
        let path = out_dir.join(format!("{}{}", slug, ext));
        match tokio::fs::try_exists(&path).await {
            Ok(true) => return Some(path),
            Ok(false) => {}
            Err(e) => {
                debug!(path = %path.display(), error = %e, "could not check for existing logo");
            }
        }
    }
    None
}

async fn save_logo(content: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
