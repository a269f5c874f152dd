// src/catalog.rs
// =============================================================================
// This module reads the upstream project catalog.
//
// The catalog is a JSON array:
//   [
//     {"name": "Foo Bar", "github": ["https://github.com/foo/bar"]},
//     ...
//   ]
//
// Only `name` and `github` matter here; other fields are ignored.
// It also owns `slugify`, which turns a project name into a file name.
// =============================================================================

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name used when a project name slugifies to nothing
const PLACEHOLDER_SLUG: &str = "project";

/// One upstream project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Repository URLs, in priority order. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub github: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("project file {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read project file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and parses the catalog at `path`
pub async fn load_catalog(path: &Path) -> Result<Vec<Project>, CatalogError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CatalogError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    parse_catalog(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_catalog(text: &str) -> Result<Vec<Project>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Projects worth processing, in catalog order
///
/// Nameless projects are dropped. With `only`, a project must be named
/// exactly (case-sensitive) in the set.
pub fn select_projects<'a>(
    projects: &'a [Project],
    only: Option<&'a HashSet<String>>,
) -> impl Iterator<Item = &'a Project> + 'a {
    projects.iter().filter(move |project| {
        !project.name.is_empty() && only.map_or(true, |names| names.contains(&project.name))
    })
}

/// Lowercase, runs of anything but [a-z0-9] become one hyphen, trimmed
///
/// "Foo Bar" -> "foo-bar", "C++ / Qt" -> "c-qt", "***" -> "project"
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        PLACEHOLDER_SLUG.to_string()
    } else {
        slug
    }
}

// `null` reads as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Foo Bar"), "foo-bar");
        assert_eq!(slugify("  --Kube  Flow!! "), "kube-flow");
        assert_eq!(slugify("C++ / Qt 6"), "c-qt-6");
        assert_eq!(slugify("Café"), "caf");
        assert_eq!(slugify("***"), "project");
        assert_eq!(slugify(""), "project");
    }

    #[test]
    fn test_parse_catalog_fields() {
        let projects = parse_catalog(
            r#"[
                {"name": "Foo", "github": ["https://github.com/foo/foo"], "stars": 3},
                {"name": "Bar", "github": null},
                {"name": "Baz"},
                {"github": ["https://github.com/x/y"]},
                {"name": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(projects.len(), 5);
        assert_eq!(projects[0].github, vec!["https://github.com/foo/foo"]);
        assert!(projects[1].github.is_empty());
        assert!(projects[2].github.is_empty());
        assert_eq!(projects[3].name, "");
        assert_eq!(projects[4].name, "");
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        assert!(parse_catalog(r#"{"name": "Foo"}"#).is_err());
    }

    #[test]
    fn test_select_projects() {
        let projects = parse_catalog(
            r#"[{"name": "Foo"}, {"name": ""}, {"name": "Bar"}, {"name": "Baz"}]"#,
        )
        .unwrap();

        let all: Vec<_> = select_projects(&projects, None).map(|p| p.name.as_str()).collect();
        assert_eq!(all, vec!["Foo", "Bar", "Baz"]);

        let only: HashSet<String> = ["Baz".to_string(), "Foo".to_string()].into();
        let some: Vec<_> = select_projects(&projects, Some(&only))
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(some, vec!["Foo", "Baz"]);
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_catalog_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_catalog(&path).await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_load_catalog_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, r#"[{"name": "Foo Bar", "github": []}]"#).unwrap();

        let projects = load_catalog(&path).await.unwrap();
        assert_eq!(projects[0].name, "Foo Bar");
    }
}
