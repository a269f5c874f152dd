// src/logo/mod.rs
// =============================================================================
// This module decides which file in a repository is its logo.
//
// Submodules:
// - score: Points for logo-like names and locations
// - finder: Breadth-first search over the repository tree
// =============================================================================

mod finder;
mod score;

pub use finder::{find_repo_logo, LogoCandidate, LogoSource};
pub use score::IMAGE_EXTENSIONS;
