// src/logo/score.rs
// =============================================================================
// Heuristic scoring of files that might be a project logo.
//
// Points (they add up):
//   +5  name contains "logo"
//   +3  name contains any of: logo, brand, icon, badge, mark
//   +2  name ends in .svg
//   +1  name ends in any image extension
//   +2  top-level parent directory is a logo hint directory
//
// The weights and word lists are fixed: changing them changes which file
// gets picked for repositories that already have a logo on disk.
// =============================================================================

/// Words that make a file name look like a logo
pub const LOGO_NAME_TOKENS: [&str; 5] = ["logo", "brand", "icon", "badge", "mark"];

/// Directories where logos usually live. Also gates descending below depth 1.
pub const LOGO_DIR_HINTS: [&str; 7] = [
    "assets", "static", "public", "logo", "logos", "branding", "docs",
];

/// File extensions we consider images, with the leading dot
pub const IMAGE_EXTENSIONS: [&str; 5] = [".svg", ".png", ".jpg", ".jpeg", ".webp"];

/// True if the name ends in one of IMAGE_EXTENSIONS (case-insensitive)
pub fn has_image_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// True if a directory name is one of LOGO_DIR_HINTS (case-insensitive)
pub fn is_logo_dir_hint(name: &str) -> bool {
    let lower = name.to_lowercase();
    LOGO_DIR_HINTS.contains(&lower.as_str())
}

/// Scores a file by name and the path of the directory containing it
///
/// `parent` is the repository-relative directory ("" for the root,
/// "docs/img" for nested). Only its first component counts.
pub fn score_candidate(name: &str, parent: &str) -> u32 {
    let lower = name.to_lowercase();
    let mut score = 0;

    if lower.contains("logo") {
        score += 5;
    }
    if LOGO_NAME_TOKENS.iter().any(|token| lower.contains(token)) {
        score += 3;
    }
    if lower.ends_with(".svg") {
        score += 2;
    }
    if has_image_extension(&lower) {
        score += 1;
    }

    let top_level = parent.split('/').next().unwrap_or("");
    if !top_level.is_empty() && is_logo_dir_hint(top_level) {
        score += 2;
    }

    score
}
