//! URL modeling and filename derivation.
//!
//! Derives safe local filenames from the last URL path segment,
//! sanitized for Linux filesystems.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

/// Derives a safe filename for saving a download.
///
/// Uses the last non-empty path segment of `url`, sanitized for Linux (no `/`,
/// NUL, or control chars; no leading/trailing dots or spaces). When the URL has
/// no usable segment, a generated name of the form `file_<8 hex>.txt` is used so
/// two such downloads in one batch do not collide.
///
/// # Examples
///
/// - `derive_filename("https://example.com/archive.zip")` → `"archive.zip"`
/// - `derive_filename("https://example.com/")` → e.g. `"file_3f2a9c01.txt"`
pub fn derive_filename(url: &str) -> String {
    filename_from_url_path(url)
        .map(|raw| sanitize_filename_for_linux(&raw))
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .unwrap_or_else(generated_filename)
}

/// Fallback name for URLs without a usable path segment.
pub fn generated_filename() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("file_{}.txt", &id[..8])
}
