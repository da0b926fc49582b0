//! Archive entry source.
//!
//! Reads the tar archive named by the configuration and yields the
//! `(relative_path, is_dir)` pairs the tree builder consumes. The archive
//! is expected to wrap its content in a single top-level directory (the
//! archive root, `virtual_fs` by default); that wrapper entry and anything
//! outside it are skipped, and the prefix is stripped from every surviving
//! path.
//!
//! Archives produced by standard tooling list directories before their
//! contents, which keeps the builder's first-writer-wins rule out of play.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tar::Archive;

/// One member of the archive, relative to the archive root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path with the wrapper prefix stripped, `/`-separated.
    pub path: String,
    /// True for directory members.
    pub is_dir: bool,
}

/// Read all entries under `root` from the tar archive at `archive_path`.
///
/// An archive with no members under the wrapper yields an empty list,
/// which builds a valid empty filesystem. A missing or unreadable archive
/// is an error; the caller treats it as a startup failure.
pub fn read_entries(archive_path: &Path, root: &str) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(archive_path).with_context(|| {
        format!(
            "opening virtual filesystem archive '{}'",
            archive_path.display()
        )
    })?;
    let mut archive = Archive::new(file);
    let prefix = format!("{root}/");

    let mut entries = Vec::new();
    for member in archive.entries().context("reading archive members")? {
        let member = member.context("reading archive member")?;
        let raw = member.path().context("decoding archive member path")?;
        let path = raw.to_string_lossy().replace('\\', "/");
        let path = path.trim_end_matches('/');

        // Skip the wrapper entry itself and anything outside it.
        let Some(relative) = path.strip_prefix(&prefix) else {
            continue;
        };
        if relative.is_empty() {
            continue;
        }

        entries.push(ArchiveEntry {
            path: relative.to_string(),
            is_dir: member.header().entry_type().is_dir(),
        });
    }
    tracing::debug!(
        "loaded {} entries from '{}'",
        entries.len(),
        archive_path.display()
    );
    Ok(entries)
}
