//! Source image discovery.
//!
//! Finds the canonical source file for every logical asset in a directory.
//! A source is any file named `<prefix><N>.<ext>` (case-insensitive), e.g.
//! `infra1.jpg`, `infra2.png`, `INFRA3.WEBP`. Generated variants like
//! `infra1-480.webp` never match: the `-480` suffix breaks the digits rule.
//!
//! When the same base exists under more than one extension, the winner is
//! decided by [`SOURCE_EXTENSIONS`] priority order, not by directory listing
//! order, so the choice is reproducible across platforms and filesystems.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepted source extensions, in tie-break priority order (highest first).
pub const SOURCE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Parse a filename stem as `<prefix><digits>`.
///
/// The prefix comparison is ASCII case-insensitive; the returned base keeps
/// the stem's original casing so output names line up with the source.
///
/// - `"infra3"` with prefix `"infra"` → `Some("infra3")`
/// - `"INFRA3"` with prefix `"infra"` → `Some("INFRA3")`
/// - `"infra"` → `None` (no digits)
/// - `"infra1-480"` → `None` (trailing `-480` is not digits)
/// - `"infrastructure1"` → `None` (`structure1` is not digits)
pub fn parse_base_name(stem: &str, prefix: &str) -> Option<String> {
    let head = stem.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let digits = &stem[prefix.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(stem.to_string())
}

fn extension_priority(ext: &str) -> Option<usize> {
    SOURCE_EXTENSIONS
        .iter()
        .position(|&e| ext.eq_ignore_ascii_case(e))
}

/// Map every base name in `dir` to its chosen source file.
///
/// The map is a `BTreeMap` so callers iterate bases in sorted order and the
/// run's log output is deterministic. An empty map is not an error; the
/// caller reports "no assets found" and exits cleanly.
pub fn find_sources(dir: &Path, prefix: &str) -> Result<BTreeMap<String, PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    // base -> (priority of chosen extension, path)
    let mut chosen: BTreeMap<String, (usize, PathBuf)> = BTreeMap::new();

    for path in entries {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let Some(priority) = extension_priority(ext) else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(base) = parse_base_name(stem, prefix) else {
            continue;
        };

        let replace = match chosen.get(&base) {
            Some((existing, _)) => priority < *existing,
            None => true,
        };
        if replace {
            chosen.insert(base, (priority, path));
        }
    }

    Ok(chosen.into_iter().map(|(base, (_, p))| (base, p)).collect())
}
