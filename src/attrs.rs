//! Lazy-loading attribute injection for HTML templates.
//!
//! Adds `loading="lazy" decoding="async"` to every `<img>` tag under a
//! directory that doesn't already carry a `loading` attribute. The rewrite
//! itself is a pure function ([`add_img_attributes`]); the filesystem side
//! keeps two promises:
//!
//! - the pre-modification content survives as a versioned backup
//!   (`page.html.bak-1`, `.bak-2`, ...; existing backups are never touched)
//! - the rewrite lands via temp-file + atomic rename, so an interrupt can
//!   never leave a half-written template under the original name

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),
}

/// Per-file progress events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrEvent {
    Updated {
        file: String,
        tags: usize,
        backup: String,
    },
    WouldUpdate {
        file: String,
        tags: usize,
    },
    Failed {
        file: String,
        message: String,
    },
}

/// Totals for a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttrStats {
    pub files_updated: u32,
    pub tags_updated: u32,
    pub failed: u32,
}

// The regex crate has no lookahead, so the "already has loading=" guard is a
// substring check on each matched tag rather than a negative lookahead.
static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("static regex"));

const INJECTED: &str = r#" loading="lazy" decoding="async""#;

fn has_loading_attr(tag: &str) -> bool {
    tag.to_ascii_lowercase().contains("loading=")
}

fn rewrite_tag(tag: &str) -> String {
    if let Some(body) = tag.strip_suffix("/>") {
        format!("{}{INJECTED} />", body.trim_end())
    } else if let Some(body) = tag.strip_suffix('>') {
        format!("{body}{INJECTED}>")
    } else {
        tag.to_string()
    }
}

/// Rewrite `<img>` tags lacking a `loading` attribute.
///
/// Returns the rewritten document and the number of tags changed. Applying
/// the function twice is a no-op: injected tags carry `loading=` and are
/// left alone on the next pass.
pub fn add_img_attributes(html: &str) -> (String, usize) {
    let mut count = 0;
    let rewritten = IMG_TAG.replace_all(html, |caps: &regex::Captures| {
        let tag = &caps[0];
        if has_loading_attr(tag) {
            tag.to_string()
        } else {
            count += 1;
            rewrite_tag(tag)
        }
    });
    (rewritten.into_owned(), count)
}

/// First unused versioned backup path: `{file}.bak-1`, `.bak-2`, ...
pub fn next_backup_path(path: &Path) -> PathBuf {
    let mut n = 1u32;
    loop {
        let mut name = path.as_os_str().to_os_string();
        name.push(format!(".bak-{n}"));
        let candidate = PathBuf::from(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Back up `path`, then atomically replace it with `content`.
fn rewrite_file(path: &Path, content: &str) -> std::io::Result<PathBuf> {
    let backup = next_backup_path(path);
    std::fs::copy(path, &backup)?;

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(backup)
}

/// Process every `.html` file under `root`.
///
/// Files without eligible tags are left untouched. Per-file IO failures are
/// reported and counted, never fatal.
pub fn inject_attrs(
    root: &Path,
    dry_run: bool,
    emit: &mut dyn FnMut(AttrEvent),
) -> Result<AttrStats, AttrError> {
    if !root.is_dir() {
        return Err(AttrError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut stats = AttrStats::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_html = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("html"));
        if !entry.file_type().is_file() || !is_html {
            continue;
        }

        let file = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                stats.failed += 1;
                emit(AttrEvent::Failed {
                    file,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let (rewritten, tags) = add_img_attributes(&text);
        if tags == 0 {
            continue;
        }

        if dry_run {
            stats.files_updated += 1;
            stats.tags_updated += tags as u32;
            emit(AttrEvent::WouldUpdate { file, tags });
            continue;
        }

        match rewrite_file(path, &rewritten) {
            Ok(backup) => {
                stats.files_updated += 1;
                stats.tags_updated += tags as u32;
                emit(AttrEvent::Updated {
                    file,
                    tags,
                    backup: backup
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                });
            }
            Err(e) => {
                stats.failed += 1;
                emit(AttrEvent::Failed {
                    file,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(stats)
}
