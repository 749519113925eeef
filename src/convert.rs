//! Bulk WebP conversion for a directory tree.
//!
//! Walks the tree and produces a sibling `.webp` for every raster file with
//! an extension in [`CONVERT_EXTENSIONS`]. Same contract as the variant
//! pipeline: existing outputs are skipped unless forced, per-file failures
//! are contained and counted, and a dry run reports the exact conversions a
//! real run would perform.

use crate::imaging::{BackendError, EncodeParams, ImageBackend, Quality};
use crate::scan::ScanError;
use crate::variants::{RunStats, VariantStatus, should_generate};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions converted to WebP, lowercase.
pub const CONVERT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

/// One file conversion, reported as it happens.
#[derive(Debug, Clone)]
pub struct ConvertEvent {
    /// Source path relative to the walk root.
    pub source: String,
    /// Destination path relative to the walk root.
    pub dest: String,
    pub status: VariantStatus,
}

fn is_convertible(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            CONVERT_EXTENSIONS
                .iter()
                .any(|&c| ext.eq_ignore_ascii_case(c))
        })
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Convert every eligible file under `root` to a sibling `.webp`.
///
/// The walk is sorted so output order is deterministic. Only a missing root
/// directory is fatal.
pub fn convert_tree(
    backend: &impl ImageBackend,
    root: &Path,
    quality: Quality,
    force: bool,
    dry_run: bool,
    emit: &mut dyn FnMut(ConvertEvent),
) -> Result<RunStats, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
    }

    let mut stats = RunStats::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_convertible(path) {
            continue;
        }

        let dest: PathBuf = path.with_extension("webp");
        let source_rel = relative_display(path, root);
        let dest_rel = relative_display(&dest, root);

        let status = if !should_generate(&dest, force) {
            VariantStatus::Skipped
        } else if dry_run {
            VariantStatus::WouldCreate
        } else {
            match backend.encode(&EncodeParams {
                source: path.to_path_buf(),
                output: dest.clone(),
                quality,
            }) {
                Ok(()) => VariantStatus::Created,
                Err(e) => VariantStatus::Failed(describe(e)),
            }
        };

        stats.record(&status);
        emit(ConvertEvent {
            source: source_rel,
            dest: dest_rel,
            status,
        });
    }

    Ok(stats)
}

fn describe(error: BackendError) -> String {
    match error {
        BackendError::Decode(msg) | BackendError::Encode(msg) => msg,
        BackendError::Io(e) => e.to_string(),
    }
}
