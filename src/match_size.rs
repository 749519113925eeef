//! Resize images to match a reference image's exact dimensions.
//!
//! Support images displayed in a uniform grid need identical pixel boxes.
//! This command reads the reference's dimensions and rescales each target to
//! exactly that size, overwriting the target in place (through the backend's
//! temp-file + rename write, so an interrupt never corrupts the original).
//! Aspect distortion is accepted; the whole point is unifying the boxes.
//!
//! A missing reference is fatal. Missing targets are reported and counted
//! skipped; per-target failures are contained like everywhere else.

use crate::imaging::{BackendError, Dimensions, ImageBackend, Quality, ResizeParams};
use crate::variants::{RunStats, VariantStatus};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("failed to read reference: {0}")]
    Reference(BackendError),
}

/// Progress events for a match-size run.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    ReferenceRead {
        name: String,
        width: u32,
        height: u32,
    },
    Target {
        name: String,
        status: VariantStatus,
    },
    TargetMissing {
        name: String,
    },
}

/// Resize `targets` (filenames within `dir`) to the dimensions of
/// `reference` (also within `dir`).
pub fn match_reference(
    backend: &impl ImageBackend,
    dir: &Path,
    reference: &str,
    targets: &[String],
    quality: Quality,
    dry_run: bool,
    emit: &mut dyn FnMut(MatchEvent),
) -> Result<RunStats, MatchError> {
    if !dir.is_dir() {
        return Err(MatchError::DirectoryNotFound(dir.to_path_buf()));
    }

    let reference_path = dir.join(reference);
    if !reference_path.exists() {
        return Err(MatchError::ReferenceNotFound(reference_path));
    }

    let Dimensions { width, height } = backend
        .identify(&reference_path)
        .map_err(MatchError::Reference)?;

    emit(MatchEvent::ReferenceRead {
        name: reference.to_string(),
        width,
        height,
    });

    let mut stats = RunStats::default();

    for name in targets {
        let path = dir.join(name);
        if !path.exists() {
            stats.record(&VariantStatus::Skipped);
            emit(MatchEvent::TargetMissing { name: name.clone() });
            continue;
        }

        let status = if dry_run {
            VariantStatus::WouldCreate
        } else {
            // In-place overwrite: source and output are the same path. The
            // backend decodes fully before its temp-file write begins.
            match backend.resize(&ResizeParams {
                source: path.clone(),
                output: path.clone(),
                width,
                height,
                quality,
            }) {
                Ok(()) => VariantStatus::Created,
                Err(e) => VariantStatus::Failed(e.to_string()),
            }
        };
        stats.record(&status);
        emit(MatchEvent::Target {
            name: name.clone(),
            status,
        });
    }

    Ok(stats)
}
