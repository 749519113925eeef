//! The variant generation pipeline.
//!
//! For every source asset found by [`scan`](crate::scan) and every requested
//! width, produce `{base}-{width}.webp` next to the source. The run is
//! strictly sequential so log output is deterministic for a given directory.
//!
//! ## Idempotency
//!
//! Existence on disk is the only persisted state. [`should_generate`] skips
//! any output that already exists unless `force` is set, which makes the
//! whole pipeline safely re-runnable: a second run with the same arguments
//! performs no writes.
//!
//! ## Error containment
//!
//! Once the source directory is confirmed to exist, nothing aborts the
//! batch. A decode failure abandons the file's remaining widths (each
//! counted failed); an encode or write failure loses only that one variant.
//! Both are reported through the event stream and the final [`RunStats`].
//!
//! ## Dry run
//!
//! Planning is separated from execution: a dry run walks the identical plan
//! and reports the exact set of outputs a real run would create, including
//! the idempotency guard's skips, without touching the filesystem.

use crate::imaging::{
    BackendError, EncodeParams, ImageBackend, Quality, ResizeParams, variant_dimensions,
};
use crate::scan::{self, ScanError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct VariantConfig {
    pub prefix: String,
    pub sizes: Vec<u32>,
    pub quality: Quality,
    pub force: bool,
    pub dry_run: bool,
}

/// Outcome of a single planned variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantStatus {
    Created,
    Skipped,
    WouldCreate,
    Failed(String),
}

/// Progress events, emitted in deterministic order.
#[derive(Debug, Clone)]
pub enum VariantEvent {
    ScanStarted {
        dir: String,
    },
    NoAssets {
        prefix: String,
    },
    BasesFound {
        names: Vec<String>,
    },
    BaseStarted {
        base: String,
        source: String,
    },
    Variant {
        output: String,
        status: VariantStatus,
    },
}

/// Final counts for a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub created: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl RunStats {
    /// Dry-run "would create" counts as created for summary purposes.
    pub fn record(&mut self, status: &VariantStatus) {
        match status {
            VariantStatus::Created | VariantStatus::WouldCreate => self.created += 1,
            VariantStatus::Skipped => self.skipped += 1,
            VariantStatus::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.created + self.skipped + self.failed
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} failed",
            self.created, self.skipped, self.failed
        )
    }
}

/// Deterministic variant filename for `(base, width)`.
pub fn variant_filename(base: &str, width: u32) -> String {
    format!("{base}-{width}.webp")
}

/// The idempotency guard: generate when forced or when the output is absent.
pub fn should_generate(output: &Path, force: bool) -> bool {
    force || !output.exists()
}

/// One planned output for a base.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedVariant {
    width: u32,
    output: PathBuf,
    create: bool,
}

fn plan_for_base(dir: &Path, base: &str, sizes: &[u32], force: bool) -> Vec<PlannedVariant> {
    sizes
        .iter()
        .map(|&width| {
            let output = dir.join(variant_filename(base, width));
            let create = should_generate(&output, force);
            PlannedVariant {
                width,
                output,
                create,
            }
        })
        .collect()
}

/// Run the pipeline over `dir`.
///
/// Only a missing source directory is fatal; every other failure is
/// contained, emitted as a `Failed` variant event, and counted.
pub fn generate(
    backend: &impl ImageBackend,
    dir: &Path,
    config: &VariantConfig,
    emit: &mut dyn FnMut(VariantEvent),
) -> Result<RunStats, ScanError> {
    emit(VariantEvent::ScanStarted {
        dir: dir.display().to_string(),
    });

    let sources = scan::find_sources(dir, &config.prefix)?;
    let mut stats = RunStats::default();

    if sources.is_empty() {
        emit(VariantEvent::NoAssets {
            prefix: config.prefix.clone(),
        });
        return Ok(stats);
    }

    emit(VariantEvent::BasesFound {
        names: sources.keys().cloned().collect(),
    });

    for (base, source) in &sources {
        let source_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        emit(VariantEvent::BaseStarted {
            base: base.clone(),
            source: source_name,
        });

        let plan = plan_for_base(dir, base, &config.sizes, config.force);

        if config.dry_run {
            for planned in &plan {
                let status = if planned.create {
                    VariantStatus::WouldCreate
                } else {
                    VariantStatus::Skipped
                };
                stats.record(&status);
                emit(variant_event(&planned.output, status));
            }
            continue;
        }

        // Set once the source proves undecodable; the file's remaining
        // widths cannot succeed either.
        let mut abandoned: Option<String> = None;

        for planned in &plan {
            if !planned.create {
                let status = VariantStatus::Skipped;
                stats.record(&status);
                emit(variant_event(&planned.output, status));
                continue;
            }

            if let Some(reason) = &abandoned {
                let status = VariantStatus::Failed(reason.clone());
                stats.record(&status);
                emit(variant_event(&planned.output, status));
                continue;
            }

            let status = match generate_one(backend, source, planned, config.quality) {
                Ok(()) => VariantStatus::Created,
                Err(BackendError::Decode(msg)) => {
                    abandoned = Some(msg.clone());
                    VariantStatus::Failed(msg)
                }
                Err(e) => VariantStatus::Failed(e.to_string()),
            };
            stats.record(&status);
            emit(variant_event(&planned.output, status));
        }
    }

    Ok(stats)
}

fn variant_event(output: &Path, status: VariantStatus) -> VariantEvent {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    VariantEvent::Variant {
        output: name,
        status,
    }
}

fn generate_one(
    backend: &impl ImageBackend,
    source: &Path,
    planned: &PlannedVariant,
    quality: Quality,
) -> Result<(), BackendError> {
    let dims = backend.identify(source)?;

    if planned.width >= dims.width {
        // Never upscale: re-encode at source dimensions under the
        // target-width name so callers can always reference the same
        // naming scheme.
        backend.encode(&EncodeParams {
            source: source.to_path_buf(),
            output: planned.output.clone(),
            quality,
        })
    } else {
        let (width, height) = variant_dimensions((dims.width, dims.height), planned.width);
        backend.resize(&ResizeParams {
            source: source.to_path_buf(),
            output: planned.output.clone(),
            width,
            height,
            quality,
        })
    }
}
