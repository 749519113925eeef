//! # respimg
//!
//! Responsive WebP tooling for static site image folders. The filesystem is
//! the database: sources sit next to their generated variants, and a file's
//! existence is the only record that it was ever produced.
//!
//! # The Variant Pipeline
//!
//! The core command, `variants`, turns each source asset into a family of
//! width-scaled WebP files for `srcset` use:
//!
//! ```text
//! infra1.jpg (1600x900)  →  infra1-480.webp  (480x270)
//!                           infra1-800.webp  (800x450)
//!                           infra1-1200.webp (1200x675)
//! ```
//!
//! The pipeline is a single sequential pass: scan → plan → encode → report.
//! Re-running it is free, since existing outputs are skipped unless forced, and a
//! dry run prints exactly the filenames a real run would create.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Source discovery: `<prefix>N.<ext>` matching, one canonical file per base |
//! | [`variants`] | The pipeline: planning, idempotency guard, error containment, stats |
//! | [`convert`] | Bulk tree conversion of legacy rasters to sibling `.webp` files |
//! | [`match_size`] | Resize support images to a reference image's exact dimensions |
//! | [`attrs`] | Lazy-loading attribute injection for HTML templates, with versioned backups |
//! | [`imaging`] | Decode, dimension math, Lanczos3 scaling, lossy WebP encoding |
//! | [`sizes`] | `--sizes` parse-then-validate with explicit warnings |
//! | [`config`] | Optional per-directory `respimg.toml` defaults |
//! | [`output`] | CLI output formatting: pure `format_*` functions, `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Never Upscale
//!
//! A target width at or above the source width re-encodes the source at its
//! own dimensions under the target-width name. Templates can then reference
//! the full naming scheme without caring about source resolution, and no
//! variant ever carries invented detail.
//!
//! ## WebP via libwebp
//!
//! Decoding stays in the pure-Rust `image` crate, but lossy encoding goes
//! through libwebp (the `webp` crate): the `image` crate's own WebP encoder
//! is lossless-only, and quality-controlled output is the whole point here.
//!
//! ## Best-Effort Batches
//!
//! Once the source directory is confirmed to exist, nothing stops the run. A
//! corrupt source loses that file's variants; a failed write loses one
//! variant. Everything else proceeds, and the exit code stays zero; the
//! summary line carries the failure count instead.
//!
//! ## Deterministic Everything
//!
//! Bases iterate in sorted order, ties between source extensions resolve by
//! a fixed priority list, and the run is single-threaded, so two runs over
//! the same tree produce byte-identical logs.

pub mod attrs;
pub mod config;
pub mod convert;
pub mod imaging;
pub mod match_size;
pub mod output;
pub mod scan;
pub mod sizes;
pub mod variants;

#[cfg(test)]
pub(crate) mod test_helpers;
