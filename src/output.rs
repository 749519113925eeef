//! CLI output formatting for every command.
//!
//! Each event type has a `format_*` function returning plain strings and a
//! `print_*` wrapper that writes to stdout. Format functions are pure (no
//! I/O, no side effects) so the reporting contract is directly testable. In
//! particular, the dry-run symmetry promise (a dry run lists exactly the
//! filenames a real run would create) is asserted against these functions.

use crate::attrs::{AttrEvent, AttrStats};
use crate::convert::ConvertEvent;
use crate::match_size::MatchEvent;
use crate::variants::{RunStats, VariantEvent, VariantStatus};

// ============================================================================
// Variants
// ============================================================================

/// Format a variant pipeline event as display lines.
pub fn format_variant_event(event: &VariantEvent) -> Vec<String> {
    match event {
        VariantEvent::ScanStarted { dir } => {
            vec![format!("Scanning: {dir}")]
        }
        VariantEvent::NoAssets { prefix } => {
            vec![format!(
                "No source images found with names like {prefix}1.jpg, {prefix}2.png, {prefix}3.webp"
            )]
        }
        VariantEvent::BasesFound { names } => {
            vec![format!(
                "Found {} bases: {}",
                names.len(),
                names.join(", ")
            )]
        }
        VariantEvent::BaseStarted { base, source } => {
            vec![format!("Processing {base} -> {source}")]
        }
        VariantEvent::Variant { output, status } => {
            vec![format_status_line(output, status)]
        }
    }
}

fn format_status_line(output: &str, status: &VariantStatus) -> String {
    match status {
        VariantStatus::Created => format!("Created: {output}"),
        VariantStatus::Skipped => format!("Skipping existing: {output}"),
        VariantStatus::WouldCreate => format!("Would create: {output}"),
        VariantStatus::Failed(msg) => format!("Failed to create {output}: {msg}"),
    }
}

pub fn print_variant_event(event: &VariantEvent) {
    for line in format_variant_event(event) {
        println!("{line}");
    }
}

/// Final line for any command reporting [`RunStats`].
pub fn format_summary(stats: &RunStats) -> String {
    format!("Done. {stats}")
}

// ============================================================================
// Convert
// ============================================================================

pub fn format_convert_event(event: &ConvertEvent) -> String {
    match &event.status {
        VariantStatus::Created => format!("Converted: {} -> {}", event.source, event.dest),
        VariantStatus::Skipped => format!("Skipping existing: {}", event.dest),
        VariantStatus::WouldCreate => {
            format!("Would convert: {} -> {}", event.source, event.dest)
        }
        VariantStatus::Failed(msg) => format!("Error converting {}: {msg}", event.source),
    }
}

pub fn print_convert_event(event: &ConvertEvent) {
    println!("{}", format_convert_event(event));
}

// ============================================================================
// Match-size
// ============================================================================

pub fn format_match_event(event: &MatchEvent) -> String {
    match event {
        MatchEvent::ReferenceRead {
            name,
            width,
            height,
        } => format!("Target size (from {name}): {width}x{height}"),
        MatchEvent::Target { name, status } => match status {
            VariantStatus::Created => format!("Resized: {name}"),
            VariantStatus::WouldCreate => format!("Would resize: {name}"),
            VariantStatus::Skipped => format!("Skipping {name}: file missing"),
            VariantStatus::Failed(msg) => format!("Error processing {name}: {msg}"),
        },
        MatchEvent::TargetMissing { name } => format!("Skipping {name}: file missing"),
    }
}

pub fn print_match_event(event: &MatchEvent) {
    println!("{}", format_match_event(event));
}

// ============================================================================
// Img-attrs
// ============================================================================

pub fn format_attr_event(event: &AttrEvent) -> String {
    match event {
        AttrEvent::Updated { file, tags, backup } => {
            format!("Updated {file}: {tags} img tags (backup: {backup})")
        }
        AttrEvent::WouldUpdate { file, tags } => {
            format!("Would update {file}: {tags} img tags")
        }
        AttrEvent::Failed { file, message } => format!("Error updating {file}: {message}"),
    }
}

pub fn print_attr_event(event: &AttrEvent) {
    println!("{}", format_attr_event(event));
}

pub fn format_attr_summary(stats: &AttrStats) -> String {
    format!(
        "Done. Updated {} img tags in {} files ({} failed)",
        stats.tags_updated, stats.files_updated, stats.failed
    )
}
