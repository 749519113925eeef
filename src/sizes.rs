//! Parsing for the `--sizes` width list.
//!
//! Parse-then-validate: tokens are split on commas and each must be a
//! positive integer. Invalid tokens are dropped but always surfaced as
//! warnings, never swallowed. The built-in defaults step in only when no
//! valid width survives at all.

/// Widths generated when no usable size list is given.
pub const DEFAULT_SIZES: [u32; 3] = [480, 800, 1200];

/// Outcome of parsing a comma-separated width list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeList {
    /// At least one valid width; `dropped` holds the rejected tokens.
    Parsed { sizes: Vec<u32>, dropped: Vec<String> },
    /// No valid width at all.
    Invalid { reason: String },
}

/// Parse a list like `"480,800,1200"`.
///
/// Empty tokens (doubled or trailing commas) are ignored silently; anything
/// else that fails to parse as a positive integer is recorded in `dropped`.
/// Duplicate widths collapse to one variant, keeping first-seen order.
pub fn parse_size_list(input: &str) -> SizeList {
    let mut sizes: Vec<u32> = Vec::new();
    let mut dropped = Vec::new();

    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<u32>() {
            Ok(n) if n > 0 => {
                if !sizes.contains(&n) {
                    sizes.push(n);
                }
            }
            _ => dropped.push(token.to_string()),
        }
    }

    if sizes.is_empty() {
        let reason = if dropped.is_empty() {
            "size list is empty".to_string()
        } else {
            format!("no valid widths in size list (rejected: {})", dropped.join(", "))
        };
        SizeList::Invalid { reason }
    } else {
        SizeList::Parsed { sizes, dropped }
    }
}

impl SizeList {
    /// Resolve to usable widths plus human-readable warnings.
    ///
    /// `defaults` is substituted in full only for the `Invalid` case.
    pub fn resolve(self, defaults: &[u32]) -> (Vec<u32>, Vec<String>) {
        match self {
            SizeList::Parsed { sizes, dropped } => {
                let warnings = dropped
                    .iter()
                    .map(|t| format!("ignoring invalid width '{t}'"))
                    .collect();
                (sizes, warnings)
            }
            SizeList::Invalid { reason } => {
                let warning = format!("{reason}; using defaults {defaults:?}");
                (defaults.to_vec(), vec![warning])
            }
        }
    }
}
