//! Pure calculation functions for variant dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output dimensions for a variant at `target_width`.
///
/// Preserves the source aspect ratio exactly:
/// `height = round(target_width * source_height / source_width)`.
///
/// Sources narrower than (or equal to) the target width keep their own
/// dimensions. Upscaling never produces real detail, so the variant is a
/// plain re-encode in that case.
///
/// # Examples
/// ```
/// # use respimg::imaging::variant_dimensions;
/// // 16:9 landscape scaled down
/// assert_eq!(variant_dimensions((1600, 900), 480), (480, 270));
///
/// // source smaller than target: kept as-is
/// assert_eq!(variant_dimensions((400, 300), 800), (400, 300));
/// ```
pub fn variant_dimensions(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w <= target_width {
        return (src_w, src_h);
    }
    let scaled = (target_width as f64 * src_h as f64 / src_w as f64).round() as u32;
    // A sliver source (e.g. 4000x1) must not round down to zero height
    (target_width, scaled.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_scales_down() {
        assert_eq!(variant_dimensions((1600, 900), 480), (480, 270));
        assert_eq!(variant_dimensions((1600, 900), 800), (800, 450));
    }

    #[test]
    fn portrait_scales_down() {
        // 900x1600 at 480 wide: 1600 * 480/900 = 853.33 -> 853
        assert_eq!(variant_dimensions((900, 1600), 480), (480, 853));
    }

    #[test]
    fn height_is_rounded_not_truncated() {
        // 1000x667 at 480: 667 * 0.48 = 320.16 -> 320
        assert_eq!(variant_dimensions((1000, 667), 480), (480, 320));
        // 1000x666 at 333: 666 * 0.333 = 221.778 -> 222
        assert_eq!(variant_dimensions((1000, 666), 333), (333, 222));
    }

    #[test]
    fn smaller_source_is_never_upscaled() {
        assert_eq!(variant_dimensions((400, 300), 480), (400, 300));
        assert_eq!(variant_dimensions((400, 300), 1200), (400, 300));
    }

    #[test]
    fn equal_width_keeps_source_dimensions() {
        assert_eq!(variant_dimensions((480, 360), 480), (480, 360));
    }

    #[test]
    fn sliver_source_keeps_nonzero_height() {
        assert_eq!(variant_dimensions((4000, 1), 480), (480, 1));
    }

    #[test]
    fn square_source() {
        assert_eq!(variant_dimensions((1000, 1000), 250), (250, 250));
    }
}
