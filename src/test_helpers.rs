//! Shared test utilities: synthetic image fixtures.
//!
//! Tests write real, decodable images into temp directories instead of
//! shipping binary fixtures. A gradient fill keeps the encoders honest
//! (uniform color compresses to degenerate output on some paths).

use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;

/// Write a JPEG with the given dimensions.
pub(crate) fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write an opaque PNG with the given dimensions.
pub(crate) fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    img.save(path).unwrap();
}

/// Write a PNG with a (partially transparent) alpha channel.
pub(crate) fn write_test_png_rgba(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 32, ((x + y) % 256) as u8])
    });
    img.save(path).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn synthetic_images_are_decodable() {
        let tmp = TempDir::new().unwrap();

        let jpg = tmp.path().join("a.jpg");
        write_test_jpeg(&jpg, 120, 80);
        assert_eq!(image::image_dimensions(&jpg).unwrap(), (120, 80));

        let png = tmp.path().join("b.png");
        write_test_png(&png, 60, 40);
        assert_eq!(image::image_dimensions(&png).unwrap(), (60, 40));

        let rgba = tmp.path().join("c.png");
        write_test_png_rgba(&rgba, 30, 20);
        assert!(image::open(&rgba).unwrap().color().has_alpha());
    }
}
