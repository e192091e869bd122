//! Neutral placeholder image written when a recipe image cannot be fetched.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::PlaceholderConfig;
use crate::storage::StagedFile;

const JPEG_QUALITY: u8 = 85;

/// Solid gray image of the configured size (never smaller than 1×1).
pub fn placeholder_image(cfg: &PlaceholderConfig) -> RgbImage {
    RgbImage::from_pixel(
        cfg.width.max(1),
        cfg.height.max(1),
        Rgb([cfg.gray, cfg.gray, cfg.gray]),
    )
}

/// Encodes the placeholder as JPEG and atomically stores it at `dest`.
pub fn write_placeholder(dest: &Path, cfg: &PlaceholderConfig) -> Result<PathBuf> {
    let img = placeholder_image(cfg);
    let mut staged = StagedFile::create(dest)?;
    JpegEncoder::new_with_quality(&mut staged, JPEG_QUALITY)
        .encode_image(&img)
        .with_context(|| format!("encode placeholder for {}", dest.display()))?;
    staged.flush()?;
    staged.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_uniform_gray() {
        let img = placeholder_image(&PlaceholderConfig::default());
        assert_eq!(img.dimensions(), (800, 600));
        assert!(img.pixels().all(|p| *p == Rgb([200, 200, 200])));
    }

    #[test]
    fn zero_size_is_clamped() {
        let cfg = PlaceholderConfig {
            width: 0,
            height: 0,
            gray: 10,
        };
        assert_eq!(placeholder_image(&cfg).dimensions(), (1, 1));
    }

    #[test]
    fn written_placeholder_decodes_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("koshary.jpg");
        let cfg = PlaceholderConfig {
            width: 40,
            height: 30,
            gray: 200,
        };
        let path = write_placeholder(&dest, &cfg).unwrap();
        assert_eq!(path, dest);
        assert!(!crate::storage::temp_path(&dest).exists());

        let decoded = image::open(&dest).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (40, 30));
        let p = decoded.get_pixel(20, 15);
        assert!(p.0.iter().all(|c| c.abs_diff(200) <= 3), "pixel {:?}", p);
    }
}
