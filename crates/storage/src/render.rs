//! JPEG variant rendering.
//!
//! Decoding, resizing and encoding are CPU-bound; callers on the async
//! runtime run them through `spawn_blocking`.

use festival_core::images::ImageSize;
use image::imageops::FilterType;
use image::DynamicImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::StorageError;

/// One encoded variant ready for upload.
#[derive(Debug, Clone)]
pub struct RenderedVariant {
    pub size: ImageSize,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Decode any supported input format (JPEG, PNG, WebP).
pub fn decode(data: &[u8]) -> Result<DynamicImage, StorageError> {
    if data.is_empty() {
        return Err(StorageError::EmptyImage);
    }
    Ok(image::load_from_memory(data)?)
}

/// Render `source` as the given variant.
///
/// Variants with a max width are scaled down to fit it, keeping the aspect
/// ratio; a source already narrower than the limit is re-encoded as is.
/// Output is always a progressive JPEG at the variant's quality.
pub fn render_variant(source: &DynamicImage, size: ImageSize) -> Result<RenderedVariant, StorageError> {
    let resized;
    let image = match size.max_width() {
        Some(max_width) if source.width() > max_width => {
            resized = source.resize(max_width, u32::MAX, FilterType::Lanczos3);
            &resized
        }
        _ => source,
    };

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let bytes = encode_progressive_jpeg(rgb.as_raw(), width, height, size.quality())?;

    Ok(RenderedVariant {
        size,
        width,
        height,
        bytes,
    })
}

fn encode_progressive_jpeg(
    rgb: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, StorageError> {
    let too_large = || StorageError::Encode(format!("{width}x{height} exceeds JPEG dimension limit"));
    let width = u16::try_from(width).map_err(|_| too_large())?;
    let height = u16::try_from(height).map_err(|_| too_large())?;

    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, quality);
    encoder.set_progressive(true);
    encoder
        .encode(rgb, width, height, ColorType::Rgb)
        .map_err(|e| StorageError::Encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    /// Encode a solid-colour PNG of the given dimensions.
    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    /// Whether the JPEG stream contains a progressive (SOF2) frame header.
    fn is_progressive(jpeg: &[u8]) -> bool {
        jpeg.windows(2).any(|w| w == [0xFF, 0xC2])
    }

    #[test]
    fn decode_rejects_empty_input() {
        assert_matches!(decode(&[]), Err(StorageError::EmptyImage));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_matches!(decode(b"not an image"), Err(StorageError::Decode(_)));
    }

    #[test]
    fn wide_source_is_scaled_to_max_width() {
        let source = decode(&png(2400, 1200)).unwrap();
        let variant = render_variant(&source, ImageSize::Large).unwrap();
        assert_eq!((variant.width, variant.height), (1200, 600));
    }

    #[test]
    fn narrow_source_is_never_upscaled() {
        let source = decode(&png(150, 100)).unwrap();
        for size in ImageSize::ALL {
            let variant = render_variant(&source, size).unwrap();
            assert_eq!((variant.width, variant.height), (150, 100), "{size}");
        }
    }

    #[test]
    fn original_keeps_source_dimensions() {
        let source = decode(&png(1600, 900)).unwrap();
        let variant = render_variant(&source, ImageSize::Original).unwrap();
        assert_eq!((variant.width, variant.height), (1600, 900));
    }

    #[test]
    fn output_is_progressive_jpeg() {
        let source = decode(&png(64, 48)).unwrap();
        let variant = render_variant(&source, ImageSize::Thumbnail).unwrap();

        assert_eq!(image::guess_format(&variant.bytes).unwrap(), ImageFormat::Jpeg);
        assert!(is_progressive(&variant.bytes));
        let round_trip = image::load_from_memory(&variant.bytes).unwrap();
        assert_eq!((round_trip.width(), round_trip.height()), (64, 48));
    }
}
