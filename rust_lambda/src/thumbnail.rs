//! Thumbnail generation.
//!
//! Every thumbnail is exactly [`THUMBNAIL_WIDTH`] pixels wide with the source's
//! aspect ratio. Narrower sources are scaled up. The output keeps the type the
//! key declares: `.jpg` is written as JPEG, `.png` as PNG.

use std::io::Cursor;

use image::error::{LimitError, LimitErrorKind};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, Limits};
use lambda_runtime::tracing;

pub const THUMBNAIL_WIDTH: u32 = 200;

/// Image types a thumbnail is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpg,
    Png,
}

/// Why a key was passed over without producing a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoExtension,
    UnsupportedType(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoExtension => write!(f, "key has no file extension"),
            SkipReason::UnsupportedType(ext) => write!(f, "unsupported image type {ext:?}"),
        }
    }
}

impl ImageKind {
    /// Infers the type from the text after the last `.` of the key.
    pub fn from_key(key: &str) -> Result<Self, SkipReason> {
        let (_, ext) = key.rsplit_once('.').ok_or(SkipReason::NoExtension)?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" => Ok(ImageKind::Jpg),
            "png" => Ok(ImageKind::Png),
            _ => Err(SkipReason::UnsupportedType(ext.to_string())),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Jpg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }

    fn format(&self) -> ImageFormat {
        match self {
            ImageKind::Jpg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
        }
    }
}

#[derive(Debug)]
pub struct Thumbnail {
    pub data: Vec<u8>,
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
}

/// Height that keeps the aspect ratio at [`THUMBNAIL_WIDTH`], never below one pixel.
pub fn scaled_height(width: u32, height: u32) -> u32 {
    let scaled = (height as f64 * THUMBNAIL_WIDTH as f64 / width as f64).round();
    (scaled as u32).max(1)
}

/// Decodes `source`, resizes it and encodes it as `kind`.
///
/// This is CPU bound; async callers should run it on a blocking thread.
pub fn generate(source: &[u8], kind: ImageKind) -> Result<Thumbnail, ImageError> {
    let img = image::load_from_memory(source)?;
    let (orig_w, orig_h) = (img.width(), img.height());
    let height = scaled_height(orig_w, orig_h);

    // The resize target stays within the decoder's allocation budget.
    let max_alloc = Limits::default().max_alloc.unwrap_or(u64::MAX);
    if THUMBNAIL_WIDTH as u64 * height as u64 * 4 > max_alloc {
        return Err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::InsufficientMemory,
        )));
    }

    tracing::debug!(
        original_width = orig_w,
        original_height = orig_h,
        width = THUMBNAIL_WIDTH,
        height,
        "resizing image"
    );

    let resized = img.resize_exact(THUMBNAIL_WIDTH, height, FilterType::Triangle);
    // JPEG has no alpha channel
    let resized = match kind {
        ImageKind::Jpg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        ImageKind::Png => resized,
    };

    let mut data = Vec::new();
    resized.write_to(&mut Cursor::new(&mut data), kind.format())?;

    Ok(Thumbnail {
        data,
        kind,
        width: THUMBNAIL_WIDTH,
        height,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    /// Encodes a gradient of the given size, for use as a fixture.
    pub(crate) fn sample_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), format)
            .unwrap();
        buf
    }

    #[test]
    fn test_kind_from_key() {
        assert_eq!(ImageKind::from_key("HappyFace.jpg"), Ok(ImageKind::Jpg));
        assert_eq!(ImageKind::from_key("photos/Shot.PNG"), Ok(ImageKind::Png));
        assert_eq!(ImageKind::from_key("archive.tar.JPG"), Ok(ImageKind::Jpg));
    }

    #[test]
    fn test_kind_from_key_skips() {
        assert_eq!(ImageKind::from_key("folder/"), Err(SkipReason::NoExtension));
        assert_eq!(ImageKind::from_key("README"), Err(SkipReason::NoExtension));
        assert_eq!(
            ImageKind::from_key("clip.gif"),
            Err(SkipReason::UnsupportedType("gif".to_string()))
        );
        assert_eq!(
            ImageKind::from_key("photo.jpeg"),
            Err(SkipReason::UnsupportedType("jpeg".to_string()))
        );
        assert_eq!(
            ImageKind::from_key("v1.2/notes"),
            Err(SkipReason::UnsupportedType("2/notes".to_string()))
        );
    }

    #[test]
    fn test_scaled_height() {
        assert_eq!(scaled_height(400, 300), 150);
        assert_eq!(scaled_height(1000, 333), 67);
        assert_eq!(scaled_height(300, 200), 133);
        assert_eq!(scaled_height(5000, 1), 1);
        assert_eq!(scaled_height(100, 50), 100);
    }

    #[test]
    fn test_generate_preserves_aspect_ratio() {
        let source = sample_image(640, 480, ImageFormat::Png);
        let thumb = generate(&source, ImageKind::Png).unwrap();
        assert_eq!((thumb.width, thumb.height), (200, 150));

        let decoded = image::load_from_memory(&thumb.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 150));
        assert_eq!(image::guess_format(&thumb.data).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_generate_upscales_narrow_source() {
        let source = sample_image(100, 40, ImageFormat::Png);
        let thumb = generate(&source, ImageKind::Png).unwrap();
        assert_eq!((thumb.width, thumb.height), (200, 80));
    }

    #[test]
    fn test_generate_rejects_oversized_target() {
        // 1x5000 scales to 200x1000000
        let source = sample_image(1, 5000, ImageFormat::Png);
        let err = generate(&source, ImageKind::Png).unwrap_err();
        assert!(matches!(err, ImageError::Limits(_)));
    }

    #[test]
    fn test_generate_jpeg_drops_alpha() {
        let img = RgbaImage::from_pixel(300, 300, Rgba([10, 20, 30, 128]));
        let mut source = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut source), ImageFormat::Png)
            .unwrap();

        let thumb = generate(&source, ImageKind::Jpg).unwrap();
        assert_eq!(image::guess_format(&thumb.data).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&thumb.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 200));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let source = sample_image(800, 600, ImageFormat::Jpeg);
        let first = generate(&source, ImageKind::Jpg).unwrap();
        let second = generate(&source, ImageKind::Jpg).unwrap();
        assert_eq!(first.data, second.data);
    }

    #[test]
    fn test_generate_rejects_garbage() {
        assert!(generate(b"definitely not an image", ImageKind::Png).is_err());
    }
}
