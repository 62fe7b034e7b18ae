//! Utility functions for image loading and saving.
//!
//! This module wraps the `image` crate calls the pipeline depends on: decoding
//! a source file, cutting a region out of a raster, and encoding a crop as JPEG.

use std::borrow::Cow;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};

use crate::core::{CropError, CropResult};
use crate::processors::CropBox;

/// Loads an image from a file path.
///
/// # Arguments
///
/// * `path` - A reference to the path of the image file to load
///
/// # Errors
///
/// Returns `CropError::ImageLoad`, naming the path, if the file cannot be
/// opened or decoded.
pub fn load_image(path: &Path) -> CropResult<DynamicImage> {
    image::open(path).map_err(|source| CropError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Copies the region bounded by `crop_box` out of `image`.
///
/// The box is expected to lie inside the image; the `image` crate clamps it
/// otherwise.
pub fn crop_region(image: &DynamicImage, crop_box: &CropBox) -> DynamicImage {
    image.crop_imm(crop_box.x1, crop_box.y1, crop_box.width(), crop_box.height())
}

/// Converts an image into a pixel layout the JPEG encoder accepts.
///
/// JPEG stores 8-bit greyscale or 8-bit RGB without alpha, so other layouts are
/// reduced to the closest of the two.
pub fn flatten_for_jpeg(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(image),
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            Cow::Owned(DynamicImage::ImageLuma8(image.to_luma8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}

/// Encodes `image` as JPEG at `path`.
///
/// # Errors
///
/// Returns `CropError::Write`, naming the path, if encoding or writing fails.
pub fn save_jpeg(image: &DynamicImage, path: &Path) -> CropResult<()> {
    flatten_for_jpeg(image)
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|source| CropError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Luma, LumaA, Rgba};

    #[test]
    fn test_load_missing_image_names_path() {
        let err = load_image(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(err.is_load_failure());
        assert!(err.to_string().contains("definitely/not/here.png"));
    }

    #[test]
    fn test_crop_region_extracts_box() {
        let image = DynamicImage::ImageLuma8(ImageBuffer::from_fn(8, 6, |x, y| {
            Luma([(y * 8 + x) as u8])
        }));
        let crop = crop_region(&image, &CropBox::new(2, 1, 5, 4));
        assert_eq!(crop.dimensions(), (3, 3));
        assert_eq!(crop.get_pixel(0, 0), image.get_pixel(2, 1));
        assert_eq!(crop.get_pixel(2, 2), image.get_pixel(4, 3));
    }

    #[test]
    fn test_flatten_for_jpeg_drops_alpha() {
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
        assert_eq!(flatten_for_jpeg(&rgba).color(), ColorType::Rgb8);

        let luma_alpha = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(2, 2, LumaA([9, 255])));
        assert_eq!(flatten_for_jpeg(&luma_alpha).color(), ColorType::L8);

        let luma = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(2, 2, Luma([9])));
        assert!(matches!(flatten_for_jpeg(&luma), Cow::Borrowed(_)));
    }

    #[test]
    fn test_save_jpeg_round_trips_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crop.jpg");
        let image = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(7, 5, Rgba([10, 20, 30, 255])));

        save_jpeg(&image, &path).unwrap();
        let reloaded = load_image(&path).unwrap();
        assert_eq!(reloaded.dimensions(), (7, 5));
    }

    #[test]
    fn test_save_jpeg_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("crop.jpg");
        let image = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(2, 2, Luma([0])));

        let err = save_jpeg(&image, &path).unwrap_err();
        assert!(matches!(err, CropError::Write { .. }));
    }
}
