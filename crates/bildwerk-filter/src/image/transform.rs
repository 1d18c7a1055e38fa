// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric edits — quarter-turn rotation, crop, and aspect-preserving resize.

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::{CropPolicy, CropRect, ResizeFilter, Rotation, Size};
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::{debug, info, instrument, warn};

/// Rotate by a quarter turn. Lossless; width and height swap.
#[instrument(skip_all, fields(degrees = rotation.degrees()))]
pub fn rotate(image: &DynamicImage, rotation: Rotation) -> DynamicImage {
    info!("Rotating image");
    match rotation {
        Rotation::Clockwise => image.rotate90(),
        Rotation::CounterClockwise => image.rotate270(),
    }
}

/// Cut out `rect`.
///
/// A rectangle reaching past the image edge is intersected with the image
/// under `CropPolicy::Clamp` and refused under `CropPolicy::Reject`. A
/// rectangle that leaves nothing to keep is always refused.
#[instrument(skip_all, fields(rect = %rect, policy = ?policy))]
pub fn crop(image: &DynamicImage, rect: CropRect, policy: CropPolicy) -> Result<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    let out_of_bounds = || BildwerkError::OutOfBoundsRegion {
        rect,
        width,
        height,
    };

    if rect.is_empty() {
        return Err(out_of_bounds());
    }
    let region = if rect.is_within(width, height) {
        rect
    } else {
        match policy {
            CropPolicy::Reject => return Err(out_of_bounds()),
            CropPolicy::Clamp => {
                let clipped = rect.intersect(width, height).ok_or_else(out_of_bounds)?;
                warn!(requested = %rect, clipped = %clipped, "Crop rectangle clamped to image bounds");
                clipped
            }
        }
    };

    info!(region = %region, "Cropping image");
    Ok(image.crop_imm(region.x, region.y, region.width, region.height))
}

/// Largest output `resize` will produce: 100 megapixels, 400 MB as RGBA.
pub const MAX_RESIZE_PIXELS: u64 = 100_000_000;

/// Scale to fit within `max_width` x `max_height`, preserving aspect ratio.
///
/// Upscaling is allowed up to [`MAX_RESIZE_PIXELS`]; bounds that would fit a
/// larger image are `InvalidParameter` on the side that limits the fit.
#[instrument(skip(image), fields(max_width, max_height))]
pub fn resize(
    image: &DynamicImage,
    max_width: u32,
    max_height: u32,
    filter: ResizeFilter,
) -> Result<DynamicImage> {
    if max_width == 0 {
        return Err(BildwerkError::invalid_parameter("width", 0, 1, u32::MAX.into()));
    }
    if max_height == 0 {
        return Err(BildwerkError::invalid_parameter("height", 0, 1, u32::MAX.into()));
    }
    let (w, h) = (image.width(), image.height());
    let fitted = Size::new(w, h).fit_within(Size::new(max_width, max_height));
    if u64::from(fitted.width) * u64::from(fitted.height) > MAX_RESIZE_PIXELS {
        let (w, h) = (u64::from(w), u64::from(h));
        let err = if fitted.width == max_width {
            let limit = (MAX_RESIZE_PIXELS * w / h).isqrt();
            BildwerkError::invalid_parameter("width", max_width.into(), 1, limit as i64)
        } else {
            let limit = (MAX_RESIZE_PIXELS * h / w).isqrt();
            BildwerkError::invalid_parameter("height", max_height.into(), 1, limit as i64)
        };
        warn!(fitted_w = fitted.width, fitted_h = fitted.height, "Resize target too large");
        return Err(err);
    }
    info!(
        from_w = image.width(),
        from_h = image.height(),
        max_width,
        max_height,
        "Resizing image"
    );
    let resized = image.resize(max_width, max_height, filter_type(filter));
    debug!(
        new_w = resized.width(),
        new_h = resized.height(),
        "Resize complete"
    );
    Ok(resized)
}

pub(crate) fn filter_type(filter: ResizeFilter) -> FilterType {
    match filter {
        ResizeFilter::Nearest => FilterType::Nearest,
        ResizeFilter::Triangle => FilterType::Triangle,
        ResizeFilter::CatmullRom => FilterType::CatmullRom,
        ResizeFilter::Gaussian => FilterType::Gaussian,
        ResizeFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    /// 3x2 image where every pixel is distinct.
    fn numbered() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(3, 2, |x, y| {
            Rgba([(x * 10) as u8, (y * 10) as u8, (x + 3 * y) as u8, 255])
        }))
    }

    #[test]
    fn rotate_swaps_dimensions() {
        let img = numbered();
        let right = rotate(&img, Rotation::Clockwise);
        assert_eq!(right.dimensions(), (2, 3));
        let left = rotate(&img, Rotation::CounterClockwise);
        assert_eq!(left.dimensions(), (2, 3));
    }

    #[test]
    fn clockwise_moves_bottom_left_to_top_left() {
        let img = numbered();
        let right = rotate(&img, Rotation::Clockwise);
        // Rotating right puts the old bottom-left pixel at the top-left.
        assert_eq!(right.get_pixel(0, 0), img.get_pixel(0, 1));
        assert_eq!(right.get_pixel(1, 0), img.get_pixel(0, 0));
    }

    #[test]
    fn rotate_right_then_left_is_identity() {
        let img = numbered();
        for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let back = rotate(&rotate(&img, rotation), rotation.inverse());
            assert_eq!(back.to_rgba8(), img.to_rgba8());
        }
    }

    #[test]
    fn crop_inside_bounds_returns_region() {
        let img = numbered();
        let out = crop(&img, CropRect::new(1, 0, 2, 2), CropPolicy::Reject).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(1, 0));
        assert_eq!(out.get_pixel(1, 1), img.get_pixel(2, 1));
    }

    #[test]
    fn crop_past_edge_clamps_or_rejects() {
        let img = numbered();
        let rect = CropRect::new(2, 1, 10, 10);

        let clamped = crop(&img, rect, CropPolicy::Clamp).unwrap();
        assert_eq!(clamped.dimensions(), (1, 1));
        assert_eq!(clamped.get_pixel(0, 0), img.get_pixel(2, 1));

        let err = crop(&img, rect, CropPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            BildwerkError::OutOfBoundsRegion {
                width: 3,
                height: 2,
                ..
            }
        ));
    }

    #[test]
    fn crop_with_nothing_left_is_refused() {
        let img = numbered();
        assert!(crop(&img, CropRect::new(5, 5, 2, 2), CropPolicy::Clamp).is_err());
        assert!(crop(&img, CropRect::new(0, 0, 0, 2), CropPolicy::Clamp).is_err());
    }

    #[test]
    fn resize_keeps_aspect_ratio() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(400, 200));
        let out = resize(&img, 100, 100, ResizeFilter::Triangle).unwrap();
        assert_eq!(out.dimensions(), (100, 50));
    }

    #[test]
    fn resize_to_zero_is_invalid() {
        let img = numbered();
        let err = resize(&img, 0, 10, ResizeFilter::Nearest).unwrap_err();
        assert!(matches!(
            err,
            BildwerkError::InvalidParameter { name: "width", .. }
        ));
    }

    #[test]
    fn resize_upscales_within_limit() {
        let out = resize(&numbered(), 300, 300, ResizeFilter::Nearest).unwrap();
        assert_eq!(out.dimensions(), (300, 200));
    }

    #[test]
    fn resize_past_pixel_limit_is_refused() {
        let err = resize(&numbered(), u32::MAX, u32::MAX, ResizeFilter::Nearest).unwrap_err();
        match err {
            BildwerkError::InvalidParameter {
                name, value, max, ..
            } => {
                assert_eq!(name, "width");
                assert_eq!(value, i64::from(u32::MAX));
                // 3:2 image, so width may reach sqrt(1e8 * 3 / 2).
                assert_eq!(max, 12_247);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let tall = rotate(&numbered(), Rotation::Clockwise);
        let err = resize(&tall, u32::MAX, 1_000_000, ResizeFilter::Nearest).unwrap_err();
        assert!(matches!(
            err,
            BildwerkError::InvalidParameter { name: "height", .. }
        ));
    }
}
