// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel filters — grayscale with intensity offset and HSL brightness.
//
// Both are single passes over an RGBA buffer. Geometry and alpha are never
// touched; only the colour channels change.

use bildwerk_core::{BrightnessDelta, GrayscaleIntensity, LumaCoefficients};
use image::{Rgba, RgbaImage};
use imageproc::map::map_colors;
use tracing::{debug, instrument};

use crate::color::{Rgb, hsl_to_rgb, luminance, rgb_to_hsl};

/// Replace every pixel with a neutral gray of its luminance plus `intensity`,
/// saturating at 255.
#[instrument(skip_all, fields(width = image.width(), height = image.height(), intensity = intensity.get()))]
pub fn apply_grayscale(
    image: &RgbaImage,
    intensity: GrayscaleIntensity,
    coefficients: LumaCoefficients,
) -> RgbaImage {
    let offset = intensity.get();
    let out = map_colors(image, |Rgba([r, g, b, a])| {
        let gray = luminance(Rgb::new(r, g, b), coefficients).saturating_add(offset);
        Rgba([gray, gray, gray, a])
    });
    debug!("Grayscale pass complete");
    out
}

/// Shift the HSL lightness of every pixel by `delta`, keeping hue and
/// saturation.
#[instrument(skip_all, fields(width = image.width(), height = image.height(), delta = delta.get()))]
pub fn apply_brightness(image: &RgbaImage, delta: BrightnessDelta) -> RgbaImage {
    let delta = delta.get();
    if delta == 0 {
        return image.clone();
    }
    let out = map_colors(image, |Rgba([r, g, b, a])| {
        let hsl = rgb_to_hsl(Rgb::new(r, g, b));
        let target = (i32::from(hsl.lightness_u8()) + delta).clamp(0, 255);
        let Rgb { r, g, b } = hsl_to_rgb(hsl.with_lightness(target as f32));
        Rgba([r, g, b, a])
    });
    debug!("Brightness pass complete");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildwerk_core::ParameterPolicy;

    fn intensity(v: i32) -> GrayscaleIntensity {
        GrayscaleIntensity::new(v, ParameterPolicy::Reject).unwrap()
    }

    fn delta(v: i32) -> BrightnessDelta {
        BrightnessDelta::new(v, ParameterPolicy::Reject).unwrap()
    }

    /// 2x2: red, green / blue, white.
    fn primaries() -> RgbaImage {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        img
    }

    /// Deterministic assortment of colours with varied alpha.
    fn assorted(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([
                (x * 37 + y * 11) as u8,
                (x * 5 + y * 53) as u8,
                (x * 91 + y * 23) as u8,
                (x * 7 + y * 3) as u8,
            ])
        })
    }

    #[test]
    fn grayscale_primaries_map_to_standard_luminance() {
        let out = apply_grayscale(&primaries(), intensity(0), LumaCoefficients::Rec601);
        assert_eq!(out.get_pixel(0, 0), &Rgba([76, 76, 76, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([150, 150, 150, 255]));
        assert_eq!(out.get_pixel(0, 1), &Rgba([29, 29, 29, 255]));
        assert_eq!(out.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn grayscale_output_is_neutral_and_offset_with_clamp() {
        let input = assorted(17, 9);
        for offset in [0, 40, 200, 255] {
            let out = apply_grayscale(&input, intensity(offset), LumaCoefficients::Rec601);
            assert_eq!(out.dimensions(), input.dimensions());
            for (src, dst) in input.pixels().zip(out.pixels()) {
                let [r, g, b, a] = src.0;
                let expected = (i32::from(luminance(Rgb::new(r, g, b), LumaCoefficients::Rec601))
                    + offset)
                    .clamp(0, 255) as u8;
                assert_eq!(dst.0, [expected, expected, expected, a]);
            }
        }
    }

    #[test]
    fn brightness_on_black_is_clamped_and_achromatic() {
        let black = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let out = apply_brightness(&black, delta(100));
        let [r, g, b, a] = out.get_pixel(0, 0).0;
        assert!(Rgb::new(r, g, b).is_achromatic());
        assert_eq!([r, g, b, a], [100, 100, 100, 255]);
    }

    #[test]
    fn brightness_saturates_at_white_and_black() {
        let light = RgbaImage::from_pixel(1, 1, Rgba([240, 240, 240, 10]));
        assert_eq!(
            apply_brightness(&light, delta(100)).get_pixel(0, 0),
            &Rgba([255, 255, 255, 10])
        );
        let dark = RgbaImage::from_pixel(1, 1, Rgba([20, 30, 40, 200]));
        assert_eq!(
            apply_brightness(&dark, delta(-100)).get_pixel(0, 0),
            &Rgba([0, 0, 0, 200])
        );
    }

    #[test]
    fn brightness_preserves_hue_and_saturation() {
        let colours = [[200u8, 100, 50], [40, 120, 90], [90, 60, 160], [150, 150, 60]];
        for [r, g, b] in colours {
            let input = RgbaImage::from_pixel(1, 1, Rgba([r, g, b, 255]));
            let before = rgb_to_hsl(Rgb::new(r, g, b));
            for d in [-30, -5, 5, 30] {
                let px = apply_brightness(&input, delta(d)).get_pixel(0, 0).0;
                let after = rgb_to_hsl(Rgb::new(px[0], px[1], px[2]));
                let target = f32::from(before.lightness_u8()) + d as f32;

                assert!((after.lightness - target).abs() <= 1.0, "{r},{g},{b} {d}");
                assert!((after.hue - before.hue).abs() < 2.0, "{r},{g},{b} {d}");
                assert!(
                    (after.saturation - before.saturation).abs() < 0.03,
                    "{r},{g},{b} {d}"
                );
            }
        }
    }

    #[test]
    fn brightness_zero_is_identity_and_keeps_geometry() {
        let input = assorted(5, 8);
        assert_eq!(apply_brightness(&input, delta(0)), input);
        assert_eq!(apply_brightness(&input, delta(-40)).dimensions(), (5, 8));
    }
}
