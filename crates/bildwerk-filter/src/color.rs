// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Colour math — luminance and RGB <-> HSL conversion.
//
// Rounding rules:
// - luminance: integer weighted sum, rounded half up.
// - HSL lightness is (max + min) / 2 on the 0-255 channel scale, kept as f32;
//   `Hsl::lightness_u8` rounds to nearest.
// - hue is in degrees [0, 360), saturation in [0, 1]; achromatic colours have
//   hue 0 and saturation 0.
// - reconstruction rounds every channel to nearest and clamps to [0, 255].

use bildwerk_core::LumaCoefficients;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_achromatic(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// Hue / saturation / lightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Degrees in [0, 360).
    pub hue: f32,
    /// Fraction in [0, 1].
    pub saturation: f32,
    /// Channel scale, [0, 255].
    pub lightness: f32,
}

impl Hsl {
    pub fn lightness_u8(&self) -> u8 {
        self.lightness.round().clamp(0.0, 255.0) as u8
    }

    /// Same hue and saturation at a different lightness.
    pub fn with_lightness(self, lightness: f32) -> Self {
        Self {
            lightness: lightness.clamp(0.0, 255.0),
            ..self
        }
    }
}

/// Single-channel brightness of a colour.
pub fn luminance(rgb: Rgb, coefficients: LumaCoefficients) -> u8 {
    let (wr, wg, wb) = coefficients.weights();
    let sum = wr * u32::from(rgb.r) + wg * u32::from(rgb.g) + wb * u32::from(rgb.b);
    ((sum + 5_000) / 10_000).min(255) as u8
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let (r, g, b) = (f32::from(rgb.r), f32::from(rgb.g), f32::from(rgb.b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let lightness = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness,
        };
    }

    let saturation = if lightness <= 127.5 {
        delta / (max + min)
    } else {
        delta / (510.0 - max - min)
    };

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let hue = (60.0 * sector).rem_euclid(360.0);

    Hsl {
        hue,
        saturation: saturation.clamp(0.0, 1.0),
        lightness,
    }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let l = (hsl.lightness / 255.0).clamp(0.0, 1.0);
    let s = hsl.saturation.clamp(0.0, 1.0);
    let h = hsl.hue.rem_euclid(360.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rec601_luminance_of_primaries() {
        let luma = |r, g, b| luminance(Rgb::new(r, g, b), LumaCoefficients::Rec601);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(0, 0, 0), 0);
    }

    #[test]
    fn rec709_weights_green_more() {
        let green = luminance(Rgb::new(0, 255, 0), LumaCoefficients::Rec709);
        assert_eq!(green, 182);
        assert_eq!(
            luminance(Rgb::new(255, 255, 255), LumaCoefficients::Rec709),
            255
        );
    }

    #[test]
    fn hsl_of_known_colours() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert_eq!(red.hue, 0.0);
        assert_eq!(red.saturation, 1.0);
        assert_eq!(red.lightness_u8(), 128);

        let blue = rgb_to_hsl(Rgb::new(0, 0, 255));
        assert_eq!(blue.hue, 240.0);

        let gray = rgb_to_hsl(Rgb::new(90, 90, 90));
        assert_eq!(gray.saturation, 0.0);
        assert_eq!(gray.lightness, 90.0);
    }

    #[test]
    fn hsl_round_trip_is_exact_for_8_bit_colours() {
        let samples = [
            Rgb::new(200, 100, 50),
            Rgb::new(12, 200, 180),
            Rgb::new(250, 250, 10),
            Rgb::new(60, 0, 120),
            Rgb::new(255, 255, 255),
            Rgb::new(0, 0, 0),
        ];
        for rgb in samples {
            assert_eq!(hsl_to_rgb(rgb_to_hsl(rgb)), rgb, "round trip of {rgb:?}");
        }
    }

    #[test]
    fn reconstruction_at_new_lightness_keeps_hue() {
        let hsl = rgb_to_hsl(Rgb::new(200, 100, 50));
        let brighter = rgb_to_hsl(hsl_to_rgb(hsl.with_lightness(hsl.lightness + 30.0)));
        assert!((brighter.hue - hsl.hue).abs() < 1.5);
        assert!((brighter.saturation - hsl.saturation).abs() < 0.02);
        assert!((brighter.lightness - (hsl.lightness + 30.0)).abs() <= 1.0);
    }

    #[test]
    fn extreme_lightness_is_achromatic() {
        let hsl = rgb_to_hsl(Rgb::new(200, 100, 50));
        assert_eq!(hsl_to_rgb(hsl.with_lightness(255.0)), Rgb::new(255, 255, 255));
        assert_eq!(hsl_to_rgb(hsl.with_lightness(0.0)), Rgb::new(0, 0, 0));
    }
}
