// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — chainable wrapper over one decoded image. Decoding and
// encoding go through the `image` crate; every edit delegates to the pure
// functions in `filters` and `transform`.

use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::{
    BrightnessDelta, CropPolicy, CropRect, GrayscaleIntensity, LumaCoefficients, Operation,
    PipelineConfig, ResizeFilter, Rotation,
};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

use super::{filters, transform};

/// Image processing pipeline operating on a single in-memory image.
///
/// Each edit consumes `self` and returns a new `ImageProcessor` wrapping the
/// transformed image, enabling method chaining. Edits that can fail return
/// `Result<Self>`.
///
/// ```ignore
/// let result = ImageProcessor::open("photo.jpg")?
///     .rotate(Rotation::Clockwise)
///     .grayscale(GrayscaleIntensity::new(20, ParameterPolicy::Reject)?, LumaCoefficients::Rec601)
///     .crop(CropRect::new(0, 0, 640, 480), CropPolicy::Clamp)?
///     .to_png_bytes()?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = open_image(path.as_ref())?;
        Ok(Self { image })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data).map_err(|err| {
            BildwerkError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Edits (consume self, return new Self) ---------------------------------

    /// Convert to gray, lifting luminance by `intensity`.
    pub fn grayscale(self, intensity: GrayscaleIntensity, coefficients: LumaCoefficients) -> Self {
        let rgba = self.image.to_rgba8();
        let gray = filters::apply_grayscale(&rgba, intensity, coefficients);
        Self {
            image: DynamicImage::ImageRgba8(gray),
        }
    }

    /// Shift HSL lightness by `delta`.
    pub fn adjust_brightness(self, delta: BrightnessDelta) -> Self {
        let rgba = self.image.to_rgba8();
        let adjusted = filters::apply_brightness(&rgba, delta);
        Self {
            image: DynamicImage::ImageRgba8(adjusted),
        }
    }

    /// Quarter-turn rotation.
    pub fn rotate(self, rotation: Rotation) -> Self {
        Self {
            image: transform::rotate(&self.image, rotation),
        }
    }

    /// Crop to `rect`; see [`transform::crop`] for out-of-bounds handling.
    pub fn crop(self, rect: CropRect, policy: CropPolicy) -> Result<Self> {
        let cropped = transform::crop(&self.image, rect, policy)?;
        Ok(Self { image: cropped })
    }

    /// Fit within `max_width` x `max_height`, preserving aspect ratio.
    pub fn resize(self, max_width: u32, max_height: u32, filter: ResizeFilter) -> Result<Self> {
        let resized = transform::resize(&self.image, max_width, max_height, filter)?;
        Ok(Self { image: resized })
    }

    /// Validate and apply one edit-script step.
    pub fn apply(self, op: &Operation, config: &PipelineConfig) -> Result<Self> {
        let image = apply_operation(&self.image, op, config)?;
        Ok(Self { image })
    }

    /// Apply edit-script steps in order, stopping at the first failure.
    pub fn apply_all<'a>(
        self,
        ops: impl IntoIterator<Item = &'a Operation>,
        config: &PipelineConfig,
    ) -> Result<Self> {
        ops.into_iter().try_fold(self, |proc, op| proc.apply(op, config))
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        encode_into(&self.image, ImageFormat::Png, &mut std::io::Cursor::new(&mut buffer))?;
        Ok(buffer)
    }

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        rgb.write_with_encoder(encoder).map_err(|err| {
            BildwerkError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save_image(&self.image, path.as_ref())
    }
}

/// Validate `op`'s parameters under `config` and produce the edited image.
#[instrument(skip_all, fields(op = op.name()))]
pub fn apply_operation(
    image: &DynamicImage,
    op: &Operation,
    config: &PipelineConfig,
) -> Result<DynamicImage> {
    let policy = config.parameter_policy;
    let edited = match *op {
        Operation::Grayscale { intensity } => {
            let intensity = GrayscaleIntensity::new(intensity, policy)?;
            let gray = filters::apply_grayscale(&image.to_rgba8(), intensity, config.luma);
            DynamicImage::ImageRgba8(gray)
        }
        Operation::Brightness { delta } => {
            let delta = BrightnessDelta::new(delta, policy)?;
            DynamicImage::ImageRgba8(filters::apply_brightness(&image.to_rgba8(), delta))
        }
        Operation::Rotate { degrees } => transform::rotate(image, Rotation::from_degrees(degrees)?),
        Operation::Crop {
            x,
            y,
            width,
            height,
        } => transform::crop(image, CropRect::new(x, y, width, height), config.crop_policy)?,
        Operation::Resize { width, height } => {
            transform::resize(image, width, height, config.resize_filter)?
        }
    };
    Ok(edited)
}

/// Decode an image file.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let img = image::open(path).map_err(|err| {
        BildwerkError::ImageError(format!("failed to open {}: {}", path.display(), err))
    })?;
    info!(
        width = img.width(),
        height = img.height(),
        "Image loaded"
    );
    Ok(img)
}

/// Encode `image` to `path`, choosing the codec from the extension.
#[instrument(skip(image), fields(path = %path.display()))]
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        BildwerkError::UnsupportedFormat(format!("cannot infer format of {}", path.display()))
    })?;
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    encode_into(image, format, &mut writer)?;
    writer.flush()?;
    info!(?format, "Image saved");
    Ok(())
}

/// Encode into any seekable writer. JPEG has no alpha channel, so the image
/// is flattened to RGB first.
fn encode_into<W: Write + Seek>(image: &DynamicImage, format: ImageFormat, writer: &mut W) -> Result<()> {
    let result = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()).write_to(writer, format),
        _ => image.write_to(writer, format),
    };
    result.map_err(|err| BildwerkError::ImageError(format!("image encoding failed: {}", err)))
}
