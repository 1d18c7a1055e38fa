// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print writer — lay an image out on a single paper page and serialise it as
// PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::{PaperSize, PrintConfig};
use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Where the image lands on the page, in PDF points from the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub x_pt: f32,
    pub y_pt: f32,
    pub width_pt: f32,
    pub height_pt: f32,
    /// Factor applied to the image's native size at the configured DPI.
    pub scale: f32,
}

/// Renders images into print-ready single-page PDFs.
pub struct PrintWriter {
    settings: PrintConfig,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PrintWriter {
    pub fn new(settings: PrintConfig) -> Self {
        Self {
            settings,
            title: None,
        }
    }

    pub fn set_paper_size(&mut self, paper: PaperSize) {
        self.settings.paper = paper;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Fit a `width` x `height` pixel image inside the page margins,
    /// preserving aspect ratio, centred. Never scales above native size.
    pub fn layout(&self, width: u32, height: u32) -> Result<PageLayout> {
        if width == 0 || height == 0 {
            return Err(BildwerkError::ImageError(
                "cannot print an image with no pixels".into(),
            ));
        }
        let (w_mm, h_mm) = self.settings.paper.dimensions_mm();
        let (page_w, page_h) = (w_mm as f32, h_mm as f32);
        let margin_mm = self.settings.margin_mm;

        let usable_w_pt = Mm(page_w - 2.0 * margin_mm).into_pt().0;
        let usable_h_pt = Mm(page_h - 2.0 * margin_mm).into_pt().0;

        let dpi = self.settings.dpi;
        let img_w_pt = width as f32 / dpi * 72.0;
        let img_h_pt = height as f32 / dpi * 72.0;

        let scale = (usable_w_pt / img_w_pt).min(usable_h_pt / img_h_pt).min(1.0);
        let width_pt = img_w_pt * scale;
        let height_pt = img_h_pt * scale;

        let margin_pt = Mm(margin_mm).into_pt().0;
        Ok(PageLayout {
            page_width_mm: page_w,
            page_height_mm: page_h,
            x_pt: margin_pt + (usable_w_pt - width_pt) / 2.0,
            y_pt: margin_pt + (usable_h_pt - height_pt) / 2.0,
            width_pt,
            height_pt,
            scale,
        })
    }

    /// Produce the PDF bytes for `image`. Alpha is dropped.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn render(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let layout = self.layout(image.width(), image.height())?;
        let title = self.title.as_deref().unwrap_or("Bildwerk Image");
        info!(paper = ?self.settings.paper, title, "Rendering print PDF");

        let rgb = image.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: image.width() as usize,
            height: image.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(layout.x_pt)),
                translate_y: Some(Pt(layout.y_pt)),
                scale_x: Some(layout.scale),
                scale_y: Some(layout.scale),
                dpi: Some(self.settings.dpi),
                rotate: None,
            },
        }];

        let page = PdfPage::new(Mm(layout.page_width_mm), Mm(layout.page_height_mm), ops);
        doc.with_pages(vec![page]);

        debug!(
            rendered_w_pt = layout.width_pt,
            rendered_h_pt = layout.height_pt,
            scale = layout.scale,
            "Image placed on page"
        );

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }

    /// Render and write the PDF to `path`.
    pub fn write_to_file(&self, image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render(image)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote print PDF to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn a4() -> PrintWriter {
        PrintWriter::new(PrintConfig::default())
    }

    #[test]
    fn small_image_is_centred_at_native_size() {
        let layout = a4().layout(150, 75).unwrap();
        assert_eq!(layout.scale, 1.0);
        // 150 px at 150 dpi is one inch.
        assert!((layout.width_pt - 72.0).abs() < 1e-3);
        assert!((layout.height_pt - 36.0).abs() < 1e-3);

        let page_w_pt = Mm(210.0).into_pt().0;
        let centre_x = layout.x_pt + layout.width_pt / 2.0;
        assert!((centre_x - page_w_pt / 2.0).abs() < 1e-2);
    }

    #[test]
    fn large_image_shrinks_to_usable_area() {
        let layout = a4().layout(6000, 3000).unwrap();
        assert!(layout.scale < 1.0);
        let usable_w_pt = Mm(210.0 - 30.0).into_pt().0;
        assert!((layout.width_pt - usable_w_pt).abs() < 1e-2);
        assert!((layout.width_pt / layout.height_pt - 2.0).abs() < 1e-3);
    }

    #[test]
    fn paper_size_changes_layout() {
        let mut writer = a4();
        writer.set_paper_size(PaperSize::Custom {
            width_mm: 100,
            height_mm: 100,
        });
        let layout = writer.layout(6000, 6000).unwrap();
        assert_eq!(layout.page_width_mm, 100.0);
        assert!((layout.width_pt - Mm(70.0).into_pt().0).abs() < 1e-2);
    }

    #[test]
    fn empty_image_cannot_be_printed() {
        assert!(a4().layout(0, 10).is_err());
    }

    #[test]
    fn render_produces_pdf() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 10, image::Rgb([200, 30, 30])));
        let mut writer = a4();
        writer.set_title("test print");
        let bytes = writer.render(&img).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn write_to_file_creates_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("print.pdf");
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        a4().write_to_file(&img, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
