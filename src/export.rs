//! Export sink: SVG pass-through and PNG rasterization.
//!
//! Markup is rendered with resvg, scaled uniformly to fit the requested
//! pixel size and centred, so every output size shows the same picture.
//!
//! # Example
//!
//! ```
//! use dress_customizer::{DressParameters, ExportFormat, Exporter, SizePx, generate_dress};
//!
//! let svg = generate_dress(&DressParameters::default()).to_svg();
//! let png = Exporter.export(&svg, ExportFormat::Png(SizePx::THUMBNAIL)).unwrap();
//! assert!(png.to_data_url().starts_with("data:image/png;base64,"));
//! ```

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scene::Composition;

// ============================================================================
// Sizes and Formats
// ============================================================================

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    /// Variant tray thumbnails.
    pub const THUMBNAIL: SizePx = SizePx::new(200, 280);
    /// Full-resolution download.
    pub const FULL: SizePx = SizePx::new(800, 1120);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Requested export encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ExportFormat {
    /// Markup unchanged.
    Svg,
    /// Raster at the given pixel size.
    Png(SizePx),
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png(_) => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png(_) => "image/png",
        }
    }

    /// Download name, `dress-design-<millis>.<ext>`.
    pub fn file_name(&self, at: DateTime<Utc>) -> String {
        format!("dress-design-{}.{}", at.timestamp_millis(), self.extension())
    }
}

/// Encoded export result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutput {
    Svg(String),
    Png(Vec<u8>),
}

impl ExportOutput {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportOutput::Svg(_) => "image/svg+xml",
            ExportOutput::Png(_) => "image/png",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ExportOutput::Svg(markup) => markup.as_bytes(),
            ExportOutput::Png(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ExportOutput::Svg(markup) => markup.into_bytes(),
            ExportOutput::Png(bytes) => bytes,
        }
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        data_url(self.mime_type(), self.as_bytes())
    }
}

pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

// ============================================================================
// Exporter
// ============================================================================

/// Stateless export sink.
///
/// Each call is a pure function of its markup and size. Overlapping calls
/// from several threads cannot interfere with each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter;

impl Exporter {
    #[tracing::instrument(skip(self, markup), fields(bytes = markup.len()))]
    pub fn export(&self, markup: &str, format: ExportFormat) -> Result<ExportOutput> {
        let output = match format {
            ExportFormat::Svg => ExportOutput::Svg(markup.to_string()),
            ExportFormat::Png(size) => ExportOutput::Png(encode_png(&render_svg(markup, size)?)?),
        };
        tracing::info!(mime = output.mime_type(), len = output.as_bytes().len(), "exported");
        Ok(output)
    }

    pub fn export_composition(
        &self,
        composition: &Composition,
        format: ExportFormat,
    ) -> Result<ExportOutput> {
        self.export(&composition.to_svg(), format)
    }

    /// PNG data URL for a variant tray thumbnail.
    pub fn thumbnail(&self, markup: &str, size: SizePx) -> Result<String> {
        Ok(self.export(markup, ExportFormat::Png(size))?.to_data_url())
    }
}

// ============================================================================
// Rasterization
// ============================================================================

/// Renders SVG markup into a `size` image.
///
/// The picture is scaled uniformly so it fits entirely, then centred. Any
/// leftover area stays transparent.
pub fn render_svg(markup: &str, size: SizePx) -> Result<RgbaImage> {
    if size.is_empty() {
        return Err(Error::invalid_size(size.width, size.height));
    }

    let tree = Tree::from_str(markup, &Options::default())?;

    let svg_size = tree.size();
    let scale = (size.width as f32 / svg_size.width()).min(size.height as f32 / svg_size.height());
    let dx = (size.width as f32 - svg_size.width() * scale) / 2.0;
    let dy = (size.height as f32 - svg_size.height() * scale) / 2.0;

    let mut pixmap = Pixmap::new(size.width, size.height)
        .ok_or_else(|| Error::invalid_size(size.width, size.height))?;
    let transform = Transform::from_scale(scale, scale).post_translate(dx, dy);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap_to_rgba_image(&pixmap)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        data.extend_from_slice(&[r, g, b, a]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or_else(|| Error::invalid_size(pixmap.width(), pixmap.height()))
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        return (0, 0, 0, 0);
    }
    let a_f = a as f32 / 255.0;
    let channel = |c: u8| (c as f32 / a_f).round().min(255.0) as u8;
    (channel(r), channel(g), channel(b), a)
}
