use std::sync::Arc;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use tracing::debug;

use super::ExportError;
use crate::models::Rgb;

/// Straight (non-premultiplied) RGBA pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RasterImage {
    /// Drops the alpha channel. The page is painted on an opaque background so
    /// nothing is lost.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

pub trait Rasterizer: Send + Sync {
    /// Renders `svg` at `pixel_ratio` device pixels per SVG unit over an
    /// opaque `background`.
    fn rasterize(&self, svg: &str, pixel_ratio: f32, background: Rgb) -> Result<RasterImage, ExportError>;
}

pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRasterizer {
    /// Loads system fonts once; this is slow, so build one and share it.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "Loaded system fonts for rasterizing");
        Self { fontdb: Arc::new(db) }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, pixel_ratio: f32, background: Rgb) -> Result<RasterImage, ExportError> {
        let mut opt = usvg::Options::default();
        opt.font_family = "Inter".to_string();
        opt.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| ExportError::Rasterize(format!("invalid document: {e}")))?;

        let size = tree.size();
        let width = (size.width() * pixel_ratio).ceil() as u32;
        let height = (size.height() * pixel_ratio).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ExportError::Rasterize(format!("cannot allocate a {width}x{height} canvas"))
        })?;

        let Rgb(r, g, b) = background;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));
        resvg::render(
            &tree,
            Transform::from_scale(pixel_ratio, pixel_ratio),
            &mut pixmap.as_mut(),
        );

        Ok(RasterImage {
            width,
            height,
            rgba: pixmap.take(),
        })
    }
}

pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, ExportError> {
    let mut data = Vec::new();
    PngEncoder::new(&mut data)
        .write_image(&image.rgba, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="8" viewBox="0 0 10 8"><rect x="0" y="0" width="5" height="8" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_resvg_scales_and_fills_background() {
        let raster = ResvgRasterizer {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        };
        let image = raster.rasterize(SQUARE, 2.0, Rgb(0x05, 0x05, 0x0a)).unwrap();
        assert_eq!((image.width, image.height), (20, 16));

        let pixel = |x: u32, y: u32| {
            let i = ((y * image.width + x) * 4) as usize;
            [image.rgba[i], image.rgba[i + 1], image.rgba[i + 2], image.rgba[i + 3]]
        };
        assert_eq!(pixel(2, 2), [0xff, 0, 0, 0xff]);
        assert_eq!(pixel(18, 14), [0x05, 0x05, 0x0a, 0xff]);
    }

    #[test]
    fn test_malformed_svg_is_a_rasterize_error() {
        let raster = ResvgRasterizer {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        };
        let err = raster.rasterize("<svg", 2.0, Rgb::WHITE).unwrap_err();
        assert!(matches!(err, ExportError::Rasterize(_)));
    }

    #[test]
    fn test_rgb_strips_alpha() {
        let image = RasterImage {
            width: 2,
            height: 1,
            rgba: vec![1, 2, 3, 255, 4, 5, 6, 255],
        };
        assert_eq!(image.to_rgb(), vec![1, 2, 3, 4, 5, 6]);
    }
}
