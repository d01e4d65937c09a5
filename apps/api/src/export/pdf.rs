use std::io::{BufWriter, Cursor};

use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px,
};

use super::raster::RasterImage;
use super::ExportError;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
const MM_PER_INCH: f32 = 25.4;

/// Pixel rows of `image` that land on each A4 page when the image is
/// stretched to the page width. The last slice may be short.
pub fn page_slices(image: &RasterImage) -> Vec<(u32, u32)> {
    if image.width == 0 || image.height == 0 {
        return Vec::new();
    }
    let rows_per_page = ((image.width as f32 * PAGE_HEIGHT_MM / PAGE_WIDTH_MM).round() as u32).max(1);
    let mut slices = Vec::new();
    let mut top = 0;
    while top < image.height {
        let rows = rows_per_page.min(image.height - top);
        slices.push((top, rows));
        top += rows;
    }
    slices
}

/// Lays `image` out at full A4 width. Content taller than one page runs on
/// to further pages, each showing the next slice from the top.
pub fn paginate(image: &RasterImage) -> Result<Vec<u8>, ExportError> {
    let slices = page_slices(image);
    if slices.is_empty() {
        return Err(ExportError::Encode("empty raster".to_string()));
    }

    // Pixels per inch that make the image exactly one page wide.
    let dpi = image.width as f32 * MM_PER_INCH / PAGE_WIDTH_MM;
    let rgb = image.to_rgb();
    let stride = image.width as usize * 3;

    let (doc, first_page, first_layer) =
        PdfDocument::new("Resume", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    for (i, (top, rows)) in slices.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let start = *top as usize * stride;
        let end = start + *rows as usize * stride;
        let slice_height_mm = *rows as f32 * PAGE_WIDTH_MM / image.width as f32;

        Image::from(ImageXObject {
            width: Px(image.width as usize),
            height: Px(*rows as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb[start..end].to_vec(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        })
        .add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                // PDF origin is bottom-left; pin the slice to the top edge.
                translate_y: Some(Mm(PAGE_HEIGHT_MM - slice_height_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    let mut buf = Vec::new();
    {
        let mut writer = BufWriter::new(Cursor::new(&mut buf));
        doc.save(&mut writer)
            .map_err(|e| ExportError::Encode(format!("pdf: {e}")))?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RasterImage {
        RasterImage {
            width,
            height,
            rgba: vec![255; (width * height * 4) as usize],
        }
    }

    #[test]
    fn test_single_page_when_shorter_than_a4() {
        assert_eq!(page_slices(&blank(210, 200)), vec![(0, 200)]);
        assert_eq!(page_slices(&blank(210, 297)), vec![(0, 297)]);
    }

    #[test]
    fn test_tall_content_runs_on_to_more_pages() {
        let slices = page_slices(&blank(210, 700));
        assert_eq!(slices, vec![(0, 297), (297, 297), (594, 106)]);
    }

    #[test]
    fn test_empty_raster_is_an_encode_error() {
        assert!(matches!(paginate(&blank(0, 0)), Err(ExportError::Encode(_))));
    }

    #[test]
    fn test_paginate_writes_a_pdf() {
        let bytes = paginate(&blank(40, 120)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
