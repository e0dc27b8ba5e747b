//! Dominant-color extraction.
//!
//! Pixels are sampled at a fixed stride over the native-resolution RGBA
//! buffer, translucent samples are dropped, and the remaining exact RGB
//! triples are ranked by how often they were seen.

use crate::{
    config::ExtractionConfig,
    error::{CreativeError, Result},
    models::{Color, DataUrl, InlineImage},
};
use image::RgbaImage;
use indexmap::IndexMap;

/// Rank the `count` most frequent opaque colors using the default sampling
/// stride and alpha cutoff.
pub fn extract_palette(image: &RgbaImage, count: usize) -> Vec<Color> {
    PaletteExtractor::new(ExtractionConfig::default().with_color_count(count)).extract(image)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteExtractor {
    config: ExtractionConfig,
}

impl PaletteExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn extract(&self, image: &RgbaImage) -> Vec<Color> {
        let stride = self.config.sample_stride.max(1);
        let mut counts: IndexMap<Color, usize> = IndexMap::new();

        for pixel in image.pixels().step_by(stride) {
            let [r, g, b, a] = pixel.0;
            if a < self.config.alpha_threshold {
                continue;
            }
            *counts.entry(Color::new(r, g, b)).or_insert(0) += 1;
        }

        let mut ranked: Vec<(Color, usize)> = counts.into_iter().collect();
        // Stable: equal counts keep first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        log::debug!(
            "Palette sampled {}x{} image at stride {}: {} distinct opaque colors",
            image.width(),
            image.height(),
            stride,
            ranked.len()
        );

        ranked
            .into_iter()
            .take(self.config.color_count)
            .map(|(color, _)| color)
            .collect()
    }

    /// Build a raster from a raw RGBA8 buffer and extract from it.
    pub fn extract_raw(&self, width: u32, height: u32, rgba: Vec<u8>) -> Result<Vec<Color>> {
        if width == 0 || height == 0 {
            return Err(CreativeError::RenderContext(format!(
                "cannot build a {}x{} raster",
                width, height
            )));
        }

        let len = rgba.len();
        let raster = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            CreativeError::RenderContext(format!(
                "{} bytes do not fill a {}x{} RGBA raster",
                len, width, height
            ))
        })?;

        Ok(self.extract(&raster))
    }

    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<Vec<Color>> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| CreativeError::ImageDecode(e.to_string()))?;
        self.extract_decoded(decoded)
    }

    pub fn extract_inline(&self, image: &InlineImage) -> Result<Vec<Color>> {
        self.extract_decoded(image.decode()?)
    }

    /// A malformed envelope is reported as a decode failure here: for
    /// extraction both mean "no pixels to read".
    pub fn extract_data_url(&self, url: &DataUrl) -> Result<Vec<Color>> {
        let inline = url
            .parse()
            .map_err(|e| CreativeError::ImageDecode(e.to_string()))?;
        self.extract_inline(&inline)
    }

    fn extract_decoded(&self, decoded: image::DynamicImage) -> Result<Vec<Color>> {
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(CreativeError::RenderContext("image has no pixels".into()));
        }
        Ok(self.extract(&decoded.to_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// One row of pixels. With stride 1 every pixel is counted.
    fn strip(pixels: &[Rgba<u8>]) -> RgbaImage {
        let mut image = RgbaImage::new(pixels.len() as u32, 1);
        for (x, pixel) in pixels.iter().enumerate() {
            image.put_pixel(x as u32, 0, *pixel);
        }
        image
    }

    fn every_pixel() -> PaletteExtractor {
        PaletteExtractor::new(ExtractionConfig::default().with_sample_stride(1))
    }

    #[test]
    fn ranks_by_descending_frequency() {
        let mut pixels = vec![BLUE; 2];
        pixels.extend(vec![RED; 5]);
        pixels.extend(vec![GREEN; 3]);

        let palette = every_pixel().extract(&strip(&pixels));
        assert_eq!(
            palette,
            vec![
                Color::new(255, 0, 0),
                Color::new(0, 255, 0),
                Color::new(0, 0, 255)
            ]
        );
    }

    #[test]
    fn returns_fewer_when_fewer_colors_exist() {
        let palette = extract_palette(&RgbaImage::from_pixel(10, 10, GREEN), 5);
        assert_eq!(palette, vec![Color::new(0, 255, 0)]);
    }

    #[test]
    fn truncates_to_count() {
        let pixels = [RED, RED, RED, GREEN, GREEN, BLUE];
        let extractor = PaletteExtractor::new(
            ExtractionConfig::default()
                .with_sample_stride(1)
                .with_color_count(2),
        );
        let palette = extractor.extract(&strip(&pixels));
        assert_eq!(palette, vec![Color::new(255, 0, 0), Color::new(0, 255, 0)]);
    }

    #[test]
    fn translucent_image_yields_empty_palette() {
        let image = RgbaImage::from_pixel(20, 20, Rgba([10, 20, 30, 127]));
        assert!(extract_palette(&image, 5).is_empty());
    }

    #[test]
    fn alpha_cutoff_is_inclusive_at_threshold() {
        let pixels = [Rgba([1, 2, 3, 128]), Rgba([4, 5, 6, 127])];
        assert_eq!(every_pixel().extract(&strip(&pixels)), vec![Color::new(1, 2, 3)]);
    }

    #[test]
    fn samples_every_fifth_pixel_by_default() {
        // Red sits only on the sampled indices 0, 5, 10, 15; blue fills the rest.
        let pixels: Vec<Rgba<u8>> = (0..20)
            .map(|i| if i % 5 == 0 { RED } else { BLUE })
            .collect();
        assert_eq!(extract_palette(&strip(&pixels), 5), vec![Color::new(255, 0, 0)]);
    }

    #[test]
    fn hex_output_matches_source_colors() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([0x11, 0x22, 0x33, 255]));
        let hex: Vec<String> = extract_palette(&image, 5)
            .iter()
            .map(Color::to_hex)
            .collect();
        assert_eq!(hex, vec!["#112233".to_string()]);
    }

    #[test]
    fn source_image_is_untouched() {
        let image = strip(&[RED, GREEN, Rgba([0, 0, 0, 0])]);
        let before = image.clone();
        let _ = every_pixel().extract(&image);
        assert_eq!(image, before);
    }

    #[test]
    fn raw_buffer_size_mismatch_is_render_context_error() {
        let err = every_pixel().extract_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, CreativeError::RenderContext(_)));

        let err = every_pixel().extract_raw(0, 4, Vec::new()).unwrap_err();
        assert!(matches!(err, CreativeError::RenderContext(_)));

        let palette = every_pixel().extract_raw(1, 1, vec![9, 8, 7, 255]).unwrap();
        assert_eq!(palette, vec![Color::new(9, 8, 7)]);
    }

    #[test]
    fn corrupt_bytes_are_decode_errors() {
        let err = every_pixel().extract_bytes(b"\x89PNG\r\n\x1a\nnope").unwrap_err();
        assert!(matches!(err, CreativeError::ImageDecode(_)));

        let err = every_pixel()
            .extract_data_url(&DataUrl::new("not an envelope"))
            .unwrap_err();
        assert!(matches!(err, CreativeError::ImageDecode(_)));
    }

    #[test]
    fn decodes_png_envelopes() {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(3, 3, Rgba([0xAB, 0xCD, 0xEF, 255]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let url = InlineImage::new("image/png", bytes).to_data_url();

        let palette = every_pixel().extract_data_url(&url).unwrap();
        assert_eq!(palette, vec![Color::new(0xAB, 0xCD, 0xEF)]);
    }
}
