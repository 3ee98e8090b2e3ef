//! Tooltip rasteriser
//!
//! Draws a [`TooltipLabel`] into a tiny-skia pixmap: the label background,
//! a one pixel border and the text, both in the label foreground color.

use thiserror::Error;
use tiny_skia::{Color, Paint, Pixmap, PremultipliedColorU8, Rect, Transform};

use crate::domain::color::SampledColor;
use crate::domain::picker::{Size, TooltipLabel};

use super::glyphs::GlyphSource;

/// Space between the border and the text
const PADDING: u32 = 6;

/// Border thickness
const BORDER: f32 = 1.0;

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cannot allocate a {width}x{height} tooltip")]
    InvalidSize { width: u32, height: u32 },
}

/// Rasterises tooltip labels
pub struct TooltipRenderer {
    glyphs: GlyphSource,
}

impl TooltipRenderer {
    pub fn new(glyphs: GlyphSource) -> Self {
        Self { glyphs }
    }

    /// The glyph source in use
    pub fn glyphs(&self) -> &GlyphSource {
        &self.glyphs
    }

    /// Size of the rendered tooltip for `label`
    pub fn measure(&self, label: &TooltipLabel) -> Size {
        let text_width = self.glyphs.text_width(&label.text).ceil() as u32;
        let text_height = (self.glyphs.ascent() + self.glyphs.descent()).ceil() as u32;
        Size::new(text_width + 2 * PADDING, text_height + 2 * PADDING)
    }

    /// Draw `label` into a new pixmap of `measure(label)` size
    pub fn render(&self, label: &TooltipLabel) -> Result<Pixmap, RenderError> {
        let size = self.measure(label);
        let mut pixmap =
            Pixmap::new(size.width, size.height).ok_or(RenderError::InvalidSize {
                width: size.width,
                height: size.height,
            })?;

        pixmap.fill(to_skia(label.background));

        let foreground = to_skia(label.foreground);
        self.draw_border(&mut pixmap, foreground);
        self.draw_text(&mut pixmap, &label.text, foreground);

        Ok(pixmap)
    }

    fn draw_border(&self, pixmap: &mut Pixmap, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(color);

        let w = pixmap.width() as f32;
        let h = pixmap.height() as f32;
        let edges = [
            Rect::from_xywh(0.0, 0.0, w, BORDER),
            Rect::from_xywh(0.0, h - BORDER, w, BORDER),
            Rect::from_xywh(0.0, 0.0, BORDER, h),
            Rect::from_xywh(w - BORDER, 0.0, BORDER, h),
        ];

        for edge in edges.into_iter().flatten() {
            pixmap.fill_rect(edge, &paint, Transform::identity(), None);
        }
    }

    fn draw_text(&self, pixmap: &mut Pixmap, text: &str, color: Color) {
        let width = pixmap.width();
        let height = pixmap.height();
        let y_baseline = PADDING as f32 + self.glyphs.ascent();
        let mut x = PADDING as f32;

        for ch in text.chars() {
            let glyph = self.glyphs.glyph(ch);
            if glyph.coverage.is_empty() {
                x += glyph.advance;
                continue;
            }

            let glyph_x = x + glyph.xmin as f32;
            let glyph_y = y_baseline - glyph.height as f32 - glyph.ymin as f32;

            for gy in 0..glyph.height {
                for gx in 0..glyph.width {
                    let coverage = glyph.coverage[gy * glyph.width + gx];
                    if coverage == 0 {
                        continue;
                    }

                    let px = (glyph_x + gx as f32) as i32;
                    let py = (glyph_y + gy as f32) as i32;
                    if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                        continue;
                    }

                    let alpha = (coverage as f32 / 255.0) * color.alpha();
                    let pixel_color =
                        Color::from_rgba(color.red(), color.green(), color.blue(), alpha)
                            .unwrap_or(color);

                    if let Some(existing) = pixmap.pixel(px as u32, py as u32) {
                        let index = (py as u32 * width + px as u32) as usize;
                        pixmap.pixels_mut()[index] = blend_pixel(existing, pixel_color);
                    }
                }
            }

            x += glyph.advance;
        }
    }
}

fn to_skia(color: SampledColor) -> Color {
    Color::from_rgba8(color.red, color.green, color.blue, 255)
}

/// Source-over compositing of `src` onto `dst`
fn blend_pixel(dst: PremultipliedColorU8, src: Color) -> PremultipliedColorU8 {
    let src_a = src.alpha();
    let dst_a = dst.alpha() as f32 / 255.0;

    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a == 0.0 {
        return PremultipliedColorU8::TRANSPARENT;
    }

    // dst channels are already premultiplied by dst_a
    let blend = |src_c: f32, dst_c: u8| -> u8 {
        let out_c = src_c * src_a + (dst_c as f32 / 255.0) * (1.0 - src_a);
        (out_c * 255.0).round().clamp(0.0, 255.0) as u8
    };

    let alpha = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    let red = blend(src.red(), dst.red()).min(alpha);
    let green = blend(src.green(), dst.green()).min(alpha);
    let blue = blend(src.blue(), dst.blue()).min(alpha);

    PremultipliedColorU8::from_rgba(red, green, blue, alpha).unwrap_or(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TooltipRenderer {
        TooltipRenderer::new(GlyphSource::builtin())
    }

    fn rgb_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        (c.red(), c.green(), c.blue())
    }

    #[test]
    fn measure_adds_padding() {
        let label = TooltipLabel::for_color(SampledColor::new(255, 0, 0));
        let size = renderer().measure(&label);
        // 20 chars of 12px plus 6px padding each side; 14px line plus padding
        assert_eq!(size, Size::new(20 * 12 + 12, 14 + 12));
    }

    #[test]
    fn render_matches_measure() {
        let r = renderer();
        let label = TooltipLabel::placeholder();
        let pixmap = r.render(&label).unwrap();
        let size = r.measure(&label);
        assert_eq!((pixmap.width(), pixmap.height()), (size.width, size.height));
    }

    #[test]
    fn background_border_and_text_colors() {
        let label = TooltipLabel::for_color(SampledColor::new(255, 0, 0));
        let pixmap = renderer().render(&label).unwrap();
        let fg = (label.foreground.red, label.foreground.green, label.foreground.blue);

        // Border
        assert_eq!(rgb_at(&pixmap, 0, 0), fg);
        assert_eq!(rgb_at(&pixmap, pixmap.width() - 1, pixmap.height() - 1), fg);
        // Padding area shows the sampled color
        assert_eq!(rgb_at(&pixmap, 3, 3), (255, 0, 0));
        // Some text pixels carry the foreground color
        let text_pixels = pixmap
            .pixels()
            .iter()
            .filter(|p| {
                let c = p.demultiply();
                (c.red(), c.green(), c.blue()) == fg
            })
            .count();
        let border_pixels = 2 * (pixmap.width() + pixmap.height()) as usize - 4;
        assert!(text_pixels > border_pixels);
    }

    #[test]
    fn pixmap_is_opaque() {
        let label = TooltipLabel::copy_failed(SampledColor::new(10, 20, 30));
        let pixmap = renderer().render(&label).unwrap();
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
    }

    #[test]
    fn blend_full_coverage_replaces_destination() {
        let dst = PremultipliedColorU8::from_rgba(255, 0, 0, 255).unwrap();
        let out = blend_pixel(dst, Color::from_rgba8(0, 0, 255, 255));
        assert_eq!((out.red(), out.green(), out.blue(), out.alpha()), (0, 0, 255, 255));
    }

    #[test]
    fn blend_half_coverage_mixes() {
        let dst = PremultipliedColorU8::from_rgba(0, 0, 0, 255).unwrap();
        let src = Color::from_rgba(1.0, 1.0, 1.0, 0.5).unwrap();
        let out = blend_pixel(dst, src);
        assert_eq!(out.alpha(), 255);
        assert!((127..=128).contains(&out.red()));
    }
}
