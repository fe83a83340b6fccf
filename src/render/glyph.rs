use ab_glyph::{point, Font, FontArc, PxScale, Rect, ScaleFont};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use super::{CellPainter, RenderError};
use crate::common::{lookup_emoji, ColorPair};

const TEXT_SCALE: f32 = 0.6;
const EMOJI_SCALE: f32 = 0.8;

fn text_font_size(cell_sz: u32) -> u32 {
    (cell_sz as f32 * TEXT_SCALE).floor() as u32
}

fn emoji_font_size(cell_sz: u32) -> u32 {
    (cell_sz as f32 * EMOJI_SCALE).floor() as u32
}

// Glyph painter
//------------------------------------------------------------------------------

/// Glyph rasterized once into a cell-sized tile on the light color, then copied
/// into every dark cell. The tile clips glyphs wider than the cell so neighbouring
/// light cells stay untouched.
pub(crate) struct GlyphPainter {
    tile: RgbaImage,
}

impl GlyphPainter {
    /// Caption glyphs, bold, dark on light.
    pub fn text(
        font: &FontArc,
        text: &str,
        cell_sz: u32,
        colors: &ColorPair,
    ) -> Result<Self, RenderError> {
        let font_sz = text_font_size(cell_sz);
        let bold = (font_sz / 12).max(1);
        Self::new(font, text, cell_sz, font_sz, colors.dark, colors.light, bold)
    }

    /// Emoji glyph tinted with the color known for it, or the dark color.
    pub fn emoji(
        font: &FontArc,
        emoji: char,
        cell_sz: u32,
        colors: &ColorPair,
    ) -> Result<Self, RenderError> {
        let font_sz = emoji_font_size(cell_sz);
        let color = lookup_emoji(emoji).map_or(colors.dark, |e| e.tint);
        Self::new(font, &emoji.to_string(), cell_sz, font_sz, color, colors.light, 0)
    }

    fn new(
        font: &FontArc,
        text: &str,
        cell_sz: u32,
        font_sz: u32,
        color: Rgba<u8>,
        background: Rgba<u8>,
        bold: u32,
    ) -> Result<Self, RenderError> {
        if font_sz == 0 {
            return Err(RenderError::FontTooSmall(cell_sz));
        }
        if let Some(ch) = text.chars().find(|&ch| !ch.is_whitespace() && !has_outline(font, ch)) {
            return Err(RenderError::GlyphNotFound(ch));
        }

        let scale = PxScale::from(font_sz as f32);
        // Blank captions have no ink and would erase the module
        let ink = ink_bounds(font, scale, text)
            .ok_or_else(|| RenderError::GlyphNotFound(text.chars().next().unwrap_or(' ')))?;

        // Center the ink box, including the extra bold strokes
        let x = ((cell_sz as f32 - ink.width() - bold as f32) / 2.0 - ink.min.x).round() as i32;
        let y = ((cell_sz as f32 - ink.height()) / 2.0 - ink.min.y).round() as i32;

        let mut tile = RgbaImage::from_pixel(cell_sz, cell_sz, background);
        // Extra strokes shifted right fake a bold weight
        for stroke in 0..=bold as i32 {
            draw_text_mut(&mut tile, color, x + stroke, y, scale, font, text);
        }
        Ok(Self { tile })
    }
}

fn has_outline(font: &FontArc, ch: char) -> bool {
    let id = font.glyph_id(ch);
    id.0 != 0 && font.outline(id).is_some()
}

/// Pixel bounds of the laid out `text`, positioned the way `draw_text_mut`
/// places it relative to its origin.
fn ink_bounds(font: &FontArc, scale: PxScale, text: &str) -> Option<Rect> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0;
    let mut last = None;
    let mut bounds: Option<Rect> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        if let Some(last) = last {
            caret += scaled.kern(id, last);
        }
        last = Some(id);

        let bb = outlined.px_bounds();
        bounds = Some(match bounds {
            None => bb,
            Some(b) => Rect {
                min: point(b.min.x.min(bb.min.x), b.min.y.min(bb.min.y)),
                max: point(b.max.x.max(bb.max.x), b.max.y.max(bb.max.y)),
            },
        });
    }
    bounds
}

impl CellPainter for GlyphPainter {
    fn paint(&self, canvas: &mut RgbaImage, x: u32, y: u32) {
        imageops::replace(canvas, &self.tile, x as i64, y as i64);
    }
}
