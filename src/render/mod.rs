mod colors;
mod glyph;
mod tile;

pub use colors::extract_colors;

use std::{fmt, fs, path::Path};

use ab_glyph::FontArc;
use image::RgbaImage;
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use log::{debug, warn};
use thiserror::Error;

use crate::{
    builder::{QRMatrix, DEFAULT_MARGIN, DEFAULT_TARGET_SIZE},
    common::{ColorPair, CustomContent, Layout},
    error::{QRError, QRResult},
};
use glyph::GlyphPainter;
use tile::TilePainter;

// Render mode & errors
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RenderMode {
    Standard,
    TextGlyph,
    EmojiGlyph,
    ImageTile,
}

impl RenderMode {
    pub fn for_content(content: &CustomContent) -> Self {
        match content {
            CustomContent::None => Self::Standard,
            CustomContent::Text(_) => Self::TextGlyph,
            CustomContent::Emoji(_) => Self::EmojiGlyph,
            CustomContent::Image(_) => Self::ImageTile,
        }
    }
}

/// Reason a custom render was replaced by the standard one.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RenderError {
    #[error("No font available for {0:?} rendering")]
    MissingFont(RenderMode),
    #[error("Cell size {0}px is too small to draw a glyph")]
    FontTooSmall(u32),
    #[error("Font has no outline for {0:?}")]
    GlyphNotFound(char),
    #[error("{0:?} rendering needs matching custom content")]
    ContentMismatch(RenderMode),
    #[error("Unable to decode image: {0}")]
    ImageDecode(String),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RenderOutcome {
    Requested,
    Fallback(RenderError),
}

#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    pub outcome: RenderOutcome,
}

impl Rendered {
    pub fn fallback_reason(&self) -> Option<&RenderError> {
        match &self.outcome {
            RenderOutcome::Requested => None,
            RenderOutcome::Fallback(e) => Some(e),
        }
    }
}

// Render options
//------------------------------------------------------------------------------

/// DejaVu Sans Bold, used for captions and emoji unless another font is set.
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

pub fn bundled_font() -> Option<FontArc> {
    FontArc::try_from_slice(BUNDLED_FONT).ok()
}

#[derive(Clone)]
pub struct RenderOptions {
    pub target_size: u32,
    pub margin: u32,
    /// Outline font for caption glyphs. Defaults to [`bundled_font`].
    pub font: Option<FontArc>,
    /// Outline font for emoji glyphs. Falls back to `font` when unset.
    pub emoji_font: Option<FontArc>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            margin: DEFAULT_MARGIN,
            font: bundled_font(),
            emoji_font: None,
        }
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("target_size", &self.target_size)
            .field("margin", &self.margin)
            .field("font", &self.font.is_some())
            .field("emoji_font", &self.emoji_font.is_some())
            .finish()
    }
}

impl RenderOptions {
    pub fn load_font(path: impl AsRef<Path>) -> QRResult<FontArc> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).map_err(|e| QRError::Config(format!("{}: {e}", path.display())))?;
        FontArc::try_from_vec(bytes)
            .map_err(|e| QRError::Config(format!("{}: {e}", path.display())))
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_emoji_font(mut self, font: FontArc) -> Self {
        self.emoji_font = Some(font);
        self
    }
}

// Compositor
//------------------------------------------------------------------------------

/// Paints the custom visual unit of one dark cell with its top-left at `(x, y)`.
pub(crate) trait CellPainter {
    fn paint(&self, canvas: &mut RgbaImage, x: u32, y: u32);
}

struct SolidPainter {
    rect_sz: u32,
    color: image::Rgba<u8>,
}

impl CellPainter for SolidPainter {
    fn paint(&self, canvas: &mut RgbaImage, x: u32, y: u32) {
        let rect = Rect::at(x as i32, y as i32).of_size(self.rect_sz, self.rect_sz);
        draw_filled_rect_mut(canvas, rect, self.color);
    }
}

pub struct Compositor<'a> {
    options: &'a RenderOptions,
}

impl<'a> Compositor<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Never fails: a custom mode that cannot be drawn is replaced by the standard
    /// render with default colors, and the reason is reported in the outcome.
    pub fn render(
        &self,
        matrix: &QRMatrix,
        layout: &Layout,
        mode: RenderMode,
        content: &CustomContent,
        colors: &ColorPair,
    ) -> Rendered {
        match self.try_render(matrix, layout, mode, content, colors) {
            Ok(image) => Rendered { image, outcome: RenderOutcome::Requested },
            Err(e) => {
                warn!("{mode:?} rendering failed, falling back to standard: {e}");
                let image = render_standard(matrix, layout, &ColorPair::default());
                Rendered { image, outcome: RenderOutcome::Fallback(e) }
            }
        }
    }

    fn try_render(
        &self,
        matrix: &QRMatrix,
        layout: &Layout,
        mode: RenderMode,
        content: &CustomContent,
        colors: &ColorPair,
    ) -> Result<RgbaImage, RenderError> {
        let cell_sz = layout.cell_size();
        debug!("Rendering {mode:?} with cell size {cell_sz}px");

        let painter: Box<dyn CellPainter> = match (mode, content) {
            (RenderMode::Standard, _) => Box::new(SolidPainter { rect_sz: cell_sz, color: colors.dark }),
            (RenderMode::TextGlyph, CustomContent::Text(text)) => {
                let font = self.options.font.as_ref().ok_or(RenderError::MissingFont(mode))?;
                Box::new(GlyphPainter::text(font, text, cell_sz, colors)?)
            }
            (RenderMode::EmojiGlyph, CustomContent::Emoji(emoji)) => {
                let font = self
                    .options
                    .emoji_font
                    .as_ref()
                    .or(self.options.font.as_ref())
                    .ok_or(RenderError::MissingFont(mode))?;
                Box::new(GlyphPainter::emoji(font, *emoji, cell_sz, colors)?)
            }
            (RenderMode::ImageTile, CustomContent::Image(upload)) => {
                Box::new(TilePainter::new(upload, cell_sz)?)
            }
            (mode, _) => return Err(RenderError::ContentMismatch(mode)),
        };

        Ok(paint_cells(matrix, layout, colors, painter.as_ref()))
    }
}

fn paint_cells(
    matrix: &QRMatrix,
    layout: &Layout,
    colors: &ColorPair,
    painter: &dyn CellPainter,
) -> RgbaImage {
    let total_sz = layout.total_size();
    let mut canvas = RgbaImage::new(total_sz, total_sz);
    draw_filled_rect_mut(&mut canvas, Rect::at(0, 0).of_size(total_sz, total_sz), colors.light);

    for (r, c, is_dark) in matrix.modules() {
        if is_dark {
            let (x, y) = layout.origin(r, c);
            painter.paint(&mut canvas, x, y);
        }
    }
    canvas
}

/// Solid render: dark cells in `colors.dark` on a `colors.light` canvas.
pub fn render_standard(matrix: &QRMatrix, layout: &Layout, colors: &ColorPair) -> RgbaImage {
    let painter = SolidPainter { rect_sz: layout.cell_size(), color: colors.dark };
    paint_cells(matrix, layout, colors, &painter)
}

#[cfg(test)]
mod compositor_tests {
    use image::Rgba;
    use test_case::test_case;

    use super::{render_standard, Compositor, RenderError, RenderMode, RenderOptions, RenderOutcome};
    use crate::{
        builder::build,
        common::{ColorPair, CustomContent, ImageUpload, Layout, BLACK, WHITE},
    };

    fn png_bytes(w: u32, h: u32, px: Rgba<u8>) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, px);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_standard_cell_centers() {
        let m = build("https://example.com", 250, 10).unwrap();
        let layout = Layout::compute(m.width(), 250, 10).unwrap();
        let img = render_standard(&m, &layout, &ColorPair::default());

        assert_eq!(img.dimensions(), (layout.total_size(), layout.total_size()));
        for (r, c, is_dark) in m.modules() {
            let (x, y) = layout.cell_center(r, c);
            let exp = if is_dark { BLACK } else { WHITE };
            assert_eq!(*img.get_pixel(x, y), exp, "cell ({r}, {c})");
        }
        // Margin stays light
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(9, 9), WHITE);
    }

    #[test]
    fn test_standard_custom_colors() {
        let m = build("https://example.com", 250, 10).unwrap();
        let layout = Layout::compute(m.width(), 250, 10).unwrap();
        let colors = ColorPair::new(Rgba([10, 20, 120, 255]), Rgba([250, 240, 200, 255]));
        let options = RenderOptions::default();
        let out =
            Compositor::new(&options).render(&m, &layout, RenderMode::Standard, &CustomContent::None, &colors);

        assert_eq!(out.outcome, RenderOutcome::Requested);
        let (x, y) = layout.cell_center(0, 0);
        assert_eq!(*out.image.get_pixel(x, y), colors.dark);
        let (x, y) = layout.cell_center(7, 7);
        assert_eq!(*out.image.get_pixel(x, y), colors.light);
    }

    fn no_fonts() -> RenderOptions {
        RenderOptions { font: None, emoji_font: None, ..RenderOptions::default() }
    }

    #[test]
    fn test_text_without_font_falls_back() {
        let m = build("https://example.com", 250, 10).unwrap();
        let layout = Layout::compute(m.width(), 250, 10).unwrap();
        let options = no_fonts();
        let content = CustomContent::Text("Hi".into());
        let colors = ColorPair::new(Rgba([200, 0, 0, 255]), WHITE);
        let out = Compositor::new(&options).render(&m, &layout, RenderMode::TextGlyph, &content, &colors);

        assert_eq!(out.fallback_reason(), Some(&RenderError::MissingFont(RenderMode::TextGlyph)));
        assert_eq!(out.image, render_standard(&m, &layout, &ColorPair::default()));
    }

    #[test]
    fn test_emoji_without_font_falls_back() {
        let m = build("https://example.com", 250, 10).unwrap();
        let layout = Layout::compute(m.width(), 250, 10).unwrap();
        let options = no_fonts();
        let out = Compositor::new(&options).render(
            &m,
            &layout,
            RenderMode::EmojiGlyph,
            &CustomContent::Emoji('🚀'),
            &ColorPair::default(),
        );
        assert_eq!(out.fallback_reason(), Some(&RenderError::MissingFont(RenderMode::EmojiGlyph)));
    }

    #[test]
    fn test_content_mismatch_falls_back() {
        let m = build("https://example.com", 250, 10).unwrap();
        let layout = Layout::compute(m.width(), 250, 10).unwrap();
        let options = RenderOptions::default();
        let out = Compositor::new(&options).render(
            &m,
            &layout,
            RenderMode::ImageTile,
            &CustomContent::None,
            &ColorPair::default(),
        );
        assert_eq!(out.fallback_reason(), Some(&RenderError::ContentMismatch(RenderMode::ImageTile)));
    }

    #[test]
    fn test_image_tile() {
        let m = build("https://example.com", 250, 10).unwrap();
        let layout = Layout::compute(m.width(), 250, 10).unwrap();
        let red = Rgba([255, 0, 0, 255]);
        let upload = ImageUpload::new(png_bytes(64, 32, red), "image/png").unwrap();
        let options = RenderOptions::default();
        let out = Compositor::new(&options).render(
            &m,
            &layout,
            RenderMode::ImageTile,
            &CustomContent::Image(upload),
            &ColorPair::default(),
        );

        assert_eq!(out.outcome, RenderOutcome::Requested);
        for (r, c, is_dark) in m.modules() {
            let (x, y) = layout.cell_center(r, c);
            let px = out.image.get_pixel(x, y);
            if is_dark {
                assert!(px[0] > 245 && px[1] < 10 && px[2] < 10, "cell ({r}, {c}): {px:?}");
            } else {
                assert_eq!(*px, WHITE, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn test_broken_image_falls_back() {
        let m = build("https://example.com", 250, 10).unwrap();
        let layout = Layout::compute(m.width(), 250, 10).unwrap();
        let upload = ImageUpload::new(b"GIF89a garbage".to_vec(), "image/gif").unwrap();
        let options = RenderOptions::default();
        let out = Compositor::new(&options).render(
            &m,
            &layout,
            RenderMode::ImageTile,
            &CustomContent::Image(upload),
            &ColorPair::default(),
        );

        assert!(matches!(out.fallback_reason(), Some(RenderError::ImageDecode(_))));
        assert_eq!(out.image, render_standard(&m, &layout, &ColorPair::default()));
    }

    // Glyph renders with the bundled font

    // Anti-aliased strokes blend with truncation, so allow a few levels
    fn near(a: Rgba<u8>, b: Rgba<u8>) -> bool {
        a.0.iter().zip(b.0).all(|(x, y)| x.abs_diff(y) <= 4)
    }

    #[test_case(CustomContent::Text("HI".into()), RenderMode::TextGlyph, Rgba([10, 20, 120, 255]); "text")]
    #[test_case(CustomContent::Emoji('❤'), RenderMode::EmojiGlyph, Rgba([200, 16, 46, 255]); "emoji tint")]
    fn test_glyph_render(content: CustomContent, mode: RenderMode, ink: Rgba<u8>) {
        // 32px cells
        let m = build("https://example.com", 800, 16).unwrap();
        let layout = Layout::compute(m.width(), 800, 16).unwrap();
        let colors = ColorPair::new(Rgba([10, 20, 120, 255]), Rgba([250, 240, 200, 255]));
        let options = RenderOptions::default();
        let out = Compositor::new(&options).render(&m, &layout, mode, &content, &colors);

        assert_eq!(out.outcome, RenderOutcome::Requested);
        let cell = layout.cell_size();
        for (r, c, is_dark) in m.modules() {
            if is_dark {
                let (x0, y0) = layout.origin(r, c);
                let inked = (0..cell)
                    .flat_map(|dy| (0..cell).map(move |dx| (x0 + dx, y0 + dy)))
                    .any(|(x, y)| near(*out.image.get_pixel(x, y), ink));
                assert!(inked, "cell ({r}, {c}) has no glyph pixel");
            } else {
                let (x, y) = layout.cell_center(r, c);
                assert_eq!(*out.image.get_pixel(x, y), colors.light, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn test_uncovered_emoji_falls_back() {
        let m = build("https://example.com", 400, 16).unwrap();
        let layout = Layout::compute(m.width(), 400, 16).unwrap();
        let options = RenderOptions::default();
        let out = Compositor::new(&options).render(
            &m,
            &layout,
            RenderMode::EmojiGlyph,
            &CustomContent::Emoji('🚀'),
            &ColorPair::default(),
        );
        assert_eq!(out.fallback_reason(), Some(&RenderError::GlyphNotFound('🚀')));
    }

    #[test]
    fn test_glyph_cells_too_small() {
        // 25 modules on a 20px target gives 1px cells
        let m = build("https://example.com", 20, 0).unwrap();
        let layout = Layout::compute(m.width(), 20, 0).unwrap();
        assert_eq!(layout.cell_size(), 1);
        let options = RenderOptions::default();
        let out = Compositor::new(&options).render(
            &m,
            &layout,
            RenderMode::TextGlyph,
            &CustomContent::Text("A".into()),
            &ColorPair::default(),
        );
        assert_eq!(out.fallback_reason(), Some(&RenderError::FontTooSmall(1)));
        assert_eq!(out.image, render_standard(&m, &layout, &ColorPair::default()));
    }

    #[test]
    fn test_bundled_font_loads() {
        assert!(super::bundled_font().is_some());
        assert!(RenderOptions::default().font.is_some());
    }

    #[test]
    fn test_mode_for_content() {
        assert_eq!(RenderMode::for_content(&CustomContent::None), RenderMode::Standard);
        assert_eq!(RenderMode::for_content(&CustomContent::Emoji('❤')), RenderMode::EmojiGlyph);
    }
}
