use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use url::Url;

use crate::{
    builder::{self, QRMatrix},
    common::{ColorPair, CustomContent, ImageUpload, Layout},
    error::{QRError, QRResult},
    render::{extract_colors, Compositor, RenderError, RenderMode, RenderOptions, Rendered},
    score::{ReadabilityVerdict, Scorer},
};

// Request
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum InputMode {
    #[default]
    None,
    Text,
    /// First emoji of the caption, see [`crate::extract_emoji`].
    Emoji,
    Image,
}

/// How an uploaded image is used.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum ImageStyle {
    /// Stamp the image into every dark module.
    #[default]
    Tile,
    /// Solid modules in colors extracted from the image.
    Tint,
}

#[derive(Debug, Clone, Default)]
pub struct Request {
    pub url: String,
    pub mode: InputMode,
    pub text: Option<String>,
    /// Raw bytes and declared MIME type.
    pub image: Option<(Vec<u8>, String)>,
    pub image_style: ImageStyle,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.mode = InputMode::Text;
        self.text = Some(text.into());
        self
    }

    pub fn emoji(mut self, text: impl Into<String>) -> Self {
        self.mode = InputMode::Emoji;
        self.text = Some(text.into());
        self
    }

    pub fn image(mut self, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        self.mode = InputMode::Image;
        self.image = Some((bytes, mime_type.into()));
        self
    }

    pub fn image_style(mut self, style: ImageStyle) -> Self {
        self.image_style = style;
        self
    }

    /// Checks every input before anything is encoded or rendered.
    /// Returns the trimmed URL as given, it is encoded without normalization.
    pub fn validate(self) -> QRResult<(String, CustomContent)> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(QRError::EmptyUrl);
        }
        let parsed = Url::parse(url).map_err(|e| QRError::InvalidUrl(format!("{url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(QRError::InvalidUrl(url.to_string()));
        }
        let url = url.to_string();

        let content = match self.mode {
            InputMode::None => CustomContent::None,
            InputMode::Text => CustomContent::text(self.text.as_deref().unwrap_or_default())?,
            InputMode::Emoji => {
                // Length limits apply to the caption the emoji is taken from
                let text = self.text.as_deref().unwrap_or_default();
                CustomContent::text(text)?;
                CustomContent::emoji_from(text)
            }
            InputMode::Image => {
                let (bytes, mime) = self.image.ok_or(QRError::MissingImage)?;
                CustomContent::Image(ImageUpload::new(bytes, &mime)?)
            }
        };
        Ok((url, content))
    }
}

// Output
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct QROutput {
    pub image: RgbaImage,
    pub score: i32,
    pub is_readable: bool,
    pub warning: Option<String>,
    /// Set when the custom render could not be drawn and the standard one was used.
    pub fallback: Option<RenderError>,
}

impl QROutput {
    pub fn to_png(&self) -> QRResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| QRError::ImageEncoding(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

// Generator
//------------------------------------------------------------------------------

pub struct Generator {
    options: RenderOptions,
    scorer: Scorer,
}

impl Generator {
    pub fn new(options: RenderOptions, scorer: Scorer) -> Self {
        Self { options, scorer }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn generate(&self, request: Request) -> QRResult<QROutput> {
        let image_style = request.image_style;
        let (url, content) = request.validate()?;
        info!("Generating QR for {url} with {content:?}");

        let matrix = builder::build(&url, self.options.target_size, self.options.margin)?;
        let layout = Layout::compute(matrix.width(), self.options.target_size, self.options.margin)?;

        let (rendered, verdict) = rayon::join(
            || self.render(&matrix, &layout, &content, image_style),
            || self.scorer.score(&matrix, &content),
        );
        debug!("Readability verdict: {verdict:?}");

        let fallback = rendered.fallback_reason().cloned();
        let ReadabilityVerdict { score, is_readable, warning } = verdict;
        let warning = warning.or_else(|| {
            fallback.as_ref().map(|e| {
                format!("Custom pattern could not be drawn ({e}); a standard QR code was used")
            })
        });

        Ok(QROutput { image: rendered.image, score, is_readable, warning, fallback })
    }

    fn render(
        &self,
        matrix: &QRMatrix,
        layout: &Layout,
        content: &CustomContent,
        image_style: ImageStyle,
    ) -> Rendered {
        let compositor = Compositor::new(&self.options);
        match (content, image_style) {
            (CustomContent::Image(upload), ImageStyle::Tint) => {
                let colors = extract_colors(upload);
                compositor.render(matrix, layout, RenderMode::Standard, content, &colors)
            }
            _ => compositor.render(
                matrix,
                layout,
                RenderMode::for_content(content),
                content,
                &ColorPair::default(),
            ),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(RenderOptions::default(), Scorer::default())
    }
}

/// Generates with default options and weights.
pub fn generate(request: Request) -> QRResult<QROutput> {
    Generator::default().generate(request)
}

#[cfg(test)]
mod generate_tests {
    use test_case::test_case;

    use super::{generate, Generator, ImageStyle, InputMode, Request};
    use crate::{
        common::{CustomContent, ImageUpload},
        error::QRError,
        render::{RenderError, RenderOptions},
        score::Scorer,
    };

    #[test_case("", QRError::EmptyUrl; "empty")]
    #[test_case("   ", QRError::EmptyUrl; "whitespace")]
    fn test_empty_url(url: &str, exp: QRError) {
        assert_eq!(Request::new(url).validate().unwrap_err(), exp);
    }

    #[test_case("example.com")]
    #[test_case("/relative/path")]
    #[test_case("mailto:someone@example.com")]
    fn test_invalid_url(url: &str) {
        assert!(matches!(Request::new(url).validate(), Err(QRError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_modes() {
        let (_, content) = Request::new("https://example.com").validate().unwrap();
        assert_eq!(content, CustomContent::None);

        let (_, content) = Request::new("https://example.com").text("Hi").validate().unwrap();
        assert_eq!(content, CustomContent::Text("Hi".into()));

        let (_, content) = Request::new("https://example.com").emoji("go 🚀!").validate().unwrap();
        assert_eq!(content, CustomContent::Emoji('🚀'));

        let (_, content) = Request::new("https://example.com").emoji("none").validate().unwrap();
        assert_eq!(content, CustomContent::Emoji('\u{2764}'));
    }

    #[test]
    fn test_validate_errors() {
        let req = Request::new("https://example.com").text("ABCDEFGHIJK");
        assert_eq!(req.validate().unwrap_err(), QRError::TextTooLong(11));

        let req = Request { mode: InputMode::Text, ..Request::new("https://example.com") };
        assert_eq!(req.validate().unwrap_err(), QRError::EmptyText);

        let req = Request { mode: InputMode::Image, ..Request::new("https://example.com") };
        assert_eq!(req.validate().unwrap_err(), QRError::MissingImage);

        let req = Request::new("https://example.com").image(vec![1, 2, 3], "image/tiff");
        assert_eq!(req.validate().unwrap_err(), QRError::UnsupportedImageType("image/tiff".into()));
    }

    #[test]
    fn test_validate_image() {
        let req = Request::new("https://example.com")
            .image(vec![1, 2, 3], "image/png")
            .image_style(ImageStyle::Tint);
        let (_, content) = req.validate().unwrap();
        assert_eq!(
            content,
            CustomContent::Image(ImageUpload::new(vec![1, 2, 3], "image/png").unwrap())
        );
    }

    #[test]
    fn test_generate_plain() {
        let out = generate(Request::new("https://example.com")).unwrap();
        assert!(out.is_readable);
        assert_eq!(out.warning, None);
        assert_eq!(out.fallback, None);
        assert_eq!(out.score, 95);
    }

    #[test]
    fn test_generate_text_glyphs() {
        let out = generate(Request::new("https://example.com").text("Hi")).unwrap();
        assert_eq!(out.fallback, None);
        assert!(out.is_readable);
        assert_eq!(out.warning, None);
    }

    #[test]
    fn test_generate_emoji_glyph() {
        let out = generate(Request::new("https://example.com").emoji("love ❤")).unwrap();
        assert_eq!(out.fallback, None);
        assert_eq!(out.score, 92);
    }

    #[test]
    fn test_generate_fallback_warning() {
        // The bundled font has no outline for this pictograph
        let out = generate(Request::new("https://example.com").emoji("go 🚀")).unwrap();
        assert_eq!(out.fallback, Some(RenderError::GlyphNotFound('🚀')));
        assert!(out.is_readable);
        assert!(out.warning.unwrap().contains("standard QR code"));
    }

    #[test_case(400, u32::MAX; "margin overflow")]
    #[test_case(100_000, 16; "oversized canvas")]
    fn test_generate_invalid_layout(target_size: u32, margin: u32) {
        let options = RenderOptions { target_size, margin, ..RenderOptions::default() };
        let generator = Generator::new(options, Scorer::default());
        let res = generator.generate(Request::new("https://example.com"));
        assert_eq!(res.unwrap_err(), QRError::InvalidLayout);
    }

    #[test]
    fn test_generate_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(3000));
        assert_eq!(generate(Request::new(url)).unwrap_err(), QRError::DataTooLong);
    }
}
