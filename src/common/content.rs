use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader, ImageResult, Limits};

use crate::error::{QRError, QRResult};

/// Longest caption accepted, in codepoints.
pub const MAX_TEXT_LEN: usize = 10;

/// Upload ceiling enforced before any decoding happens.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Largest decoded image side accepted by the compositor and color extractor.
pub const MAX_DECODE_DIMENSION: u32 = 8192;

/// Glyph used when a caption holds no emoji.
pub const FALLBACK_EMOJI: char = '\u{2764}';

const ACCEPTED_FORMATS: [ImageFormat; 4] =
    [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif, ImageFormat::WebP];

// Custom content
//------------------------------------------------------------------------------

/// The single piece of custom content drawn into dark modules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CustomContent {
    #[default]
    None,
    Text(String),
    Emoji(char),
    Image(ImageUpload),
}

impl CustomContent {
    pub fn text(text: &str) -> QRResult<Self> {
        let len = text.chars().count();
        if len == 0 {
            return Err(QRError::EmptyText);
        }
        if len > MAX_TEXT_LEN {
            return Err(QRError::TextTooLong(len));
        }
        Ok(Self::Text(text.to_string()))
    }

    pub fn emoji_from(text: &str) -> Self {
        Self::Emoji(extract_emoji(text))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Image upload
//------------------------------------------------------------------------------

#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("bytes", &self.bytes.len())
            .field("format", &self.format)
            .finish()
    }
}

impl ImageUpload {
    /// Accepts PNG, JPEG, GIF and WebP uploads up to [`MAX_UPLOAD_BYTES`].
    pub fn new(bytes: Vec<u8>, mime_type: &str) -> QRResult<Self> {
        let format = ImageFormat::from_mime_type(mime_type)
            .filter(|f| ACCEPTED_FORMATS.contains(f))
            .ok_or_else(|| QRError::UnsupportedImageType(mime_type.to_string()))?;
        Self::with_format(bytes, format)
    }

    pub fn with_format(bytes: Vec<u8>, format: ImageFormat) -> QRResult<Self> {
        if !ACCEPTED_FORMATS.contains(&format) {
            return Err(QRError::UnsupportedImageType(format!("{format:?}")));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(QRError::ImageTooLarge(bytes.len()));
        }
        Ok(Self { bytes, format })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    fn reader(&self) -> ImageReader<Cursor<&[u8]>> {
        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_DECODE_DIMENSION);
        limits.max_image_height = Some(MAX_DECODE_DIMENSION);

        let mut reader = ImageReader::with_format(Cursor::new(self.bytes.as_slice()), self.format);
        reader.limits(limits);
        reader
    }

    /// Reads the header only.
    pub fn dimensions(&self) -> ImageResult<(u32, u32)> {
        self.reader().into_dimensions()
    }

    pub fn decode(&self) -> ImageResult<DynamicImage> {
        self.reader().decode()
    }
}

// Emoji extraction
//------------------------------------------------------------------------------

const EMOJI_RANGES: [(u32, u32); 7] = [
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F300, 0x1F5FF), // Symbols & pictographs
    (0x1F900, 0x1F9FF), // Supplemental symbols & pictographs
    (0x1F680, 0x1F6FF), // Transport & map
    (0x1F1E6, 0x1F1FF), // Regional indicators
    (0x2600, 0x26FF),   // Misc symbols
    (0x2700, 0x27BF),   // Dingbats
];

pub fn is_emoji(ch: char) -> bool {
    let cp = ch as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// First emoji codepoint of `text`, or [`FALLBACK_EMOJI`].
pub fn extract_emoji(text: &str) -> char {
    text.chars().find(|&c| is_emoji(c)).unwrap_or(FALLBACK_EMOJI)
}
