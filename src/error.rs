use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum QRError {
    // Request validation
    #[error("Empty url")]
    EmptyUrl,
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    #[error("Empty caption")]
    EmptyText,
    #[error("Caption too long: {0} characters, at most {max} allowed", max = crate::MAX_TEXT_LEN)]
    TextTooLong(usize),
    #[error("Image mode selected but no image was supplied")]
    MissingImage,
    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),
    #[error("Image too large: {0} bytes, at most {max} allowed", max = crate::MAX_UPLOAD_BYTES)]
    ImageTooLarge(usize),
    #[error("Invalid layout: sizes must be positive and the canvas at most {max}px wide", max = crate::MAX_CANVAS_SIZE)]
    InvalidLayout,

    // Matrix builder
    #[error("Empty data")]
    EmptyData,
    #[error("Data too long for a QR symbol")]
    DataTooLong,
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    // Configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Output
    #[error("Image encoding failed: {0}")]
    ImageEncoding(String),
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    Validation,
    Capability,
    Internal,
}

impl QRError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyUrl
            | Self::InvalidUrl(_)
            | Self::EmptyText
            | Self::TextTooLong(_)
            | Self::MissingImage
            | Self::UnsupportedImageType(_)
            | Self::ImageTooLarge(_)
            | Self::InvalidLayout
            | Self::EmptyData
            | Self::Config(_) => ErrorKind::Validation,
            Self::DataTooLong | Self::Encoding(_) => ErrorKind::Capability,
            Self::ImageEncoding(_) => ErrorKind::Internal,
        }
    }
}

pub type QRResult<T> = Result<T, QRError>;
