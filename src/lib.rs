//! # glyphqr
//!
//! A Rust library for rendering QR codes whose dark modules are drawn as custom glyphs
//! instead of solid squares, together with a heuristic estimate of whether the result
//! still scans.
//!
//! ## Features
//!
//! - **Matrix building**: Encodes a URL into a QR bit-matrix at error correction level M
//! - **Custom modules**: Draws a caption, a single emoji or an image tile into every dark module
//! - **Tinting**: Solid QR codes in colors extracted from an uploaded image
//! - **Readability estimate**: Scores glyph, text, image and pattern complexity against
//!   configurable weights and warns when the code is likely to fail
//! - **Safe fallback**: A custom render that cannot be drawn degrades to a standard QR code
//!
//! ## Quick Start
//!
//! ### Plain QR Code
//!
//! ```rust
//! use glyphqr::{generate, Request};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let out = generate(Request::new("https://example.com"))?;
//! assert!(out.is_readable);
//!
//! let png = out.to_png()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Caption Glyphs
//!
//! Captions and emoji are drawn with the bundled DejaVu Sans Bold unless another outline
//! font is set. A glyph the font does not cover returns the standard QR code and
//! [`QROutput::fallback`] says why.
//!
//! ```rust
//! use glyphqr::{generate, Request};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let out = generate(Request::new("https://example.com").text("HELLO"))?;
//! assert!(out.fallback.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! Fonts and scoring weights can be swapped:
//!
//! ```rust,no_run
//! use glyphqr::{Generator, RenderOptions, Request, ScoreWeights, Scorer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let font = RenderOptions::load_font("NotoSans-Bold.ttf")?;
//! let options = RenderOptions::default().with_font(font);
//! let scorer = Scorer::new(ScoreWeights::load("weights.toml")?);
//!
//! let out = Generator::new(options, scorer).generate(Request::new("https://example.com").text("HELLO"))?;
//! if let Some(warning) = &out.warning {
//!     println!("{warning}");
//! }
//! out.image.save("caption_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Step by Step
//!
//! ```rust
//! use glyphqr::{build, ColorPair, Compositor, CustomContent, Layout, RenderMode, RenderOptions, Scorer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matrix = build("https://example.com", 400, 16)?;
//! let layout = Layout::compute(matrix.width(), 400, 16)?;
//!
//! let options = RenderOptions::default();
//! let content = CustomContent::None;
//! let rendered = Compositor::new(&options).render(
//!     &matrix,
//!     &layout,
//!     RenderMode::Standard,
//!     &content,
//!     &ColorPair::default(),
//! );
//! let verdict = Scorer::default().score(&matrix, &content);
//! assert!(verdict.is_readable);
//! # Ok(())
//! # }
//! ```
//!
//! ## Readability Score
//!
//! Starts at 100. The pattern penalty (symbol size and dark-module density) is always
//! subtracted, then the penalty of the active custom content. The code is considered
//! readable at 70 and above; below 50 a strong warning is reported. All magnitudes live
//! in [`ScoreWeights`] and can be overridden from TOML.

pub mod builder;
pub mod common;
pub mod error;
pub mod generate;
pub mod render;
pub mod score;

pub use builder::{build, MatrixBuilder, QRMatrix};
pub use common::*;
pub use error::{ErrorKind, QRError, QRResult};
pub use generate::{generate, Generator, ImageStyle, InputMode, QROutput, Request};
pub use render::{
    bundled_font, extract_colors, render_standard, Compositor, RenderError, RenderMode, RenderOptions,
    RenderOutcome, Rendered,
};
pub use score::{ReadabilityVerdict, ScoreWeights, Scorer};
