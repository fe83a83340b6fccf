mod weights;

pub use weights::*;

use image::ImageFormat;
use log::{debug, warn};

use crate::{
    builder::QRMatrix,
    common::{lookup_emoji, CustomContent, ImageUpload},
};

const PATTERN_WARNING: &str = "QR pattern density may make the code harder to scan";
const SEVERE_WARNING: &str =
    "Custom pattern is too complex; the QR code will likely fail to scan on most devices";

// Readability verdict
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadabilityVerdict {
    /// Not clamped, can drop below zero with custom weights.
    pub score: i32,
    pub is_readable: bool,
    pub warning: Option<String>,
}

impl ReadabilityVerdict {
    /// Verdict reported when scoring itself fails, so a scorer bug never blocks
    /// code generation.
    pub fn fail_open() -> Self {
        Self { score: 100, is_readable: true, warning: None }
    }
}

// Scorer
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn score(&self, matrix: &QRMatrix, content: &CustomContent) -> ReadabilityVerdict {
        if !matrix.is_well_formed() {
            warn!(
                "Malformed matrix of width {} with {} modules, skipping readability check",
                matrix.width(),
                matrix.grid().len()
            );
            return ReadabilityVerdict::fail_open();
        }

        let w = &self.weights;
        let mut score = w.start_score;
        let mut warning = None;

        // Pattern penalty first, so the active content is named whenever it
        // contributes to an unreadable score.
        let penalties = [
            (self.matrix_penalty(matrix), Some(PATTERN_WARNING.to_string())),
            self.content_penalty(content),
        ];
        for (penalty, msg) in penalties {
            let prev = score;
            score -= penalty;
            debug!("Readability penalty {penalty}, score {prev} -> {score}");
            if penalty > 0 && score < w.readable_threshold && msg.is_some() {
                warning = msg;
            }
        }
        if score < w.severe_threshold {
            warning = Some(SEVERE_WARNING.to_string());
        }

        ReadabilityVerdict { score, is_readable: score >= w.readable_threshold, warning }
    }

    fn content_penalty(&self, content: &CustomContent) -> (i32, Option<String>) {
        match content {
            CustomContent::None => (0, None),
            CustomContent::Text(t) => (
                self.text_penalty(t),
                Some(format!("Text \"{t}\" may make the QR code harder to scan")),
            ),
            CustomContent::Emoji(e) => (
                self.emoji_penalty(*e),
                Some(format!("Emoji {e} may make the QR code harder to scan")),
            ),
            CustomContent::Image(img) => (
                self.image_penalty(img),
                Some("Custom image may make the QR code harder to scan".to_string()),
            ),
        }
    }

    pub fn emoji_penalty(&self, emoji: char) -> i32 {
        lookup_emoji(emoji).map_or(self.weights.emoji.unknown, |e| e.penalty)
    }

    pub fn text_penalty(&self, text: &str) -> i32 {
        let w = &self.weights.text;
        let len = text.chars().count() as i32;

        let char_weights: i32 = text
            .chars()
            .map(|c| match c {
                c if c.is_uppercase() => w.uppercase,
                c if c.is_lowercase() => w.lowercase,
                c if c.is_ascii_digit() => w.digit,
                c if c.is_ascii_punctuation() => w.special,
                _ => w.other,
            })
            .sum();

        let mut penalty = w.per_char * len + char_weights;
        let mut chars = text.chars();
        if let Some(first) = chars.next() {
            if len > 1 && chars.all(|c| c == first) {
                penalty -= w.repeat_bonus;
            }
        }
        penalty.clamp(0, w.max)
    }

    pub fn image_penalty(&self, upload: &ImageUpload) -> i32 {
        let w = &self.weights.image;
        let (width, height) = match upload.dimensions() {
            Ok(dims) => dims,
            Err(e) => {
                warn!("Unable to read image metadata: {e}");
                return w.unreadable;
            }
        };

        let mut penalty = w.base;
        if width > w.large_dimension || height > w.large_dimension {
            penalty += w.large;
        }
        match upload.format() {
            ImageFormat::Gif => penalty += w.animated,
            ImageFormat::WebP => penalty += w.lossy_alpha,
            _ => (),
        }
        penalty
    }

    pub fn matrix_penalty(&self, matrix: &QRMatrix) -> i32 {
        self.matrix_penalty_of(matrix.width(), matrix.dark_ratio())
    }

    pub fn matrix_penalty_of(&self, width: usize, dark_ratio: f64) -> i32 {
        let w = &self.weights.matrix;
        let size_penalty = if width > w.large_size {
            w.large
        } else if width > w.medium_size {
            w.medium
        } else {
            0
        };
        let density_penalty = if dark_ratio > w.dense_ratio {
            w.dense
        } else if dark_ratio < w.sparse_ratio {
            w.sparse
        } else {
            0
        };
        size_penalty + density_penalty
    }
}
