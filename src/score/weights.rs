use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{QRError, QRResult};

// Scoring weights
//------------------------------------------------------------------------------

/// Every magnitude and threshold used by the scorer. Missing TOML keys keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub start_score: i32,
    pub readable_threshold: i32,
    pub severe_threshold: i32,
    pub emoji: EmojiWeights,
    pub text: TextWeights,
    pub image: ImageWeights,
    pub matrix: MatrixWeights,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            start_score: 100,
            readable_threshold: 70,
            severe_threshold: 50,
            emoji: EmojiWeights::default(),
            text: TextWeights::default(),
            image: ImageWeights::default(),
            matrix: MatrixWeights::default(),
        }
    }
}

impl ScoreWeights {
    pub fn from_toml_str(s: &str) -> QRResult<Self> {
        toml::from_str(s).map_err(|e| QRError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> QRResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| QRError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmojiWeights {
    /// Penalty for emoji missing from the lookup table.
    pub unknown: i32,
}

impl Default for EmojiWeights {
    fn default() -> Self {
        Self { unknown: 15 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextWeights {
    pub per_char: i32,
    pub uppercase: i32,
    pub lowercase: i32,
    pub digit: i32,
    pub special: i32,
    pub other: i32,
    pub repeat_bonus: i32,
    pub max: i32,
}

impl Default for TextWeights {
    fn default() -> Self {
        Self {
            per_char: 2,
            uppercase: 1,
            lowercase: 2,
            digit: 1,
            special: 5,
            other: 3,
            repeat_bonus: 5,
            max: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageWeights {
    pub base: i32,
    pub large_dimension: u32,
    pub large: i32,
    pub animated: i32,
    pub lossy_alpha: i32,
    pub unreadable: i32,
}

impl Default for ImageWeights {
    fn default() -> Self {
        Self { base: 10, large_dimension: 1000, large: 5, animated: 8, lossy_alpha: 3, unreadable: 15 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatrixWeights {
    pub large_size: usize,
    pub large: i32,
    pub medium_size: usize,
    pub medium: i32,
    pub dense_ratio: f64,
    pub dense: i32,
    pub sparse_ratio: f64,
    pub sparse: i32,
}

impl Default for MatrixWeights {
    fn default() -> Self {
        Self {
            large_size: 25,
            large: 10,
            medium_size: 20,
            medium: 5,
            dense_ratio: 0.7,
            dense: 8,
            sparse_ratio: 0.3,
            sparse: 5,
        }
    }
}
