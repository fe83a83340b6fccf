use image::{imageops, imageops::FilterType, RgbaImage};
use log::debug;

use super::{CellPainter, RenderError};
use crate::common::ImageUpload;

// Image tile painter
//------------------------------------------------------------------------------

/// Source image cover-fitted to one cell, resampled once and stamped into every
/// dark cell so all tiles are pixel-identical.
pub(crate) struct TilePainter {
    tile: RgbaImage,
}

impl TilePainter {
    pub fn new(upload: &ImageUpload, cell_sz: u32) -> Result<Self, RenderError> {
        let img = upload.decode().map_err(|e| RenderError::ImageDecode(e.to_string()))?;
        debug!("Resizing {}x{} image to a {cell_sz}px tile", img.width(), img.height());

        let tile = img.resize_to_fill(cell_sz, cell_sz, FilterType::Lanczos3).to_rgba8();
        Ok(Self { tile })
    }
}

impl CellPainter for TilePainter {
    fn paint(&self, canvas: &mut RgbaImage, x: u32, y: u32) {
        // Transparent tile pixels blend over the light background
        imageops::overlay(canvas, &self.tile, x as i64, y as i64);
    }
}
