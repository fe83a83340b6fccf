use crate::error::{QRError, QRResult};

/// Largest canvas side a layout may produce.
pub const MAX_CANVAS_SIZE: u32 = 8192;

// Pixel geometry shared by the compositor and tests
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Layout {
    matrix_size: u32,
    cell_size: u32,
    margin: u32,
    total_size: u32,
}

impl Layout {
    /// Cell size is floor-divided so cells never overlap, which can leave the canvas
    /// slightly smaller than `target`. Canvases wider than [`MAX_CANVAS_SIZE`] are
    /// rejected.
    pub fn compute(matrix_size: usize, target: u32, margin: u32) -> QRResult<Self> {
        if matrix_size == 0 || target == 0 {
            return Err(QRError::InvalidLayout);
        }
        let matrix_size = u32::try_from(matrix_size).map_err(|_| QRError::InvalidLayout)?;

        let cell_size = (target / matrix_size).max(1);
        let total_size = matrix_size
            .checked_mul(cell_size)
            .zip(margin.checked_mul(2))
            .and_then(|(body, quiet)| body.checked_add(quiet))
            .filter(|&total| total <= MAX_CANVAS_SIZE)
            .ok_or(QRError::InvalidLayout)?;
        Ok(Self { matrix_size, cell_size, margin, total_size })
    }

    pub fn matrix_size(&self) -> u32 {
        self.matrix_size
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    /// Top-left pixel of the cell at `(r, c)`, as `(x, y)`.
    pub fn origin(&self, r: usize, c: usize) -> (u32, u32) {
        (self.margin + c as u32 * self.cell_size, self.margin + r as u32 * self.cell_size)
    }

    pub fn cell_center(&self, r: usize, c: usize) -> (u32, u32) {
        let (x, y) = self.origin(r, c);
        (x + self.cell_size / 2, y + self.cell_size / 2)
    }
}
