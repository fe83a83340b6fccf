use qrcode::{Color, QrCode};

/// Widths of version 1 and version 40 symbols.
pub const MIN_WIDTH: usize = 21;
pub const MAX_WIDTH: usize = 177;

// Bit-matrix of a built QR symbol
//------------------------------------------------------------------------------

/// Square grid of modules, `true` for dark. Stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRMatrix {
    grid: Vec<bool>,
    w: usize,
}

impl QRMatrix {
    pub(crate) fn from_code(code: &QrCode) -> Self {
        let w = code.width();
        let grid = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Self { grid, w }
    }

    /// Builds a matrix from raw rows. Returns `None` unless the rows form a
    /// non-empty square. The rows need not form a valid symbol, check with
    /// [`QRMatrix::is_well_formed`].
    pub fn from_rows(rows: &[Vec<bool>]) -> Option<Self> {
        let w = rows.len();
        if w == 0 || rows.iter().any(|r| r.len() != w) {
            return None;
        }
        Some(Self { grid: rows.concat(), w })
    }

    pub fn grid(&self) -> &[bool] {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.w
    }

    /// Square, odd width between version 1 and version 40.
    pub fn is_well_formed(&self) -> bool {
        (MIN_WIDTH..=MAX_WIDTH).contains(&self.w)
            && self.w % 2 == 1
            && self.grid.len() == self.w * self.w
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    /// Fraction of dark modules, in `0.0..=1.0`.
    pub fn dark_ratio(&self) -> f64 {
        if self.grid.is_empty() {
            return 0.0;
        }
        self.count_dark_modules() as f64 / self.grid.len() as f64
    }

    fn coord_to_index(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.w, "row should be less than width");
        debug_assert!(c < self.w, "column should be less than width");

        r * self.w + c
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        self.grid[self.coord_to_index(r, c)]
    }

    /// Row-major iterator over `(row, col, is_dark)`.
    pub fn modules(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.grid.iter().enumerate().map(move |(i, &d)| (i / self.w, i % self.w, d))
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for r in 0..self.w {
            for c in 0..self.w {
                res.push(if self.get(r, c) { '#' } else { '.' });
            }
            res.push('\n');
        }
        res
    }
}
