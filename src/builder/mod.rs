mod matrix;

pub use matrix::{QRMatrix, MAX_WIDTH, MIN_WIDTH};

use log::debug;
use qrcode::{types::QrError, EcLevel, QrCode};

use crate::error::{QRError, QRResult};

/// Error correction level used for every symbol.
pub const EC_LEVEL: EcLevel = EcLevel::M;

pub const DEFAULT_TARGET_SIZE: u32 = 400;
pub const DEFAULT_MARGIN: u32 = 16;

pub struct MatrixBuilder<'a> {
    data: &'a [u8],
    target_size: u32,
    margin: u32,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, target_size: DEFAULT_TARGET_SIZE, margin: DEFAULT_MARGIN }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn target_size(&mut self, target_size: u32) -> &mut Self {
        self.target_size = target_size;
        self
    }

    pub fn margin(&mut self, margin: u32) -> &mut Self {
        self.margin = margin;
        self
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Data len: {}, Ec level: {:?}, Target size: {}, Margin: {} }}",
            self.data.len(),
            EC_LEVEL,
            self.target_size,
            self.margin
        )
    }
}

impl MatrixBuilder<'_> {
    pub fn build(&self) -> QRResult<QRMatrix> {
        debug!("Building QR matrix {}", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }
        if self.target_size == 0 {
            return Err(QRError::InvalidLayout);
        }

        let code = QrCode::with_error_correction_level(self.data, EC_LEVEL).map_err(|e| match e {
            QrError::DataTooLong => QRError::DataTooLong,
            e => QRError::Encoding(e.to_string()),
        })?;
        let matrix = QRMatrix::from_code(&code);

        let total_modules = matrix.width() * matrix.width();
        let dark_modules = matrix.count_dark_modules();
        debug!(
            "Matrix width: {}, Dark cells: {}, Light cells: {}, Balance: {}%",
            matrix.width(),
            dark_modules,
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(matrix)
    }
}

/// Builds the matrix for `payload` destined for a `target_size` canvas with `margin`.
pub fn build(payload: &str, target_size: u32, margin: u32) -> QRResult<QRMatrix> {
    MatrixBuilder::new(payload.as_bytes()).target_size(target_size).margin(margin).build()
}
