use image::Rgba;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Dark and light colors used by solid renders.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ColorPair {
    pub dark: Rgba<u8>,
    pub light: Rgba<u8>,
}

impl ColorPair {
    pub const fn new(dark: Rgba<u8>, light: Rgba<u8>) -> Self {
        Self { dark, light }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(BLACK, WHITE)
    }
}

#[cfg(test)]
mod color_tests {
    use super::{ColorPair, BLACK, WHITE};

    #[test]
    fn test_default_is_black_on_white() {
        let pair = ColorPair::default();
        assert_eq!(pair.dark, BLACK);
        assert_eq!(pair.light, WHITE);
    }
}
