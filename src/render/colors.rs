use image::{imageops::FilterType, Rgba};
use log::warn;

use crate::common::{ColorPair, ImageUpload};

const SAMPLE_GRID: u32 = 10;
const DARK_PERCENT: u32 = 30;
const LIGHT_OFFSET: u32 = 50;

/// Representative solid colors for tinting a standard render after an image.
/// Falls back to black on white when the image cannot be decoded.
pub fn extract_colors(upload: &ImageUpload) -> ColorPair {
    let img = match upload.decode() {
        Ok(img) => img,
        Err(e) => {
            warn!("Unable to decode image for color extraction: {e}");
            return ColorPair::default();
        }
    };

    let sample = img.resize_exact(SAMPLE_GRID, SAMPLE_GRID, FilterType::Nearest).to_rgb8();
    let n = sample.pixels().len() as u32;
    let mut sum = [0u32; 3];
    for px in sample.pixels() {
        sum.iter_mut().zip(px.0).for_each(|(s, v)| *s += v as u32);
    }
    let avg = sum.map(|s| s / n);

    let dark = avg.map(|v| (v * DARK_PERCENT / 100) as u8);
    let light = avg.map(|v| (v + LIGHT_OFFSET).min(255) as u8);
    ColorPair::new(
        Rgba([dark[0], dark[1], dark[2], 255]),
        Rgba([light[0], light[1], light[2], 255]),
    )
}

#[cfg(test)]
mod colors_tests {
    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use super::extract_colors;
    use crate::common::{ColorPair, ImageUpload};

    #[test_case(Rgba([255, 0, 0, 255]), Rgba([76, 0, 0, 255]), Rgba([255, 50, 50, 255]))]
    #[test_case(Rgba([100, 150, 200, 255]), Rgba([30, 45, 60, 255]), Rgba([150, 200, 250, 255]))]
    fn test_solid_image(src: Rgba<u8>, exp_dark: Rgba<u8>, exp_light: Rgba<u8>) {
        let img = RgbaImage::from_pixel(40, 40, src);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        let upload = ImageUpload::new(buf.into_inner(), "image/png").unwrap();

        assert_eq!(extract_colors(&upload), ColorPair::new(exp_dark, exp_light));
    }

    #[test]
    fn test_undecodable_defaults() {
        let upload = ImageUpload::new(vec![0xff, 0xd8, 0x00], "image/jpeg").unwrap();
        assert_eq!(extract_colors(&upload), ColorPair::default());
    }
}
