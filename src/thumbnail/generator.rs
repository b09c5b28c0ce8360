use image::{RgbImage, imageops, imageops::FilterType};
use log::debug;

use super::{
    NormalizedImage, Thumbnail, ThumbnailMode, ThumbnailPolicy, center_square, pad_canvas_size,
    pad_offset,
};
use crate::error::ThumbnailerError;

/// Antialiasing filter for every resample step
const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Produce a `target_edge` square thumbnail according to the policy.
pub fn generate(
    image: NormalizedImage,
    policy: &ThumbnailPolicy,
) -> Result<Thumbnail, ThumbnailerError> {
    policy.validate()?;

    let NormalizedImage { origin, image, .. } = image;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ThumbnailerError::DegenerateImage {
            id: origin.id,
            width,
            height,
        });
    }

    let square = match policy.mode {
        ThumbnailMode::Pad => pad(&image, policy),
        ThumbnailMode::Crop => crop(image, policy.target_edge),
    };

    debug!(
        "Generated {} thumbnail for '{}': {}x{} -> {}x{}",
        policy.mode,
        origin.id,
        width,
        height,
        square.width(),
        square.height()
    );

    Ok(Thumbnail::new(origin, square))
}

/// Paste the unscaled image centered on a filled square canvas, then
/// resample the whole canvas down (or up) to the target edge.
fn pad(image: &RgbImage, policy: &ThumbnailPolicy) -> RgbImage {
    let (width, height) = image.dimensions();
    let size = pad_canvas_size(width, height, policy.target_edge);
    let (x, y) = pad_offset(width, height, size);

    let mut canvas = RgbImage::from_pixel(size, size, policy.fill_color);
    imageops::replace(&mut canvas, image, i64::from(x), i64::from(y));

    if size == policy.target_edge {
        canvas
    } else {
        imageops::resize(&canvas, policy.target_edge, policy.target_edge, RESAMPLE_FILTER)
    }
}

/// Cut the centered square of the source, then resample it to the target.
fn crop(image: RgbImage, target_edge: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let (x, y, side) = center_square(width, height);

    let window = if side == width && side == height {
        image
    } else {
        imageops::crop_imm(&image, x, y, side, side).to_image()
    };

    if side == target_edge {
        window
    } else {
        imageops::resize(&window, target_edge, target_edge, RESAMPLE_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::ImageOrigin;
    use image::{ImageFormat, Rgb};
    use proptest::prelude::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    fn normalized(image: RgbImage) -> NormalizedImage {
        NormalizedImage {
            origin: ImageOrigin::new("g1", "g1.png"),
            image,
            format: ImageFormat::Png,
        }
    }

    fn solid(width: u32, height: u32, color: Rgb<u8>) -> NormalizedImage {
        normalized(RgbImage::from_pixel(width, height, color))
    }

    /// Three vertical bands: red, green, blue
    fn bands(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| match x * 3 / width {
            0 => RED,
            1 => GREEN,
            _ => BLUE,
        })
    }

    fn close_to(actual: &Rgb<u8>, expected: Rgb<u8>, tolerance: u8) -> bool {
        actual
            .0
            .iter()
            .zip(expected.0.iter())
            .all(|(a, e)| a.abs_diff(*e) <= tolerance)
    }

    #[test]
    fn test_pad_landscape_end_to_end() {
        // 400x300 -> 400x400 canvas with the source at (0, 50) -> 200x200
        let thumb = generate(solid(400, 300, RED), &ThumbnailPolicy::pad(200)).unwrap();

        assert_eq!(thumb.image().dimensions(), (200, 200));
        // Top and bottom bands are padding (25 rows each after halving)
        assert!(close_to(thumb.image().get_pixel(100, 5), WHITE, 2));
        assert!(close_to(thumb.image().get_pixel(100, 194), WHITE, 2));
        // Full width is source content
        assert!(close_to(thumb.image().get_pixel(2, 100), RED, 2));
        assert!(close_to(thumb.image().get_pixel(197, 100), RED, 2));
    }

    #[test]
    fn test_pad_single_pixel_is_centered_without_resampling() {
        let thumb = generate(solid(1, 1, BLUE), &ThumbnailPolicy::pad(200)).unwrap();
        let img = thumb.image();

        assert_eq!(img.dimensions(), (200, 200));
        assert_eq!(img.get_pixel(99, 99), &BLUE);
        assert_eq!(img.get_pixel(98, 99), &WHITE);
        assert_eq!(img.get_pixel(100, 100), &WHITE);
        assert_eq!(img.get_pixel(0, 0), &WHITE);
        assert_eq!(img.get_pixel(199, 199), &WHITE);
    }

    #[test]
    fn test_pad_uses_fill_color() {
        let policy = ThumbnailPolicy::pad(50).with_fill_color(GREEN);

        let thumb = generate(solid(10, 10, RED), &policy).unwrap();

        assert_eq!(thumb.image().get_pixel(0, 0), &GREEN);
        assert_eq!(thumb.image().get_pixel(25, 25), &RED);
    }

    #[test]
    fn test_pad_never_crops_content() {
        // 300x100 bands, target 100: canvas 300, downscaled by three.
        // Both outer bands must survive.
        let thumb = generate(normalized(bands(300, 100)), &ThumbnailPolicy::pad(100)).unwrap();
        let img = thumb.image();

        assert_eq!(img.dimensions(), (100, 100));
        assert!(close_to(img.get_pixel(3, 50), RED, 8));
        assert!(close_to(img.get_pixel(50, 50), GREEN, 8));
        assert!(close_to(img.get_pixel(96, 50), BLUE, 8));
        assert!(close_to(img.get_pixel(50, 3), WHITE, 8));
    }

    #[test]
    fn test_pad_identity_size_is_unchanged() {
        let source = bands(200, 200);

        let thumb = generate(normalized(source.clone()), &ThumbnailPolicy::pad(200)).unwrap();

        assert_eq!(thumb.into_image(), source);
    }

    #[test]
    fn test_crop_discards_overhang_symmetrically() {
        // Short edge already equals the target, so only the middle band remains
        let thumb = generate(normalized(bands(300, 100)), &ThumbnailPolicy::crop(100)).unwrap();

        assert_eq!(thumb.image().dimensions(), (100, 100));
        assert!(thumb.image().pixels().all(|p| *p == GREEN));
    }

    #[test]
    fn test_crop_portrait() {
        let source = RgbImage::from_fn(100, 300, |_, y| match y / 100 {
            0 => RED,
            1 => GREEN,
            _ => BLUE,
        });

        let thumb = generate(normalized(source), &ThumbnailPolicy::crop(100)).unwrap();

        assert!(thumb.image().pixels().all(|p| *p == GREEN));
    }

    #[test]
    fn test_crop_never_introduces_fill() {
        let policy = ThumbnailPolicy::crop(200).with_fill_color(GREEN);

        let thumb = generate(solid(400, 300, BLUE), &policy).unwrap();

        assert_eq!(thumb.image().dimensions(), (200, 200));
        assert!(thumb.image().pixels().all(|p| close_to(p, BLUE, 1)));
    }

    #[test]
    fn test_crop_single_pixel_upscales_to_solid() {
        let thumb = generate(solid(1, 1, Rgb([12, 34, 56])), &ThumbnailPolicy::crop(200)).unwrap();

        assert_eq!(thumb.image().dimensions(), (200, 200));
        assert!(thumb.image().pixels().all(|p| close_to(p, Rgb([12, 34, 56]), 1)));
    }

    #[test]
    fn test_crop_extreme_aspect_uses_middle_of_strip() {
        // 20000x1 strip: left half red, right half blue, one green pixel in
        // the middle. Only the centered 1x1 window may reach the output.
        let source = RgbImage::from_fn(20000, 1, |x, _| match x {
            9999 => GREEN,
            x if x < 9999 => RED,
            _ => BLUE,
        });

        let thumb = generate(normalized(source), &ThumbnailPolicy::crop(200)).unwrap();

        assert_eq!(thumb.image().dimensions(), (200, 200));
        assert!(thumb.image().pixels().all(|p| close_to(p, GREEN, 1)));
    }

    #[test]
    fn test_crop_tall_strip() {
        let thumb = generate(solid(2, 30000, RED), &ThumbnailPolicy::crop(64)).unwrap();

        assert_eq!(thumb.image().dimensions(), (64, 64));
        assert!(thumb.image().pixels().all(|p| close_to(p, RED, 1)));
    }

    #[test]
    fn test_square_input_is_identical_in_both_modes() {
        let source = bands(200, 200);

        let padded = generate(normalized(source.clone()), &ThumbnailPolicy::pad(200)).unwrap();
        let cropped = generate(normalized(source), &ThumbnailPolicy::crop(200)).unwrap();

        assert_eq!(padded.into_image(), cropped.into_image());
    }

    #[test]
    fn test_invalid_policy_fails_without_output() {
        let err = generate(solid(10, 10, RED), &ThumbnailPolicy::pad(0)).unwrap_err();

        assert!(matches!(err, ThumbnailerError::InvalidPolicy(_)));
    }

    #[test]
    fn test_degenerate_image_is_item_error() {
        let err = generate(solid(0, 10, RED), &ThumbnailPolicy::crop(20)).unwrap_err();

        assert!(matches!(err, ThumbnailerError::DegenerateImage { width: 0, height: 10, .. }));
        assert!(!err.is_fatal());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_pad_output_is_target_square(w in 1u32..200, h in 1u32..200, edge in 1u32..64) {
            let thumb = generate(solid(w, h, RED), &ThumbnailPolicy::pad(edge)).unwrap();
            prop_assert_eq!(thumb.image().dimensions(), (edge, edge));
        }

        #[test]
        fn prop_crop_output_is_target_square(w in 1u32..200, h in 1u32..200, edge in 1u32..64) {
            let thumb = generate(solid(w, h, RED), &ThumbnailPolicy::crop(edge)).unwrap();
            prop_assert_eq!(thumb.image().dimensions(), (edge, edge));
        }
    }
}
