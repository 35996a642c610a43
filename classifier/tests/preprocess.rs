use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, RgbImage};
use mobilenet_classifier::preprocess::{decode, image_to_tensor, normalize};
use mobilenet_classifier::prelude::*;
use proptest::collection::vec;
use proptest::prelude::*;

fn encode(image: RgbImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut bytes = vec![];
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

fn rgb_images() -> impl Strategy<Value = RgbImage> {
    (1u32..40, 1u32..40).prop_flat_map(|(w, h)| {
        vec(any::<u8>(), (w * h * 3) as usize)
            .prop_map(move |pixels| RgbImage::from_raw(w, h, pixels).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_resolution_becomes_a_normalized_batch(image in rgb_images()) {
        let bytes = encode(image, ImageOutputFormat::Png);
        let tensor = normalize(decode(&bytes).unwrap(), (224, 224)).unwrap();
        let view = tensor.to_array_view::<f32>().unwrap();
        prop_assert_eq!(view.shape(), &[1, 224, 224, 3]);
        prop_assert!(view.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
fn target_sized_image_is_only_scaled() {
    let image = RgbImage::from_fn(224, 224, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    });
    let bytes = encode(image.clone(), ImageOutputFormat::Png);
    let tensor = normalize(decode(&bytes).unwrap(), (224, 224)).unwrap();
    let view = tensor.to_array_view::<f32>().unwrap();
    for (x, y, pixel) in image.enumerate_pixels() {
        for c in 0..3 {
            let expected = pixel.0[c] as f32 / 255.0;
            approx::assert_abs_diff_eq!(
                view[[0, y as usize, x as usize, c]],
                expected,
                epsilon = 1e-6
            );
        }
    }
}

#[test]
fn jpeg_is_decoded() {
    let image = RgbImage::from_pixel(31, 17, image::Rgb([200, 100, 50]));
    let bytes = encode(image, ImageOutputFormat::Jpeg(95));
    let pixels = decode(&bytes).unwrap();
    assert_eq!(pixels.shape(), &[17, 31, 3]);
    let tensor = normalize(pixels, (224, 224)).unwrap();
    assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
}

#[test]
fn same_file_gives_identical_tensors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradient.png");
    RgbImage::from_fn(57, 91, |x, y| image::Rgb([x as u8 * 4, y as u8 * 2, 128]))
        .save(&path)
        .unwrap();
    let first = image_to_tensor(&path, (224, 224)).unwrap();
    let second = image_to_tensor(&path, (224, 224)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_target_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.png");
    RgbImage::from_pixel(8, 8, image::Rgb([0, 0, 0])).save(&path).unwrap();
    let tensor = image_to_tensor(&path, (96, 128)).unwrap();
    assert_eq!(tensor.shape(), &[1, 96, 128, 3]);
}

#[test]
fn unreadable_and_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = image_to_tensor(dir.path().join("missing.jpg"), (224, 224)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Read);
    assert_eq!(err.context, "Reading Image File");

    let path = dir.path().join("corrupt.jpg");
    std::fs::write(&path, b"\xff\xd8\xff\xe0 truncated jpeg").unwrap();
    let err = image_to_tensor(&path, (224, 224)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Decode);
    assert!(err.to_string().starts_with("[ERROR]: Decoding Image\n"));
}
