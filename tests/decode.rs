//! Decoder collaborator round-trips, driven through the public API.

use std::io::Cursor;

use render_surface::{DecodedImage, Error};

fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_color(color);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(data).unwrap();
    writer.finish().unwrap();
    out
}

#[test]
fn rgba_round_trips() {
    #[rustfmt::skip]
    let pixels = [
        0xff, 0x00, 0x00, 0xff,  0x00, 0xff, 0x00, 0x80,
        0x00, 0x00, 0xff, 0xff,  0xff, 0xff, 0xff, 0x00,
    ];
    let encoded = encode(2, 2, png::ColorType::Rgba, &pixels);

    let image = DecodedImage::decode_from(Cursor::new(encoded)).unwrap();
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);
    assert_eq!(image.pixels(), pixels);
}

#[test]
fn rgb_gains_opaque_alpha() {
    let pixels = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
    let encoded = encode(2, 1, png::ColorType::Rgb, &pixels);

    let image = DecodedImage::decode_from(Cursor::new(encoded)).unwrap();
    assert_eq!(image.pixels(), [0x10, 0x20, 0x30, 0xff, 0x40, 0x50, 0x60, 0xff]);
}

#[test]
fn decode_reads_files() {
    let encoded = encode(1, 1, png::ColorType::Rgba, &[1, 2, 3, 4]);
    let path = std::env::temp_dir().join("render_surface_decode_test.png");
    std::fs::write(&path, encoded).unwrap();

    let image = DecodedImage::decode(&path).unwrap();
    assert_eq!((image.width(), image.height()), (1, 1));
    assert_eq!(image.pixels(), [1, 2, 3, 4]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn garbage_is_a_decode_error() {
    let result = DecodedImage::decode_from(Cursor::new(b"not a png".to_vec()));
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn missing_file_is_a_decode_error() {
    let result = DecodedImage::decode("definitely/not/here/sprite.png");
    assert!(matches!(result, Err(Error::Decode(_))));
}
