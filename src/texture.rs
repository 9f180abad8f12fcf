//! Texture upload and the decoded-image collaborator.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::gl;
use crate::gl::types::{GLint, GLsizei, GLuint};

/// A decoded RGBA8 image, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wraps an already decoded RGBA8 buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::Decode(format!(
                "{width}x{height} RGBA image needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Decodes a PNG file.
    pub fn decode(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|err| Error::Decode(format!("{}: {err}", path.display())))?;
        Self::decode_from(BufReader::new(file))
    }

    /// Decodes PNG data from any reader.
    pub fn decode_from(reader: impl Read) -> Result<Self> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let pixels = match info.color_type {
            png::ColorType::Rgba => buf,
            // Sources without an alpha channel become fully opaque.
            png::ColorType::Rgb => {
                buf.chunks_exact(3).flat_map(|px| [px[0], px[1], px[2], 0xff]).collect()
            },
            other => {
                return Err(Error::Decode(format!("unsupported color type {other:?}")));
            },
        };

        Self::new(info.width, info.height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mirrors the pixel rows so the first row becomes the bottom one.
    ///
    /// Decoders hand back top-down rows while the GL texture origin sits at
    /// the bottom-left; uploading without this mirror draws the image upside
    /// down.
    pub fn flip_vertically(&mut self) {
        let row = self.width as usize * 4;
        if row == 0 {
            return;
        }
        let height = self.height as usize;
        for y in 0..height / 2 {
            let top = y * row;
            let bottom = (height - 1 - y) * row;
            let (head, tail) = self.pixels.split_at_mut(bottom);
            head[top..top + row].swap_with_slice(&mut tail[..row]);
        }
    }
}

/// A device-resident 2D RGBA texture with bilinear filtering, no mipmaps.
pub struct Texture {
    texture: GLuint,
    width: u32,
    height: u32,
    gl: gl::Gl,
}

impl Texture {
    /// Uploads a decoded image, mirroring it vertically first so that
    /// texture coordinate (0, 0) samples the image's bottom-left corner.
    pub fn upload(gl: &gl::Gl, mut image: DecodedImage) -> Result<Self> {
        image.flip_vertically();

        unsafe {
            let mut texture = 0;
            gl.GenTextures(1, &mut texture);
            gl.BindTexture(gl::TEXTURE_2D, texture);
            gl.TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as GLint,
                image.width as GLsizei,
                image.height as GLsizei,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.pixels.as_ptr() as *const _,
            );
            if gl.GetError() == gl::OUT_OF_MEMORY {
                gl.DeleteTextures(1, &texture);
                return Err(Error::DeviceOutOfMemory("texture"));
            }

            gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);

            Ok(Self { texture, width: image.width, height: image.height, gl: gl.clone() })
        }
    }

    /// Binds the texture for sampling on the given texture unit.
    ///
    /// Unit bindings are global state; rebind before every draw that samples
    /// this texture.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.ActiveTexture(gl::TEXTURE0 + unit);
            self.gl.BindTexture(gl::TEXTURE_2D, self.texture);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { self.gl.DeleteTextures(1, &self.texture) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [0xff, 0x00, 0x00, 0xff];
    const GREEN: [u8; 4] = [0x00, 0xff, 0x00, 0xff];
    const BLUE: [u8; 4] = [0x00, 0x00, 0xff, 0xff];
    const WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

    // 2x2 test image with a distinct color in each corner, top row first.
    fn corners() -> DecodedImage {
        DecodedImage::new(2, 2, [RED, GREEN, BLUE, WHITE].concat()).unwrap()
    }

    #[test]
    fn flip_swaps_rows_and_keeps_columns() {
        let mut image = corners();
        image.flip_vertically();
        assert_eq!(image.pixels(), [BLUE, WHITE, RED, GREEN].concat());
    }

    #[test]
    fn texcoord_origin_samples_image_bottom_left() {
        // The first uploaded row is sampled at texture v = 0; after the
        // mirror it must hold what the decoder reported as the bottom row.
        let mut image = corners();
        let bottom_row = image.pixels()[8..].to_vec();
        image.flip_vertically();
        assert_eq!(&image.pixels()[..8], &bottom_row[..]);
    }

    #[test]
    fn double_flip_is_identity() {
        let mut image = corners();
        image.flip_vertically();
        image.flip_vertically();
        assert_eq!(image, corners());
    }

    #[test]
    fn odd_height_keeps_middle_row() {
        let rows = [RED, GREEN, BLUE];
        let mut image = DecodedImage::new(1, 3, rows.concat()).unwrap();
        image.flip_vertically();
        assert_eq!(image.pixels(), [BLUE, GREEN, RED].concat());
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        assert!(matches!(DecodedImage::new(2, 2, vec![0; 3]), Err(Error::Decode(_))));
    }
}
