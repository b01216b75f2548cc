// THEORY:
// The `PixelBuffer` module is the bridge between opaque platform images and
// addressable pixel data. A decoded image is an encoder's artifact; a
// `PixelBuffer` is the same raster reshaped into something the analysis passes
// can index and rewrite.
//
// Key architectural principles:
// 1.  **Owned, Checked Storage**: The buffer exclusively owns a flat
//     `Vec<Pixel>` whose length always equals `width * height`. Every
//     constructor establishes that invariant and nothing can break it
//     afterwards, so the rest of the crate never re-validates lengths.
// 2.  **Row-Major Addressing**: The pixel at (x, y) lives at index
//     `y * width + x`. Out-of-range coordinates are a programming error and
//     panic at the access site rather than being clamped into silence.
// 3.  **Exact Conversions**: Construction and re-encoding both speak RGBA8
//     with the same byte order as `Pixel`, so an image survives a round trip
//     through the buffer bit-for-bit. Dimensions are the decoded raster's
//     pixel dimensions, the raster's one true size.

use crate::core_modules::pixel::pixel::{Bytes, CHANNELS, Pixel};
use crate::errors::{Result, StretchError};
use image::{DynamicImage, RgbaImage};

/// An owned, row-major raster of packed RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// The width of the raster in pixels.
    width: u32,
    /// The height of the raster in pixels.
    height: u32,
    /// A flattened vector containing all the `Pixel` data, one row after another.
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Creates a zero-filled (transparent black) buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = vec![Pixel::default(); width as usize * height as usize];
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wraps an existing pixel vector, checking it against the stated
    /// dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(StretchError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decodes an image into a pixel buffer.
    ///
    /// The image is converted to RGBA8 and consumed; the buffer takes the
    /// raster's pixel dimensions as its own.
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        let raster = image.into_rgba8();
        let (width, height) = raster.dimensions();
        let raw = raster.into_raw();

        let expected = width as usize * height as usize * CHANNELS;
        if raw.len() != expected {
            return Err(StretchError::Decode(format!(
                "raster is {} bytes, expected {} for a {}x{} RGBA8 image",
                raw.len(),
                expected,
                width,
                height
            )));
        }

        let pixels = raw.chunks_exact(CHANNELS).map(Pixel::from).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Re-encodes the current pixel contents into a new RGBA8 image of the
    /// same dimensions. The buffer is left untouched and remains usable.
    pub fn to_image(&self) -> Result<DynamicImage> {
        let mut bytes: Bytes = Vec::with_capacity(self.pixels.len() * CHANNELS);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_bytes());
        }

        let raster = RgbaImage::from_raw(self.width, self.height, bytes).ok_or_else(|| {
            StretchError::Encode(format!(
                "pixel data does not fill a {}x{} RGBA8 raster",
                self.width, self.height
            ))
        })?;
        Ok(DynamicImage::ImageRgba8(raster))
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`. Out-of-range access is a
    /// programming error, never clamped.
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.assert_in_bounds(x, y);
        self.pixels[self.index(x, y)]
    }

    /// Replaces the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`, like [`PixelBuffer::get`].
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        self.assert_in_bounds(x, y);
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        // usize math throughout; a raster can hold more than u32::MAX pixels.
        y as usize * self.width as usize + x as usize
    }

    fn assert_in_bounds(&self, x: u32, y: u32) {
        assert!(
            x < self.width && y < self.height,
            "pixel access ({}, {}) out of bounds for a {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}
