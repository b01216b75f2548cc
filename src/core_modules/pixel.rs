// THEORY:
// The `Pixel` module is the most fundamental unit of the imaging core. It is a
// "dumb" data container for a single RGBA pixel, stored packed in one 32-bit
// value exactly as the four channel bytes sit in a decoded raster.
//
// Key architectural principles:
// 1.  **Packed Storage**: Keeping the pixel as a single `u32` makes a buffer of
//     pixels byte-compatible with the raster it was decoded from. Moving between
//     raw bytes and pixels is a reinterpretation, never a reshuffle.
// 2.  **Mask-and-Shift Access**: Every channel read or write is a plain masking
//     operation on the packed value. The `u8` channel type already bounds every
//     value to [0, 255], so the accessors need no range checks.
// 3.  **Fixed Byte Order**: The layout is part of the type's contract (red in
//     the low byte through alpha in the high byte) and matches the RGBA8 channel
//     order of the `image` crate, so conversions in either direction are exact.

pub mod pixel {
    pub type Byte = u8;
    pub type Bytes = Vec<Byte>;
    pub type Channel = Byte;

    /// Number of channel bytes in one packed pixel.
    pub const CHANNELS: usize = 4;

    const RED_SHIFT: u32 = 0;
    const GREEN_SHIFT: u32 = 8;
    const BLUE_SHIFT: u32 = 16;
    const ALPHA_SHIFT: u32 = 24;
    const CHANNEL_MASK: u32 = 0xFF;

    /// A single RGBA pixel packed into one 32-bit value.
    ///
    /// Bit layout: bits 0-7 red, 8-15 green, 16-23 blue, 24-31 alpha. Read as
    /// little-endian bytes the value is `[r, g, b, a]`, the same channel order
    /// the `image` crate uses for RGBA8 rasters.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        value: u32,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                value: u32::from_le_bytes([red, green, blue, alpha]),
            }
        }

        pub fn red(&self) -> Channel {
            (self.value >> RED_SHIFT & CHANNEL_MASK) as Channel
        }

        pub fn set_red(&mut self, red: Channel) {
            self.value = (self.value & !(CHANNEL_MASK << RED_SHIFT)) | ((red as u32) << RED_SHIFT);
        }

        pub fn green(&self) -> Channel {
            (self.value >> GREEN_SHIFT & CHANNEL_MASK) as Channel
        }

        pub fn set_green(&mut self, green: Channel) {
            self.value =
                (self.value & !(CHANNEL_MASK << GREEN_SHIFT)) | ((green as u32) << GREEN_SHIFT);
        }

        pub fn blue(&self) -> Channel {
            (self.value >> BLUE_SHIFT & CHANNEL_MASK) as Channel
        }

        pub fn set_blue(&mut self, blue: Channel) {
            self.value =
                (self.value & !(CHANNEL_MASK << BLUE_SHIFT)) | ((blue as u32) << BLUE_SHIFT);
        }

        pub fn alpha(&self) -> Channel {
            (self.value >> ALPHA_SHIFT & CHANNEL_MASK) as Channel
        }

        pub fn set_alpha(&mut self, alpha: Channel) {
            self.value =
                (self.value & !(CHANNEL_MASK << ALPHA_SHIFT)) | ((alpha as u32) << ALPHA_SHIFT);
        }

        /// Returns the channel bytes in raster order `[r, g, b, a]`.
        pub fn to_bytes(&self) -> [Byte; CHANNELS] {
            self.value.to_le_bytes()
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            pixel.to_bytes().to_vec()
        }
    }

    impl From<u32> for Pixel {
        fn from(value: u32) -> Self {
            Pixel { value }
        }
    }

    impl From<Pixel> for u32 {
        fn from(pixel: Pixel) -> Self {
            pixel.value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::{Bytes, Pixel};

    #[test]
    fn packs_channels_into_the_documented_bit_layout() {
        let pixel = Pixel::new(1, 2, 3, 4);
        assert_eq!(u32::from(pixel), 0x0403_0201);
    }

    #[test]
    fn reads_channels_back_from_a_packed_value() {
        let pixel = Pixel::from(0xAABB_CCDD);
        assert_eq!(pixel.red(), 0xDD);
        assert_eq!(pixel.green(), 0xCC);
        assert_eq!(pixel.blue(), 0xBB);
        assert_eq!(pixel.alpha(), 0xAA);
    }

    #[test]
    fn setters_touch_only_their_own_byte() {
        let mut pixel = Pixel::from(0xFFFF_FFFF);
        pixel.set_green(0);
        assert_eq!(u32::from(pixel), 0xFFFF_00FF);
        pixel.set_alpha(7);
        assert_eq!(u32::from(pixel), 0x07FF_00FF);
    }

    #[test]
    fn setter_getter_round_trip() {
        let mut pixel = Pixel::default();
        pixel.set_red(11);
        pixel.set_green(22);
        pixel.set_blue(33);
        pixel.set_alpha(44);
        assert_eq!(pixel, Pixel::new(11, 22, 33, 44));
    }

    #[test]
    fn byte_conversions_preserve_raster_order() {
        let bytes = [10u8, 20, 30, 40];
        let pixel = Pixel::from(&bytes[..]);
        assert_eq!(pixel.to_bytes(), bytes);
        let back: Bytes = pixel.into();
        assert_eq!(back, vec![10, 20, 30, 40]);
    }

    #[test]
    #[should_panic(expected = "Cannot convert")]
    fn rejects_slices_that_are_not_four_bytes() {
        let bytes = [1u8, 2, 3];
        let _ = Pixel::from(&bytes[..]);
    }

    #[test]
    fn default_is_transparent_black() {
        let pixel = Pixel::default();
        assert_eq!(u32::from(pixel), 0);
        assert_eq!(pixel.alpha(), 0);
    }
}
