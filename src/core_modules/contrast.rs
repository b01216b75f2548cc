// THEORY:
// The `contrast` module holds the two halves of the enhancement: measurement
// and rewrite. `ChannelMeans` summarizes a whole buffer into one value per
// color channel; `ContrastStretch` pushes every pixel away from those means by
// a fixed gain, saturating at the channel range.
//
// Key architectural principles:
// 1.  **Explicit Data Flow**: The means are a value, produced by `measure` and
//     handed to `apply` as an argument. Nothing is captured from surrounding
//     state, so the same means can be reused across buffers or fabricated in
//     tests.
// 2.  **Wide Accumulation, Truncating Division**: Channel sums accumulate in
//     `u64` (no overflow for any realistic raster) and each mean is one
//     integer division at the end. Alpha carries no color and is excluded.
// 3.  **Single Saturating Pass**: The rewrite is one linear sweep; each
//     channel moves to `mean + gain * delta` clamped into [0, 255]. Alpha
//     passes through. The pass is deterministic and stateless, and it is not
//     idempotent: stretching a stretched buffer stretches it further.

use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::errors::{Result, StretchError};

/// Gain applied around the channel means when none is chosen explicitly.
pub const DEFAULT_GAIN: i32 = 3;

/// Per-channel arithmetic means over a buffer, alpha excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMeans {
    /// Truncated mean of the red channel.
    pub red: Channel,
    /// Truncated mean of the green channel.
    pub green: Channel,
    /// Truncated mean of the blue channel.
    pub blue: Channel,
}

impl ChannelMeans {
    /// Measures the mean red, green, and blue values over the whole buffer in
    /// a single pass.
    ///
    /// Fails with [`StretchError::EmptyBuffer`] when the buffer holds no
    /// pixels; the division below is never reached with a zero count.
    pub fn measure(buffer: &PixelBuffer) -> Result<Self> {
        let num_pixels = buffer.len();
        if num_pixels == 0 {
            return Err(StretchError::EmptyBuffer);
        }

        let (sum_red, sum_green, sum_blue) = sum_channels(buffer.pixels());
        Ok(ChannelMeans {
            red: (sum_red / num_pixels as u64) as Channel,
            green: (sum_green / num_pixels as u64) as Channel,
            blue: (sum_blue / num_pixels as u64) as Channel,
        })
    }
}

/// Sums red, green, and blue across a pixel slice as overflow-safe wide
/// totals. The row-parallel pass sums its bands with this same function and
/// divides once, so both paths truncate identically.
pub fn sum_channels(pixels: &[Pixel]) -> (u64, u64, u64) {
    let mut sum_red = 0u64;
    let mut sum_green = 0u64;
    let mut sum_blue = 0u64;
    for pixel in pixels {
        sum_red += pixel.red() as u64;
        sum_green += pixel.green() as u64;
        sum_blue += pixel.blue() as u64;
    }
    (sum_red, sum_green, sum_blue)
}

/// The linear contrast stretch around a set of channel means.
#[derive(Debug, Clone, Copy)]
pub struct ContrastStretch {
    gain: i32,
}

impl Default for ContrastStretch {
    fn default() -> Self {
        ContrastStretch { gain: DEFAULT_GAIN }
    }
}

impl ContrastStretch {
    pub fn new(gain: i32) -> Self {
        ContrastStretch { gain }
    }

    pub fn gain(&self) -> i32 {
        self.gain
    }

    /// Rewrites every pixel in place around the given means and returns the
    /// buffer for chaining. Alpha is untouched.
    pub fn apply<'a>(
        &self,
        buffer: &'a mut PixelBuffer,
        means: ChannelMeans,
    ) -> &'a mut PixelBuffer {
        self.apply_slice(buffer.pixels_mut(), means);
        buffer
    }

    /// Stretches a bare pixel slice. The buffer-level [`ContrastStretch::apply`]
    /// and the row-parallel band workers both funnel through here.
    pub fn apply_slice(&self, pixels: &mut [Pixel], means: ChannelMeans) {
        for pixel in pixels {
            pixel.set_red(stretch_channel(pixel.red(), means.red, self.gain));
            pixel.set_green(stretch_channel(pixel.green(), means.green, self.gain));
            pixel.set_blue(stretch_channel(pixel.blue(), means.blue, self.gain));
        }
    }

    /// Measures the buffer's means and applies the stretch in one call.
    pub fn stretch<'a>(&self, buffer: &'a mut PixelBuffer) -> Result<&'a mut PixelBuffer> {
        let means = ChannelMeans::measure(buffer)?;
        Ok(self.apply(buffer, means))
    }
}

fn stretch_channel(value: Channel, mean: Channel, gain: i32) -> Channel {
    // i64 keeps gain * delta exact for any i32 gain; i32 would wrap.
    let delta = i64::from(value) - i64::from(mean);
    (i64::from(mean) + i64::from(gain) * delta).clamp(0, 255) as Channel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_buffer(width: u32, height: u32, pixel: Pixel) -> PixelBuffer {
        PixelBuffer::from_pixels(width, height, vec![pixel; (width * height) as usize]).unwrap()
    }

    #[test]
    fn means_of_identical_pixels_are_exact() {
        let buffer = uniform_buffer(8, 8, Pixel::new(100, 150, 200, 255));
        let means = ChannelMeans::measure(&buffer).unwrap();
        assert_eq!(
            means,
            ChannelMeans {
                red: 100,
                green: 150,
                blue: 200
            }
        );
    }

    #[test]
    fn means_use_truncating_division() {
        // Reds 0 and 255 average to 127, not 128.
        let pixels = vec![Pixel::new(0, 0, 0, 255), Pixel::new(255, 0, 0, 255)];
        let buffer = PixelBuffer::from_pixels(2, 1, pixels).unwrap();
        let means = ChannelMeans::measure(&buffer).unwrap();
        assert_eq!(means.red, 127);
    }

    #[test]
    fn means_exclude_alpha() {
        let buffer = uniform_buffer(2, 2, Pixel::new(10, 10, 10, 0));
        let means = ChannelMeans::measure(&buffer).unwrap();
        assert_eq!(
            means,
            ChannelMeans {
                red: 10,
                green: 10,
                blue: 10
            }
        );
    }

    #[test]
    fn measuring_an_empty_buffer_fails() {
        let buffer = PixelBuffer::new(0, 0);
        assert!(matches!(
            ChannelMeans::measure(&buffer),
            Err(StretchError::EmptyBuffer)
        ));
    }

    #[test]
    fn pixel_at_the_mean_is_unchanged() {
        let mut buffer = uniform_buffer(1, 1, Pixel::new(100, 150, 200, 255));
        let means = ChannelMeans::measure(&buffer).unwrap();
        ContrastStretch::default().apply(&mut buffer, means);
        assert_eq!(buffer.get(0, 0), Pixel::new(100, 150, 200, 255));
    }

    #[test]
    fn stretch_clamps_at_the_channel_ceiling() {
        // 0 + 3 * (255 - 0) = 765, clamped to 255.
        let mut buffer = uniform_buffer(1, 1, Pixel::new(255, 255, 255, 255));
        let means = ChannelMeans {
            red: 0,
            green: 0,
            blue: 0,
        };
        ContrastStretch::default().apply(&mut buffer, means);
        assert_eq!(buffer.get(0, 0), Pixel::new(255, 255, 255, 255));
    }

    #[test]
    fn stretch_clamps_at_the_channel_floor() {
        // 255 + 3 * (0 - 255) = -510, clamped to 0.
        let mut buffer = uniform_buffer(1, 1, Pixel::new(0, 0, 0, 255));
        let means = ChannelMeans {
            red: 255,
            green: 255,
            blue: 255,
        };
        ContrastStretch::default().apply(&mut buffer, means);
        assert_eq!(buffer.get(0, 0), Pixel::new(0, 0, 0, 255));
    }

    #[test]
    fn extreme_gains_saturate_at_the_channel_bounds() {
        // gain * delta exceeds i32 here; the widened arithmetic must still
        // land on the clamp, not on a wrapped value.
        let means = ChannelMeans {
            red: 0,
            green: 0,
            blue: 0,
        };

        let mut buffer = uniform_buffer(1, 1, Pixel::new(2, 2, 2, 255));
        ContrastStretch::new(i32::MAX).apply(&mut buffer, means);
        assert_eq!(buffer.get(0, 0), Pixel::new(255, 255, 255, 255));

        let mut buffer = uniform_buffer(1, 1, Pixel::new(2, 2, 2, 255));
        ContrastStretch::new(i32::MIN).apply(&mut buffer, means);
        assert_eq!(buffer.get(0, 0), Pixel::new(0, 0, 0, 255));
    }

    #[test]
    fn alpha_passes_through_untouched() {
        let mut buffer = uniform_buffer(2, 1, Pixel::new(10, 20, 30, 77));
        let means = ChannelMeans {
            red: 200,
            green: 200,
            blue: 200,
        };
        ContrastStretch::default().apply(&mut buffer, means);
        assert_eq!(buffer.get(0, 0).alpha(), 77);
        assert_eq!(buffer.get(1, 0).alpha(), 77);
    }

    #[test]
    fn applying_twice_is_not_idempotent() {
        let pixels = vec![Pixel::new(119, 0, 0, 255), Pixel::new(135, 0, 0, 255)];
        let mut once = PixelBuffer::from_pixels(2, 1, pixels).unwrap();
        let means = ChannelMeans::measure(&once).unwrap();
        assert_eq!(means.red, 127);

        let stretch = ContrastStretch::default();
        stretch.apply(&mut once, means);
        let mut twice = once.clone();
        stretch.apply(&mut twice, means);

        assert_ne!(once.pixels(), twice.pixels());
    }

    #[test]
    fn apply_returns_the_buffer_for_chaining() {
        let mut buffer = uniform_buffer(2, 2, Pixel::new(50, 50, 50, 255));
        let means = ChannelMeans {
            red: 40,
            green: 40,
            blue: 40,
        };
        let stretched = ContrastStretch::default().apply(&mut buffer, means);
        // 40 + 3 * (50 - 40) = 70.
        assert_eq!(stretched.get(0, 0).red(), 70);
    }

    #[test]
    fn end_to_end_two_pixel_stretch() {
        // Reds 0 and 255: the mean truncates to 127 and the stretch saturates
        // both ends.
        let pixels = vec![Pixel::new(0, 10, 10, 255), Pixel::new(255, 10, 10, 255)];
        let mut buffer = PixelBuffer::from_pixels(2, 1, pixels).unwrap();

        let means = ChannelMeans::measure(&buffer).unwrap();
        assert_eq!(means.red, 127);

        ContrastStretch::default().apply(&mut buffer, means);
        assert_eq!(buffer.get(0, 0).red(), 0);
        assert_eq!(buffer.get(1, 0).red(), 255);
    }

    #[test]
    fn stretch_measures_and_applies_in_one_call() {
        let pixels = vec![Pixel::new(0, 0, 0, 255), Pixel::new(255, 255, 255, 255)];
        let mut buffer = PixelBuffer::from_pixels(2, 1, pixels).unwrap();
        ContrastStretch::default().stretch(&mut buffer).unwrap();
        assert_eq!(buffer.get(0, 0), Pixel::new(0, 0, 0, 255));
        assert_eq!(buffer.get(1, 0), Pixel::new(255, 255, 255, 255));
    }

    #[test]
    fn stretch_propagates_the_empty_buffer_error() {
        let mut buffer = PixelBuffer::new(3, 0);
        assert!(matches!(
            ContrastStretch::default().stretch(&mut buffer),
            Err(StretchError::EmptyBuffer)
        ));
    }

    #[test]
    fn default_gain_is_three() {
        assert_eq!(DEFAULT_GAIN, 3);
        assert_eq!(ContrastStretch::default().gain(), DEFAULT_GAIN);
    }
}
