// THEORY:
// The `pipeline` module is the top-level API for the enhancement engine. It
// encapsulates the full stack into a single, easy-to-use interface: hand it an
// image (or a pair of file paths) and get back the contrast-stretched result.
// The staged flow is fixed: decode into a pixel buffer, measure the channel
// means, stretch around them, encode back into an image.

use crate::errors::{Result, StretchError};
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, info};

// Re-export key data structures for the public API.
pub use crate::core_modules::contrast::{ChannelMeans, ContrastStretch, DEFAULT_GAIN};
pub use crate::core_modules::pixel_buffer::PixelBuffer;

/// Configuration for the enhancement passes, allowing for tunable behavior.
#[derive(Debug, Clone)]
pub struct StretchConfig {
    /// Gain factor applied around the channel means.
    pub gain: i32,
    /// Worker count for the row-parallel passes.
    pub workers: usize,
}

impl Default for StretchConfig {
    fn default() -> Self {
        StretchConfig {
            gain: DEFAULT_GAIN,
            workers: num_cpus::get(),
        }
    }
}

/// The main, top-level struct for the enhancement engine.
pub struct ContrastPipeline {
    stretch: ContrastStretch,
}

impl ContrastPipeline {
    pub fn new(config: StretchConfig) -> Self {
        Self {
            stretch: ContrastStretch::new(config.gain),
        }
    }

    /// Runs the full enhancement pass over an in-memory image and returns the
    /// stretched copy.
    pub fn enhance_image(&self, image: DynamicImage) -> Result<DynamicImage> {
        // Stage 1: Decode into an addressable pixel buffer.
        let mut buffer = PixelBuffer::from_image(image)?;
        debug!(
            width = buffer.width(),
            height = buffer.height(),
            "decoded image into pixel buffer"
        );

        // Stage 2: Measure the per-channel means.
        let means = ChannelMeans::measure(&buffer)?;
        debug!(
            red = means.red,
            green = means.green,
            blue = means.blue,
            "measured channel means"
        );

        // Stage 3: Stretch every pixel around the means.
        self.stretch.apply(&mut buffer, means);

        // Stage 4: Encode back into a platform image.
        buffer.to_image()
    }

    /// Loads `input`, enhances it, and saves the result to `output`.
    pub fn enhance_file(&self, input: &Path, output: &Path) -> Result<()> {
        let image =
            image::open(input).map_err(|error| StretchError::Decode(error.to_string()))?;
        info!(path = %input.display(), "loaded input image");

        let enhanced = self.enhance_image(image)?;

        enhanced
            .save(output)
            .map_err(|error| StretchError::Encode(error.to_string()))?;
        info!(path = %output.display(), gain = self.stretch.gain(), "saved enhanced image");
        Ok(())
    }
}
