use crate::core_modules::contrast::{ChannelMeans, ContrastStretch, sum_channels};
use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::errors::{Result, StretchError};
use crate::pipeline::StretchConfig;
use futures::future::join_all;
use tracing::debug;

/// Row-parallel variant of the contrast stretch for large rasters.
///
/// The raster is split into contiguous whole-row bands, one tokio task per
/// band. Measurement reduces partial channel sums and divides once, so the
/// means are bit-identical to the sequential pass; the stretch reassembles the
/// bands in dispatch order.
pub struct ParallelContrastStretch {
    stretch: ContrastStretch,
    workers: usize,
}

impl Default for ParallelContrastStretch {
    fn default() -> Self {
        Self::new(StretchConfig::default())
    }
}

impl ParallelContrastStretch {
    pub fn new(config: StretchConfig) -> Self {
        Self {
            stretch: ContrastStretch::new(config.gain),
            workers: config.workers.max(1),
        }
    }

    /// Measures the channel means with one summing task per band.
    pub async fn measure(&self, buffer: &PixelBuffer) -> Result<ChannelMeans> {
        let num_pixels = buffer.len();
        if num_pixels == 0 {
            return Err(StretchError::EmptyBuffer);
        }

        let mut tasks = Vec::new();
        for band in Self::bands(buffer.pixels(), buffer.width(), buffer.height(), self.workers) {
            tasks.push(tokio::spawn(async move { sum_channels(&band) }));
        }
        debug!(
            workers = self.workers,
            bands = tasks.len(),
            "dispatched measurement bands"
        );

        let mut sum_red = 0u64;
        let mut sum_green = 0u64;
        let mut sum_blue = 0u64;
        for handle in join_all(tasks).await {
            let (red, green, blue) =
                handle.map_err(|error| StretchError::Worker(error.to_string()))?;
            sum_red += red;
            sum_green += green;
            sum_blue += blue;
        }

        // One divide at the very end keeps the truncation identical to the
        // sequential pass.
        Ok(ChannelMeans {
            red: (sum_red / num_pixels as u64) as Channel,
            green: (sum_green / num_pixels as u64) as Channel,
            blue: (sum_blue / num_pixels as u64) as Channel,
        })
    }

    /// Stretches the buffer around the given means with one task per band and
    /// returns the reassembled raster. An empty buffer is returned unchanged.
    pub async fn apply(&self, buffer: PixelBuffer, means: ChannelMeans) -> Result<PixelBuffer> {
        if buffer.is_empty() {
            return Ok(buffer);
        }

        let width = buffer.width();
        let height = buffer.height();
        let expected = buffer.len();

        let mut tasks = Vec::new();
        for mut band in Self::bands(buffer.pixels(), width, height, self.workers) {
            let stretch = self.stretch;
            tasks.push(tokio::spawn(async move {
                stretch.apply_slice(&mut band, means);
                band
            }));
        }
        debug!(
            workers = self.workers,
            bands = tasks.len(),
            "dispatched stretch bands"
        );

        let mut pixels = Vec::with_capacity(expected);
        for handle in join_all(tasks).await {
            let band = handle.map_err(|error| StretchError::Worker(error.to_string()))?;
            pixels.extend(band);
        }

        // Bands rejoin in dispatch order, so the checked constructor sees the
        // original raster shape.
        PixelBuffer::from_pixels(width, height, pixels)
    }

    /// Measures and applies in one call, the parallel twin of
    /// [`ContrastStretch::stretch`].
    pub async fn stretch(&self, buffer: PixelBuffer) -> Result<PixelBuffer> {
        let means = self.measure(&buffer).await?;
        self.apply(buffer, means).await
    }

    /// Splits a raster into contiguous whole-row bands, at most one per
    /// worker. Callers guarantee a non-empty raster.
    fn bands(pixels: &[Pixel], width: u32, height: u32, workers: usize) -> Vec<Vec<Pixel>> {
        let rows_per_band = (height as usize).div_ceil(workers).max(1);
        let band_len = rows_per_band * width as usize;
        pixels.chunks(band_len).map(|band| band.to_vec()).collect()
    }
}
