use thiserror::Error;

/// Failures surfaced by buffer construction, image conversion, and the
/// contrast passes. Out-of-range pixel access is not represented here: it is
/// a programming error and panics at the access site instead.
#[derive(Debug, Error)]
pub enum StretchError {
    /// The source image could not be decoded into an RGBA raster.
    #[error("failed to decode image into an RGBA raster: {0}")]
    Decode(String),

    /// The pixel contents could not be re-encoded into an image.
    #[error("failed to encode pixel buffer into an image: {0}")]
    Encode(String),

    /// Channel means are undefined for a buffer with no pixels.
    #[error("cannot measure channel means of an empty pixel buffer")]
    EmptyBuffer,

    /// A pixel vector whose length disagrees with the stated dimensions.
    #[error("{len} pixels cannot fill a {width}x{height} buffer")]
    DimensionMismatch {
        width: u32,
        height: u32,
        len: usize,
    },

    /// A spawned band worker failed to complete.
    #[error("parallel worker failed: {0}")]
    Worker(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StretchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_reports_all_three_quantities() {
        let error = StretchError::DimensionMismatch {
            width: 4,
            height: 3,
            len: 11,
        };
        assert_eq!(error.to_string(), "11 pixels cannot fill a 4x3 buffer");
    }

    #[test]
    fn empty_buffer_message_names_the_operation() {
        assert!(
            StretchError::EmptyBuffer
                .to_string()
                .contains("channel means")
        );
    }
}
