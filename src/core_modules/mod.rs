pub mod contrast;
pub mod pixel;
pub mod pixel_buffer;
