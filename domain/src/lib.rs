pub mod encoded_image;
pub mod error;
pub mod operation;
pub mod pixel_buffer;
pub mod upload;
