pub mod codec_image;
pub mod convert;
pub mod processor_image;
