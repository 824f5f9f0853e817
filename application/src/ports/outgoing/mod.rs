pub mod image_codec;
pub mod image_processor;
pub mod output_store;
pub mod timeout;
