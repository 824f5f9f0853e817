pub mod filesystem;
pub mod image_rs;
pub mod tokio_spawn;
