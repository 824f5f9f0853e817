// keep public for OpenAPI docs
pub mod download;
pub mod health;
pub mod process;
pub mod upload;
