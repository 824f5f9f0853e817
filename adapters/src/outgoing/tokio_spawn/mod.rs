pub mod processing_timeout_tokio;
