pub mod commands;
pub mod params;
pub mod service;
pub mod transport;
