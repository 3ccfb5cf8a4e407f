pub mod config;
pub mod logging;

// Upload pipeline modules
pub mod error;
pub mod mode;
pub mod server;
pub mod storage;
pub mod upload;
