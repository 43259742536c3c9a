pub mod format;
pub mod server;
