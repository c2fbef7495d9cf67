pub mod config_io;
pub mod download;
pub mod logging;
pub mod qr_file;
