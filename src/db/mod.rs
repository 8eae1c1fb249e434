pub mod init;
pub mod utils;
pub mod write;
