//! Download orchestration for vidgrab

pub mod downloader;
pub mod fallback;
pub mod rename;

pub use downloader::*;
pub use fallback::*;
pub use rename::*;
