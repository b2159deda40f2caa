//! Core data types for vidgrab

pub mod media;
pub mod request;
pub mod session;

pub use media::*;
pub use request::*;
pub use session::*;
