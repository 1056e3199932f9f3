#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod stream;

pub use error::StreamError;
pub use memory::MemoryStream;
pub use stream::ByteStream;
