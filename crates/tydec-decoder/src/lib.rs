#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;

mod composite;
mod navigate;
mod numeric;

pub use config::{DecoderConfig, SignedByteOrder};
pub use decoder::TypedDecoder;
pub use error::DecodeError;
pub use tydec_stream::{ByteStream, MemoryStream, StreamError};
pub use tydec_types::{EndianPolicy, Endianness, Format, Value, WireType};
