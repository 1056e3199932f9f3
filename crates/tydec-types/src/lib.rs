#![warn(clippy::pedantic)]

pub mod endianness;
pub mod error;
pub mod value;
pub mod wire_type;

pub use endianness::{EndianPolicy, Endianness};
pub use error::TypeError;
pub use value::Value;
pub use wire_type::{Format, WireType};
