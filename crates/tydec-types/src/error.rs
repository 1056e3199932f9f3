/// Errors raised while interpreting type and byte-order names.
///
/// These only come up at the edges, where a caller spells a wire type
/// or byte order as text (command-line field specs, config files).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The name does not match any [`WireType`](crate::WireType).
    #[error("unknown wire type: {name:?}")]
    UnknownWireType { name: String },

    /// The name is not `little`, `big`, or one of their aliases.
    #[error("unknown endianness: {name:?}")]
    UnknownEndianness { name: String },
}
