use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Byte order used when assembling multi-byte values.
///
/// ```text
///   0x12345678 as Little:  [0x78, 0x56, 0x34, 0x12]
///   0x12345678 as Big:     [0x12, 0x34, 0x56, 0x78]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    /// The byte order of the machine this code was compiled for.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            Self::Little
        } else {
            Self::Big
        }
    }

    #[must_use]
    pub fn is_little(self) -> bool {
        self == Self::Little
    }

    #[must_use]
    pub fn is_big(self) -> bool {
        self == Self::Big
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Little => f.write_str("little"),
            Self::Big => f.write_str("big"),
        }
    }
}

/// How a decoder picks its default byte order.
///
/// `Auto` is materialized once into the host's order by
/// [`resolve`](Self::resolve); a decoder never re-detects the host order per
/// call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EndianPolicy {
    Little,
    Big,
    /// Host byte order.
    #[default]
    Auto,
}

impl EndianPolicy {
    /// Turn the policy into a concrete byte order.
    #[must_use]
    pub const fn resolve(self) -> Endianness {
        match self {
            Self::Little => Endianness::Little,
            Self::Big => Endianness::Big,
            Self::Auto => Endianness::native(),
        }
    }
}

impl From<Endianness> for EndianPolicy {
    fn from(order: Endianness) -> Self {
        match order {
            Endianness::Little => Self::Little,
            Endianness::Big => Self::Big,
        }
    }
}

impl FromStr for Endianness {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(Self::Little),
            "big" | "be" => Ok(Self::Big),
            _ => Err(TypeError::UnknownEndianness {
                name: s.to_string(),
            }),
        }
    }
}

impl FromStr for EndianPolicy {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") || s.eq_ignore_ascii_case("native") {
            return Ok(Self::Auto);
        }
        s.parse::<Endianness>().map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_to_host_order() {
        let expected = if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        };
        assert_eq!(EndianPolicy::Auto.resolve(), expected);
        assert_eq!(EndianPolicy::default().resolve(), expected);
    }

    #[test]
    fn fixed_policies_resolve_to_themselves() {
        assert_eq!(EndianPolicy::Little.resolve(), Endianness::Little);
        assert_eq!(EndianPolicy::Big.resolve(), Endianness::Big);
    }

    #[test]
    fn parse_names() {
        assert_eq!("LE".parse::<Endianness>().unwrap(), Endianness::Little);
        assert_eq!("big".parse::<Endianness>().unwrap(), Endianness::Big);
        assert_eq!("auto".parse::<EndianPolicy>().unwrap(), EndianPolicy::Auto);
        assert_eq!("be".parse::<EndianPolicy>().unwrap(), EndianPolicy::Big);
        assert!(matches!(
            "middle".parse::<Endianness>(),
            Err(TypeError::UnknownEndianness { .. })
        ));
    }
}
