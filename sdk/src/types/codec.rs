//! Wire codec for program enums.
//!
//! The on-chain program encodes every fieldless enum as a single tag byte
//! (Anchor/borsh layout). [`ProgramEnum`] is the shared capability and
//! [`program_enum!`] derives it together with the `u8` conversions and the
//! borsh impls so the tag table is written exactly once per enum.

use crate::error::SdkError;

/// Enum with a one-byte tagged-variant encoding on the wire.
pub trait ProgramEnum: Copy + Sized {
    /// Enum name used in decoding errors.
    const KIND: &'static str;

    /// Encodes the value as its wire tag.
    fn to_program(self) -> u8;

    /// Decodes a wire tag.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::InvalidVariant`] for an unrecognized tag.
    fn from_program(tag: u8) -> Result<Self, SdkError>;
}

/// Implements [`ProgramEnum`], `u8` conversions and borsh for an enum.
macro_rules! program_enum {
    ($ty:ty, $kind:literal, { $($variant:ident = $tag:literal),+ $(,)? }) => {
        impl $crate::types::codec::ProgramEnum for $ty {
            const KIND: &'static str = $kind;

            fn to_program(self) -> u8 {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }

            fn from_program(tag: u8) -> Result<Self, $crate::error::SdkError> {
                match tag {
                    $($tag => Ok(Self::$variant),)+
                    _ => Err($crate::error::SdkError::InvalidVariant { kind: $kind, tag }),
                }
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                $crate::types::codec::ProgramEnum::to_program(value)
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = $crate::error::SdkError;

            fn try_from(tag: u8) -> Result<Self, Self::Error> {
                <$ty as $crate::types::codec::ProgramEnum>::from_program(tag)
            }
        }

        impl borsh::BorshSerialize for $ty {
            fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
                borsh::BorshSerialize::serialize(&u8::from(*self), writer)
            }
        }

        impl borsh::BorshDeserialize for $ty {
            fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
                let tag = <u8 as borsh::BorshDeserialize>::deserialize_reader(reader)?;
                Self::try_from(tag).map_err(|e| {
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
                })
            }
        }
    };
}

pub(crate) use program_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MovementType, OrderType, Side};

    #[test]
    fn test_borsh_writes_single_tag_byte() {
        let bytes = borsh::to_vec(&OrderType::ImmediateOrCancel).expect("serialize");
        assert_eq!(bytes, vec![3]);
    }

    #[test]
    fn test_borsh_rejects_unknown_tag() {
        let result: Result<Side, _> = borsh::from_slice(&[9]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_tag_reports_kind() {
        assert_eq!(
            MovementType::from_program(0),
            Err(SdkError::InvalidVariant {
                kind: "movement type",
                tag: 0
            })
        );
    }
}
