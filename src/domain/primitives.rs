//! Domain primitives: record ids and battle sides.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                $name(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Primary key of a battle.
    BattleId
);
id_type!(
    /// Primary key of an artist record (not the streaming-platform key).
    ArtistId
);
id_type!(
    /// Primary key of a user account.
    UserId
);
id_type!(PositionId);

/// One of the two competing artists in a battle.
///
/// Encoded on the wire as `0` (side A) or `1` (side B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// Raised when a winner code is neither 0 nor 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSideCode(pub String);

impl Side {
    pub fn code(&self) -> u8 {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, InvalidSideCode> {
        match code {
            0 => Ok(Side::A),
            1 => Ok(Side::B),
            other => Err(InvalidSideCode(other.to_string())),
        }
    }

    /// ASCII digit for this side (`'0'` or `'1'`).
    pub fn as_digit(&self) -> char {
        match self {
            Side::A => '0',
            Side::B => '1',
        }
    }

    pub fn from_digit(digit: u8) -> Result<Self, InvalidSideCode> {
        match digit {
            b'0' => Ok(Side::A),
            b'1' => Ok(Side::B),
            other => Err(InvalidSideCode(format!("{:?}", other as char))),
        }
    }
}

impl Serialize for Side {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Side::from_code(code)
            .map_err(|e| serde::de::Error::custom(format!("invalid side code {}", e.0)))
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}
