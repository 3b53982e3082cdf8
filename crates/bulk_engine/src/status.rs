//! Status codes for bulk operation outcomes.

use serde::{Serialize, Serializer};

/// Outcome classification for a bulk operation or a single result record.
///
/// The numeric values cross serialization boundaries and must not change:
/// `Fail = 0`, `Success = 1`, `PartialSuccess = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkStatus {
    Fail = 0,
    Success = 1,
    PartialSuccess = 2,
}

impl BulkStatus {
    /// Numeric wire encoding.
    pub fn as_wire(self) -> u8 {
        self as u8
    }

    /// Decode a wire value, rejecting anything outside the closed set.
    pub fn from_wire(raw: u64) -> Option<Self> {
        match raw {
            0 => Some(Self::Fail),
            1 => Some(Self::Success),
            2 => Some(Self::PartialSuccess),
            _ => None,
        }
    }
}

impl Serialize for BulkStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_wire())
    }
}
