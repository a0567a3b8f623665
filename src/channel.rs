//! Capture channel and edge selection types.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// A capture channel.
///
/// Each channel designates one input pin together with the input capture unit
/// and the transfer channel serving it. Channels are 0-indexed on the wire;
/// the byte [`Channel::NONE`] designates "no channel".
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum Channel {
    La1 = 0,
    La2 = 1,
    La3 = 2,
    La4 = 3,
}

impl Channel {
    /// Number of capture channels.
    pub const NUMEL: usize = 4;

    /// Wire sentinel designating "no channel".
    pub const NONE: u8 = Self::NUMEL as u8;

    /// All channels, in index order.
    pub const ALL: [Channel; Self::NUMEL] =
        [Channel::La1, Channel::La2, Channel::La3, Channel::La4];

    /// The channel's position in the sample buffer partition.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Logic level transition selection.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum Edge {
    /// No transition. Valid on the wire, rejected as a capture edge.
    None = 0,
    /// Low to high transitions.
    Rising = 1,
    /// High to low transitions.
    Falling = 2,
    /// Transitions in either direction.
    Any = 3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_wire_values() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(u8::from(*channel), i as u8);
            assert_eq!(Channel::try_from(i as u8).unwrap(), *channel);
            assert_eq!(channel.index(), i);
        }
        assert_eq!(Channel::NONE, 4);
        assert!(Channel::try_from(Channel::NONE).is_err());
    }

    #[test]
    fn edge_wire_values() {
        assert_eq!(Edge::try_from(0).unwrap(), Edge::None);
        assert_eq!(Edge::try_from(1).unwrap(), Edge::Rising);
        assert_eq!(Edge::try_from(2).unwrap(), Edge::Falling);
        assert_eq!(Edge::try_from(3).unwrap(), Edge::Any);
        assert!(Edge::try_from(4).is_err());
    }
}
