//! Sample buffer partitioning.
//!
//! The sample buffer is a fixed array of timestamps shared by all channels,
//! statically sized for the maximum total capture count. Its memory belongs
//! to the platform; the core only hands out region descriptors. At capture
//! start the buffer is divided into one equal contiguous region per active
//! channel, and each transfer channel writes exclusively into its own region.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// Total sample buffer capacity, in timestamps, across all channels.
pub const SAMPLE_BUFFER_SIZE: usize = 10_000;

/// One channel's contiguous slice of the sample buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRegion {
    /// First timestamp slot of the region.
    pub offset: usize,
    /// Number of slots the region spans.
    pub len: usize,
}

/// Divide the sample buffer into one equal region per active channel.
///
/// Regions are contiguous, in channel order, and never overlap. With a
/// channel count that does not divide the capacity, the trailing remainder
/// slots stay unassigned.
pub(crate) fn partition(
    channels: usize,
) -> heapless::Vec<SampleRegion, { Channel::NUMEL }> {
    let len = SAMPLE_BUFFER_SIZE / channels;
    (0..channels)
        .map(|i| SampleRegion {
            offset: i * len,
            len,
        })
        .collect()
}
