//! Request validation and response codes for the command transport.
//!
//! The transport that frames commands and replies lives outside this crate.
//! It hands over the fixed-width capture parameters (channel count, total
//! event count, edge byte, trigger byte) and sends back one [`Response`]
//! byte. The response code values are shared with the other instruments on
//! the same transport.

use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};

use crate::buffer::SAMPLE_BUFFER_SIZE;
use crate::channel::{Channel, Edge};

/// Response code returned to the command transport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum Response {
    Success = 1,
    ArgumentError = 2,
    /// Not produced by the capture core; part of the shared transport
    /// vocabulary.
    Failed = 3,
}

/// Capture request validation failure.
///
/// The only error this core models. Raised before any peripheral is touched,
/// so a rejected request has no hardware side effects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("channel count {0} outside 1..=4")]
    ChannelCount(u8),
    #[error("not a valid capture edge")]
    Edge,
    #[error("event count {0} outside 1..=10000")]
    EventCount(u16),
    #[error("trigger byte {0} is neither a channel nor the none sentinel")]
    Trigger(u8),
}

impl From<Error> for Response {
    fn from(_: Error) -> Self {
        Response::ArgumentError
    }
}

/// A capture request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Number of active channels, 1..=4. Channels are activated in index
    /// order starting at [`Channel::La1`].
    pub channels: u8,
    /// Requested event count, total across all active channels.
    pub events: u16,
    /// Edge type to capture.
    pub edge: Edge,
    /// Trigger pin, or `None` to begin capture immediately.
    pub trigger: Option<Channel>,
}

impl CaptureRequest {
    /// Decode raw wire parameters into a capture request.
    ///
    /// The trigger byte accepts a channel value or the [`Channel::NONE`]
    /// sentinel; anything above the sentinel is rejected. All fields are
    /// checked before the request is handed to the orchestrator.
    pub fn parse(
        channels: u8,
        events: u16,
        edge: u8,
        trigger: u8,
    ) -> Result<Self, Error> {
        let edge = Edge::try_from(edge).map_err(|_| Error::Edge)?;
        let trigger = if trigger == Channel::NONE {
            None
        } else {
            Some(Channel::try_from(trigger).map_err(|_| Error::Trigger(trigger))?)
        };

        let request = Self {
            channels,
            events,
            edge,
            trigger,
        };
        request.validate()?;
        Ok(request)
    }

    /// Check the request against the capture preconditions.
    pub fn validate(&self) -> Result<(), Error> {
        if self.channels == 0 || self.channels as usize > Channel::NUMEL {
            return Err(Error::ChannelCount(self.channels));
        }
        if self.events == 0 || self.events as usize > SAMPLE_BUFFER_SIZE {
            return Err(Error::EventCount(self.events));
        }
        if self.edge == Edge::None {
            return Err(Error::Edge);
        }
        Ok(())
    }

    /// Events each active channel captures. Remainder events of an
    /// indivisible total are dropped.
    pub fn events_per_channel(&self) -> u16 {
        self.events / self.channels as u16
    }
}
