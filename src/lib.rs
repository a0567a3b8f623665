#![cfg_attr(not(test), no_std)]
//! Capture core for a four-channel logic-level event timestamper.
//!
//! # Design
//!
//! Each of the four input pins pairs with an input capture unit and a
//! transfer channel. A running input capture unit latches the current count
//! of the shared capture timer into its capture register whenever the
//! configured edge occurs on its pin; the transfer channel then moves each
//! latched value into that channel's region of the shared sample buffer and
//! signals completion once it has moved the requested number of events.
//!
//! The [`LogicAnalyzer`] orchestrator drives all of this through the
//! peripheral traits in [`interface`]. A capture request configures the
//! active channels in an idle-but-ready state, then either fires the trigger
//! sequence immediately or arms a one-shot trigger interrupt on the trigger
//! pin: the capture unit's own interrupt for a single-direction edge, the
//! change notification source for either-direction edges. The trigger
//! sequence starts the shared timer (whose sync pulse releases the capture
//! unit counters together), latches the pin levels, and starts the transfer
//! channels back to back.
//!
//! The platform's interrupt handlers translate the hardware interrupts into
//! [`Event`]s and feed them to [`LogicAnalyzer::handle_event`]. Handlers run
//! to completion and never re-enter; on a single-core target this gives every
//! event exclusive access to the orchestrator without locking. A platform
//! without that guarantee must wrap the orchestrator in its own exclusion
//! primitive.

mod analyzer;
pub use analyzer::*;
mod buffer;
pub use buffer::*;
mod channel;
pub use channel::*;
pub mod interface;
pub use interface::*;
mod protocol;
pub use protocol::*;

#[cfg(test)]
pub mod testing;
