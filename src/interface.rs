//! Peripheral collaborator interfaces.
//!
//! The capture core owns its peripherals behind these traits and never
//! touches registers itself. All operations configure hardware and return
//! immediately; none may block. Configuration calls are infallible by design:
//! a failing register write is a fatal condition for the platform, not a
//! recoverable error of the capture core.
//!
//! Interrupt sources armed through these traits do not call back into the
//! core directly. The platform's interrupt handlers translate each interrupt
//! into the matching [`Event`](crate::Event) and deliver it through
//! [`LogicAnalyzer::handle_event`](crate::LogicAnalyzer::handle_event).

use crate::buffer::SampleRegion;
use crate::channel::{Channel, Edge};

/// Clock source selection for the input capture counters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureClock {
    /// The dedicated timer input.
    Timer1,
    /// The shared peripheral sync line.
    Peripheral,
}

/// The shared capture timer.
///
/// A single hardware timer serves as both the common time base of all capture
/// units and the synchronization pulse that starts their counters together.
pub trait Timer {
    /// Set the timer's reload period, in timer ticks.
    fn set_period(&mut self, period: u16);

    /// Start the timer.
    fn start(&mut self);

    /// Stop the timer and return it to its reset state.
    fn reset(&mut self);

    /// The capture unit clock selection corresponding to this timer.
    fn capture_clock(&self) -> CaptureClock;
}

/// The per-channel input capture units.
///
/// A started unit copies the current value of its counter into its capture
/// register whenever the configured edge occurs on the channel's pin. The
/// counter holds at zero until the clock source starts running.
pub trait InputCapture {
    /// Start capturing `edge` transitions on `channel`, counting `clock`.
    fn start(&mut self, channel: Channel, edge: Edge, clock: CaptureClock);

    /// Return `channel`'s unit to its idle reset state, disarming its
    /// interrupt.
    fn reset(&mut self, channel: Channel);

    /// Arm `channel`'s capture interrupt, reported as
    /// [`Event::CaptureTrigger`](crate::Event::CaptureTrigger).
    fn listen(&mut self, channel: Channel);

    /// Disarm `channel`'s capture interrupt.
    fn unlisten(&mut self, channel: Channel);
}

/// The input change notification source.
///
/// A single interrupt source that fires on any logic level change of the
/// selected pin, in both directions.
pub trait ChangeNotification {
    /// Arm the notification interrupt on `channel`, reported as
    /// [`Event::NotificationTrigger`](crate::Event::NotificationTrigger).
    fn listen(&mut self, channel: Channel);

    /// Disarm the source.
    fn reset(&mut self);
}

/// The per-channel transfer channels.
///
/// Each transfer channel moves values from its input capture unit's capture
/// register into the sample buffer, one value per capture, until it has moved
/// its configured count.
pub trait Transfer {
    /// Prepare `channel` to move `count` capture register values into
    /// `destination`.
    fn configure(&mut self, channel: Channel, count: u16, destination: SampleRegion);

    /// Arm `channel`'s completion interrupt, reported as
    /// [`Event::TransferComplete`](crate::Event::TransferComplete).
    fn listen(&mut self, channel: Channel);

    /// Begin moving data on `channel`.
    fn start(&mut self, channel: Channel);

    /// Return `channel` to its idle reset state, disarming its interrupt.
    fn reset(&mut self, channel: Channel);
}

/// Reader for the instantaneous logic levels of the input pins.
pub trait Pins {
    /// All pin levels, one bit per channel, LSB first.
    fn levels(&self) -> u8;
}
