//! Capture orchestration.
//!
//! # Design
//!
//! [`LogicAnalyzer`] owns the shared timer, the four input capture units, the
//! change notification source, the four transfer channels, and the pin level
//! reader, and moves one capture session through armed, running, and complete.
//!
//! Arming configures every active channel's transfer channel and starts its
//! capture unit, then selects the trigger source. The trigger sequence itself
//! is the latency-critical piece: it starts the shared timer with a one-tick
//! sync period (the pulse that releases all capture unit counters together),
//! latches the pin levels, and starts the transfer channels with as few
//! instructions between the starts as possible, since the starts cannot
//! happen atomically.
//!
//! Teardown is per channel: each transfer channel's completion event resets
//! that channel's pair of units, and the last one out resets the shared
//! timer. An explicit stop resets all four slots unconditionally.

use log::{debug, warn};

use crate::buffer::partition;
use crate::channel::{Channel, Edge};
use crate::interface::{ChangeNotification, InputCapture, Pins, Timer, Transfer};
use crate::protocol::{CaptureRequest, Error, Response};

/// Timer reload period asserting the sync pulse when the timer starts.
const SYNC_PULSE_PERIOD: u16 = 1;

/// Timer reload period once the sync pulse is no longer needed.
const FREE_RUN_PERIOD: u16 = 0;

/// A hardware event, delivered by the platform's interrupt handlers.
///
/// Dispatch through [`LogicAnalyzer::handle_event`] from the interrupt
/// context the event belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The armed input capture trigger interrupt fired.
    CaptureTrigger,
    /// The armed change notification interrupt fired.
    NotificationTrigger,
    /// A transfer channel moved its configured event count.
    TransferComplete(Channel),
}

/// The interrupt source armed to fire the trigger sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Armed {
    /// The trigger channel's input capture interrupt.
    Capture(Channel),
    /// The change notification source.
    Notification,
}

/// The capture orchestrator.
///
/// One instance exists per device; it is the sole owner of the capture
/// peripherals and of the session state (active channel count and trigger-time
/// pin snapshot). Its methods never block. See the crate documentation for
/// the execution contract of [`Self::handle_event`].
pub struct LogicAnalyzer<T, I, N, D, P> {
    timer: T,
    capture_units: I,
    notification: N,
    transfers: D,
    pins: P,
    /// Channels still capturing; counts down as transfer channels complete.
    active_channels: u8,
    /// Pin levels latched when the trigger fired.
    initial_states: u8,
    armed: Option<Armed>,
}

impl<T, I, N, D, P> LogicAnalyzer<T, I, N, D, P>
where
    T: Timer,
    I: InputCapture,
    N: ChangeNotification,
    D: Transfer,
    P: Pins,
{
    /// Construct the orchestrator around its peripherals.
    ///
    /// The peripherals are expected in their idle reset state.
    pub fn new(timer: T, capture_units: I, notification: N, transfers: D, pins: P) -> Self {
        Self {
            timer,
            capture_units,
            notification,
            transfers,
            pins,
            active_channels: 0,
            initial_states: 0,
            armed: None,
        }
    }

    /// Validate `request` and arm a capture.
    ///
    /// Validation completes before any peripheral is touched; a rejected
    /// request has no hardware side effects. A session already in flight is
    /// torn down first. Returns once all channels are configured and the
    /// trigger source is selected; with no trigger pin the trigger sequence
    /// has already run by then. Does not wait for data.
    pub fn start_capture(&mut self, request: CaptureRequest) -> Result<(), Error> {
        request.validate()?;

        if self.active_channels != 0 || self.armed.is_some() {
            warn!("capture already in flight, restarting");
            self.stop_capture();
        }

        // Quiesce the session state before arming anything.
        self.initial_states = 0;
        self.active_channels = request.channels;

        let events = request.events_per_channel();
        let remainder = request.events % request.channels as u16;
        if remainder != 0 {
            warn!(
                "event count {} not divisible by {} channels, dropping {} events",
                request.events, request.channels, remainder
            );
        }

        let clock = self.timer.capture_clock();
        for (&channel, region) in
            Channel::ALL.iter().zip(partition(request.channels as usize))
        {
            debug_assert!(events as usize <= region.len);
            self.transfers.configure(channel, events, region);
            // The completion interrupt is armed now, but the transfer itself
            // only starts in the trigger sequence.
            self.transfers.listen(channel);
            // The capture unit runs from here on. Until the trigger starts
            // the clock source its counter holds at zero; zeros latched into
            // the capture register are never moved, since the transfer
            // channel is not running yet.
            self.capture_units.start(channel, request.edge, clock);
        }

        debug!(
            "capture armed: {} channels, {} events each, edge {:?}, trigger {:?}",
            request.channels, events, request.edge, request.trigger
        );

        self.configure_trigger(request.edge, request.trigger);
        Ok(())
    }

    /// Unconditionally return every capture resource to idle.
    ///
    /// Resets all four channel slots regardless of which ones the current
    /// session uses, so it is safe mid-capture with some channels already
    /// complete. Idempotent.
    pub fn stop_capture(&mut self) {
        self.notification.reset();
        self.timer.reset();

        for channel in Channel::ALL {
            self.capture_units.reset(channel);
            self.transfers.reset(channel);
        }

        self.armed = None;
        self.active_channels = 0;
        debug!("capture stopped");
    }

    /// The pin levels latched when the last capture triggered.
    ///
    /// Quiescent zero until a capture has triggered.
    pub fn initial_states(&self) -> u8 {
        self.initial_states
    }

    /// Dispatch a hardware event from its interrupt context.
    ///
    /// Runs to completion without blocking. Events that do not match the
    /// current session state (a stale trigger after a stop, a completion on
    /// an idle channel) are ignored.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::CaptureTrigger => match self.armed {
                Some(Armed::Capture(channel)) => {
                    self.armed = None;
                    // One-shot: disarm before anything else.
                    self.capture_units.unlisten(channel);
                    self.trigger();
                }
                _ => warn!("capture trigger interrupt while not armed for it"),
            },
            Event::NotificationTrigger => match self.armed {
                Some(Armed::Notification) => {
                    self.armed = None;
                    self.notification.reset();
                    self.trigger();
                }
                _ => warn!("change notification while not armed for it"),
            },
            Event::TransferComplete(channel) => self.complete(channel),
        }
    }

    /// Select the trigger source for an armed capture.
    ///
    /// Without a trigger pin the trigger sequence runs immediately. On a
    /// trigger pin, a single-direction edge arms that channel's capture
    /// interrupt; an either-direction edge arms change notification instead,
    /// since a capture unit interrupts on one transition direction only.
    fn configure_trigger(&mut self, edge: Edge, trigger: Option<Channel>) {
        let channel = match trigger {
            Some(channel) => channel,
            None => {
                self.trigger();
                return;
            }
        };

        if edge == Edge::Any {
            self.notification.listen(channel);
            self.armed = Some(Armed::Notification);
        } else {
            self.capture_units.listen(channel);
            self.armed = Some(Armed::Capture(channel));
        }
    }

    /// Start the shared timer and the active transfer channels.
    ///
    /// Runs either synchronously inside [`Self::start_capture`] (no trigger
    /// pin) or from the armed trigger interrupt.
    fn trigger(&mut self) {
        // A one-tick period asserts the sync output as soon as the timer
        // starts; the pulse releases all capture unit counters together.
        self.timer.set_period(SYNC_PULSE_PERIOD);
        self.timer.start();
        self.initial_states = self.pins.levels();

        // The transfer starts cannot happen simultaneously. An edge arriving
        // between the timer start and a channel's transfer start stays
        // latched in the capture register, though a second edge can
        // overwrite it before the transfer channel picks it up. Starting the
        // transfers before the timer would instead move spurious zeros into
        // the sample buffer.
        //
        // Unrolled: every instruction between two starts adds skew.
        match self.active_channels {
            4 => {
                self.transfers.start(Channel::La4);
                self.transfers.start(Channel::La3);
                self.transfers.start(Channel::La2);
                self.transfers.start(Channel::La1);
            }
            3 => {
                self.transfers.start(Channel::La3);
                self.transfers.start(Channel::La2);
                self.transfers.start(Channel::La1);
            }
            2 => {
                self.transfers.start(Channel::La2);
                self.transfers.start(Channel::La1);
            }
            1 => self.transfers.start(Channel::La1),
            _ => {}
        }

        // The sync output is only needed once.
        self.timer.set_period(FREE_RUN_PERIOD);
    }

    /// Tear down one finished channel.
    ///
    /// The last channel out releases the shared timer.
    fn complete(&mut self, channel: Channel) {
        if self.active_channels == 0 {
            warn!("transfer completion on idle {:?}", channel);
            return;
        }

        self.transfers.reset(channel);
        self.capture_units.reset(channel);
        self.active_channels -= 1;

        if self.active_channels == 0 {
            self.timer.reset();
            debug!("capture complete");
        }
    }

    /// Start a capture from raw transport parameters.
    ///
    /// Byte-level variant of [`Self::start_capture`] for the command layer:
    /// channel count, total event count, edge byte, trigger byte, mapped to
    /// one [`Response`] code.
    pub fn capture(&mut self, channels: u8, events: u16, edge: u8, trigger: u8) -> Response {
        match CaptureRequest::parse(channels, events, edge, trigger)
            .and_then(|request| self.start_capture(request))
        {
            Ok(()) => Response::Success,
            Err(error) => {
                warn!("capture rejected: {}", error);
                error.into()
            }
        }
    }

    /// Stop any capture in progress. Always succeeds.
    pub fn stop(&mut self) -> Response {
        self.stop_capture();
        Response::Success
    }

    /// The trigger-time pin snapshot, for the command layer.
    pub fn get_initial_states(&self) -> (Response, u8) {
        (Response::Success, self.initial_states)
    }
}
