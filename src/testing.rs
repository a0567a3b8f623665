//! Mock peripherals for exercising the capture core.
//!
//! Every mock pushes its calls onto one shared trace, so tests can assert
//! both per-peripheral effects and the relative ordering across peripherals.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use crate::buffer::SampleRegion;
use crate::channel::{Channel, Edge};
use crate::interface::{
    CaptureClock, ChangeNotification, InputCapture, Pins, Timer, Transfer,
};
use crate::LogicAnalyzer;

/// One recorded peripheral call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    TimerSetPeriod(u16),
    TimerStart,
    TimerReset,
    IcStart(Channel, Edge, CaptureClock),
    IcReset(Channel),
    IcListen(Channel),
    IcUnlisten(Channel),
    CnListen(Channel),
    CnReset,
    DmaConfigure(Channel, u16, SampleRegion),
    DmaListen(Channel),
    DmaStart(Channel),
    DmaReset(Channel),
}

pub type Trace = Rc<RefCell<Vec<Call>>>;

pub struct MockTimer(Trace);

impl Timer for MockTimer {
    fn set_period(&mut self, period: u16) {
        self.0.borrow_mut().push(Call::TimerSetPeriod(period));
    }

    fn start(&mut self) {
        self.0.borrow_mut().push(Call::TimerStart);
    }

    fn reset(&mut self) {
        self.0.borrow_mut().push(Call::TimerReset);
    }

    fn capture_clock(&self) -> CaptureClock {
        CaptureClock::Peripheral
    }
}

pub struct MockInputCapture(Trace);

impl InputCapture for MockInputCapture {
    fn start(&mut self, channel: Channel, edge: Edge, clock: CaptureClock) {
        self.0.borrow_mut().push(Call::IcStart(channel, edge, clock));
    }

    fn reset(&mut self, channel: Channel) {
        self.0.borrow_mut().push(Call::IcReset(channel));
    }

    fn listen(&mut self, channel: Channel) {
        self.0.borrow_mut().push(Call::IcListen(channel));
    }

    fn unlisten(&mut self, channel: Channel) {
        self.0.borrow_mut().push(Call::IcUnlisten(channel));
    }
}

pub struct MockNotification(Trace);

impl ChangeNotification for MockNotification {
    fn listen(&mut self, channel: Channel) {
        self.0.borrow_mut().push(Call::CnListen(channel));
    }

    fn reset(&mut self) {
        self.0.borrow_mut().push(Call::CnReset);
    }
}

pub struct MockTransfer(Trace);

impl Transfer for MockTransfer {
    fn configure(&mut self, channel: Channel, count: u16, destination: SampleRegion) {
        self.0
            .borrow_mut()
            .push(Call::DmaConfigure(channel, count, destination));
    }

    fn listen(&mut self, channel: Channel) {
        self.0.borrow_mut().push(Call::DmaListen(channel));
    }

    fn start(&mut self, channel: Channel) {
        self.0.borrow_mut().push(Call::DmaStart(channel));
    }

    fn reset(&mut self, channel: Channel) {
        self.0.borrow_mut().push(Call::DmaReset(channel));
    }
}

pub struct MockPins(Rc<Cell<u8>>);

impl Pins for MockPins {
    fn levels(&self) -> u8 {
        self.0.get()
    }
}

/// A capture core over mock peripherals with a shared call trace.
pub struct Harness {
    pub trace: Trace,
    /// Pin levels the mock reader reports.
    pub levels: Rc<Cell<u8>>,
    pub la: LogicAnalyzer<
        MockTimer,
        MockInputCapture,
        MockNotification,
        MockTransfer,
        MockPins,
    >,
}

impl Harness {
    pub fn new() -> Self {
        let trace = Trace::default();
        let levels = Rc::new(Cell::new(0));
        let la = LogicAnalyzer::new(
            MockTimer(trace.clone()),
            MockInputCapture(trace.clone()),
            MockNotification(trace.clone()),
            MockTransfer(trace.clone()),
            MockPins(levels.clone()),
        );
        Self { trace, levels, la }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.trace.borrow().clone()
    }

    pub fn clear(&mut self) {
        self.trace.borrow_mut().clear();
    }

    /// Index of the first occurrence of `call` in the trace.
    pub fn position(&self, call: &Call) -> Option<usize> {
        self.trace.borrow().iter().position(|recorded| recorded == call)
    }

    /// Occurrences of `call` in the trace.
    pub fn count(&self, call: &Call) -> usize {
        self.trace
            .borrow()
            .iter()
            .filter(|recorded| *recorded == call)
            .count()
    }
}
