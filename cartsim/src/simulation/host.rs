//! Host services the session needs: a monotonic clock and a
//! "call me on the next frame" primitive with cancellation.
//!
//! Both are traits so tests and the headless driver can step time by hand.

use std::collections::VecDeque;
use std::time::Instant;

/// Generation of a run; bumped on every start and reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunId(pub u64);

/// A pending frame callback, tagged with the run that asked for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub run: RunId,
}

/// Opaque handle used to cancel a scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Frame-callback scheduler
pub trait FrameScheduler {
    fn request_frame(&mut self, req: FrameRequest) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Pop the next frame whose callback should fire now
    fn next_due(&mut self) -> Option<FrameRequest>;
}

/// Wall clock backed by `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now += ms.max(0.0);
    }

    pub fn set(&mut self, ms: f64) {
        self.now = ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

/// FIFO of pending frames; every pending frame is due on the next pump
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: VecDeque<(FrameHandle, FrameRequest)>,
    next_handle: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, req: FrameRequest) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.push_back((handle, req));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }

    fn next_due(&mut self) -> Option<FrameRequest> {
        self.pending.pop_front().map(|(_, req)| req)
    }
}
