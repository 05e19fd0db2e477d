//! Acquisition & dispatch loop: the receiver core.
//!
//! [`Receiver`] owns the transport, the publisher, the back-off delay, the
//! raw frame buffer and the decoded view, both overwritten every cycle. Each [`step`](Receiver::step) handles exactly
//! one frame:
//!
//! ```text
//!            ┌────────────── valid: decode + publish ──────────────┐
//!            ▼                                                      │
//!      ┌──────────┐  read 18 B   ┌────────────┐                     │
//!  ──▶ │ Reading  │────────────▶│  filter    │─────────────────────┘
//!      └──────────┘              └────────────┘
//!            ▲                          │ corrupted / read error
//!            │      ┌────────────┐      │
//!            └──────│ Recovering │◀─────┘
//!       delay_ms    │  resync()  │
//!                   └────────────┘
//! ```
//!
//! There is no terminal state; [`run`](Receiver::run) never returns.

use embedded_hal::delay::DelayNs;
use log::{debug, info, trace, warn};

use crate::config::{ReceiverConfig, TaskConfig, TimingConfig};
use crate::drivers::task_pin::{Core, spawn_on_core};
use crate::error::{Error, Result};
use crate::frame::filter::{self, FrameFault};
use crate::frame::{DecodedFrame, RawFrame, decode};

use super::ports::{FramePublisher, FrameTransport, Monitor};

/// Outcome of one [`Receiver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The frame passed the filter and was handed to the publisher.
    Published,
    /// The frame failed the filter; the transport was resynced.
    Rejected(FrameFault),
    /// The transport read failed; the transport was resynced.
    TransportFault,
}

/// Counters owned by the worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    pub published: u64,
    pub rejected: u64,
    pub transport_faults: u64,
}

// ───────────────────────────────────────────────────────────────
// Receiver
// ───────────────────────────────────────────────────────────────

/// Single-frame acquisition worker over injected transport, publisher
/// and delay.
pub struct Receiver<T, P, D> {
    transport: T,
    publisher: P,
    delay: D,
    timing: TimingConfig,
    raw: RawFrame,
    view: DecodedFrame,
    stats: ReceiverStats,
    /// Rejected or faulted cycles since the last published frame.
    bad_streak: u32,
    signal_lost: bool,
}

impl<T, P, D> Receiver<T, P, D>
where
    T: FrameTransport,
    P: FramePublisher,
    D: DelayNs,
{
    pub fn new(transport: T, publisher: P, delay: D, config: &ReceiverConfig) -> Self {
        Self {
            transport,
            publisher,
            delay,
            timing: config.timing,
            raw: RawFrame::default(),
            view: DecodedFrame::default(),
            stats: ReceiverStats::default(),
            bad_streak: 0,
            signal_lost: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drop whatever the line delivered before the worker existed.
    pub fn start(&mut self) {
        self.transport.resync();
        info!(
            "Receiver started (resync delay {} ms)",
            self.timing.resync_delay_ms
        );
    }

    /// Run one Reading cycle, plus Recovering if the frame is unusable.
    pub fn step(&mut self) -> Cycle {
        if let Err(e) = self.transport.read_frame(self.raw.as_mut_bytes()) {
            debug!("Receiver: transport read failed: {:?}", e);
            self.stats.transport_faults += 1;
            self.recover();
            return Cycle::TransportFault;
        }

        self.view = decode(&self.raw);
        match filter::check_decoded(&self.view) {
            Err(fault) => {
                debug!("Receiver: frame rejected: {}", fault);
                self.stats.rejected += 1;
                self.recover();
                Cycle::Rejected(fault)
            }
            Ok(()) => {
                trace!("Receiver: {:?}", self.view);
                self.publisher.publish(&self.view);
                self.stats.published += 1;
                self.on_good_frame();
                Cycle::Published
            }
        }
    }

    /// Resync, run forever.
    pub fn run(mut self) -> ! {
        self.start();
        loop {
            self.step();
        }
    }

    // ── Recovery ──────────────────────────────────────────────

    fn recover(&mut self) {
        self.transport.resync();
        self.delay.delay_ms(self.timing.resync_delay_ms);

        self.bad_streak = self.bad_streak.saturating_add(1);
        if !self.signal_lost
            && self.timing.signal_lost_after > 0
            && self.bad_streak >= self.timing.signal_lost_after
        {
            self.signal_lost = true;
            warn!(
                "Receiver: signal lost ({} consecutive bad frames)",
                self.bad_streak
            );
        }
    }

    fn on_good_frame(&mut self) {
        if self.signal_lost {
            info!(
                "Receiver: signal restored after {} bad frames",
                self.bad_streak
            );
            self.signal_lost = false;
        }
        self.bad_streak = 0;
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Whether the consecutive-rejection threshold has been crossed.
    pub fn signal_lost(&self) -> bool {
        self.signal_lost
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}

impl<T, P, D> Receiver<T, P, D>
where
    T: FrameTransport + Send + 'static,
    P: FramePublisher + Send + 'static,
    D: DelayNs + Send + 'static,
{
    /// Move the receiver into its own high-priority thread on the APP core.
    pub fn spawn(self, task: &TaskConfig) -> Result<ReceiverHandle> {
        let thread = spawn_on_core(
            Core::App,
            task.priority,
            task.stack_kb,
            task.name.as_str(),
            move || {
                self.run();
            },
        )
        .map_err(|_| Error::Init("receiver thread spawn failed"))?;
        Ok(ReceiverHandle { thread })
    }
}

/// Supervisor-side handle of a spawned receiver.
///
/// Dropping it detaches the thread; the loop keeps running until the
/// process ends.
pub struct ReceiverHandle {
    thread: std::thread::JoinHandle<()>,
}

impl ReceiverHandle {
    pub fn name(&self) -> Option<&str> {
        self.thread.thread().name()
    }
}

/// The receiver has no health logic of its own.
impl Monitor for ReceiverHandle {}
