//! Decoded-frame topic.
//!
//! A static `embassy-sync` pub/sub channel carries [`DecodedFrame`] values
//! from the receiver thread to any number of subscribers without heap
//! allocation.
//!
//! ```text
//! ┌──────────────┐ publish_immediate ┌───────────┐  try_next_message  ┌────────────┐
//! │   Receiver   │──────────────────▶│ dr16_cmd  │───────────────────▶│ subscriber │
//! │  (worker)    │                   │  (depth 4)│───────────────────▶│ subscriber │
//! └──────────────┘                   └───────────┘                    └────────────┘
//! ```
//!
//! Publishing never waits: a subscriber that falls more than
//! [`TOPIC_DEPTH`] frames behind loses its oldest frames.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pubsub::{ImmediatePublisher, PubSubChannel, Subscriber, WaitResult};
use log::{debug, info};

use crate::app::ports::FramePublisher;
use crate::error::{Error, Result};
use crate::frame::DecodedFrame;
use crate::frame::input::{InputEvents, InputTracker};

/// Topic identity, unique to the decoded-frame type.
pub const TOPIC_NAME: &str = "dr16_cmd";

/// Frames buffered per subscriber.
pub const TOPIC_DEPTH: usize = 4;

/// Concurrent subscribers.
pub const MAX_SUBSCRIBERS: usize = 4;

const MAX_PUBLISHERS: usize = 1;

pub type FrameTopic = PubSubChannel<
    CriticalSectionRawMutex,
    DecodedFrame,
    TOPIC_DEPTH,
    MAX_SUBSCRIBERS,
    MAX_PUBLISHERS,
>;

pub type FrameSubscriber<'a> = Subscriber<
    'a,
    CriticalSectionRawMutex,
    DecodedFrame,
    TOPIC_DEPTH,
    MAX_SUBSCRIBERS,
    MAX_PUBLISHERS,
>;

/// Process-wide decoded-frame topic.
pub static DR16_TOPIC: FrameTopic = PubSubChannel::new();

/// Register a new subscriber on `topic`.
pub fn subscribe(topic: &FrameTopic) -> Result<FrameSubscriber<'_>> {
    topic
        .subscriber()
        .map_err(|_| Error::Init("dr16_cmd subscriber limit reached"))
}

/// [`FramePublisher`] adapter over a [`FrameTopic`].
pub struct TopicPublisher<'a> {
    inner: ImmediatePublisher<
        'a,
        CriticalSectionRawMutex,
        DecodedFrame,
        TOPIC_DEPTH,
        MAX_SUBSCRIBERS,
        MAX_PUBLISHERS,
    >,
}

impl<'a> TopicPublisher<'a> {
    pub fn new(topic: &'a FrameTopic) -> Self {
        info!("Topic '{}': publisher attached", TOPIC_NAME);
        Self {
            inner: topic.immediate_publisher(),
        }
    }
}

impl FramePublisher for TopicPublisher<'_> {
    fn publish(&mut self, frame: &DecodedFrame) {
        self.inner.publish_immediate(*frame);
    }
}

// ───────────────────────────────────────────────────────────────
// Input tap
// ───────────────────────────────────────────────────────────────

/// Subscriber that runs every delivered frame through an [`InputTracker`].
///
/// Poll it at least every `TOPIC_DEPTH` frame periods, or frames are lost
/// and short presses between them go unseen.
pub struct InputTap<'a> {
    sub: FrameSubscriber<'a>,
    tracker: InputTracker,
}

impl<'a> InputTap<'a> {
    pub fn new(topic: &'a FrameTopic) -> Result<Self> {
        Ok(Self {
            sub: subscribe(topic)?,
            tracker: InputTracker::new(),
        })
    }

    /// Feed every pending frame; `on_events` sees each non-empty batch.
    ///
    /// Returns the number of frames consumed.
    pub fn poll(&mut self, mut on_events: impl FnMut(&InputEvents)) -> usize {
        let mut consumed = 0;
        while let Some(msg) = self.sub.try_next_message() {
            match msg {
                WaitResult::Lagged(missed) => {
                    debug!("Topic '{}': tap missed {} frames", TOPIC_NAME, missed);
                }
                WaitResult::Message(frame) => {
                    consumed += 1;
                    let events = self.tracker.update(&frame);
                    if !events.is_empty() {
                        on_events(&events);
                    }
                }
            }
        }
        consumed
    }
}
