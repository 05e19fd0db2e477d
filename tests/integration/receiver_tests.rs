//! Integration tests for the transport → filter → decode → publish loop.
//!
//! Every test drives [`Receiver::step`] one frame at a time against the
//! mock link and asserts on what reached the publisher and how often the
//! transport was resynced.

use std::io::Cursor;

use dr16::adapters::uart::IoTransport;
use dr16::app::receiver::{Cycle, Receiver, ReceiverStats};
use dr16::config::ReceiverConfig;
use dr16::frame::filter::FrameFault;
use dr16::frame::keys::{Key, SwitchSide};
use dr16::frame::{CH_VALUE_MID, Channel, DecodedFrame};

use crate::mock_link::{
    CENTER, CountingDelay, LinkRead, MockPublisher, MockTransport, frame_with,
};

type TestReceiver<T = MockTransport> = Receiver<T, MockPublisher, CountingDelay>;

fn make_receiver<T: dr16::app::ports::FrameTransport>(transport: T) -> TestReceiver<T> {
    Receiver::new(
        transport,
        MockPublisher::default(),
        CountingDelay::default(),
        &ReceiverConfig::default(),
    )
}

// ── Corruption handling ───────────────────────────────────────

#[test]
fn corrupted_frames_resync_once_each_and_publish_nothing() {
    let mut rx = make_receiver(MockTransport::frames([[0u8; 18]; 5]));

    for _ in 0..5 {
        assert!(matches!(rx.step(), Cycle::Rejected(_)));
    }

    assert_eq!(rx.transport().resyncs, 5);
    assert!(rx.publisher().frames.is_empty());
    assert_eq!(rx.delay().waits_ms, vec![3; 5]);
    assert_eq!(
        rx.stats(),
        ReceiverStats {
            published: 0,
            rejected: 5,
            transport_faults: 0,
        }
    );
}

#[test]
fn corrupted_then_valid_publishes_only_valid_frame() {
    let valid = frame_with(|f| {
        f.ch_l_y = 1500;
        f.sw_l = 2;
        f.key_mask = Key::W.raw_value() as u16;
        f.mouse_x = -120;
    });
    let mut rx = make_receiver(MockTransport::frames([[0xFF; 18], valid]));

    rx.step();
    assert_eq!(rx.step(), Cycle::Published);

    let frames = &rx.publisher().frames;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].channel(Channel::LeftY), 1500);
    assert_eq!(frames[0].channel(Channel::RightX), CH_VALUE_MID);
    assert_eq!(frames[0].sw_l, 2);
    assert_eq!(frames[0].mouse_x, -120);
    assert!(frames[0].is_key_held(Key::W));
    assert_eq!(rx.transport().resyncs, 1);
}

#[test]
fn centre_frame_publishes_neutral_sticks() {
    let mut rx = make_receiver(MockTransport::frames([CENTER]));

    assert_eq!(rx.step(), Cycle::Published);

    let f = rx.publisher().frames[0];
    for ch in Channel::ALL {
        assert_eq!(f.stick_offset(ch), 0, "{ch:?}");
    }
    assert_eq!(f.sw_r, 1);
    assert_eq!(f.sw_l, 1);
    assert_eq!(rx.transport().resyncs, 0);
    assert!(rx.delay().waits_ms.is_empty());
}

#[test]
fn out_of_range_channel_names_the_fault() {
    let bad = frame_with(|f| f.ch_r_y = 1685);
    let mut rx = make_receiver(MockTransport::frames([bad]));

    assert_eq!(
        rx.step(),
        Cycle::Rejected(FrameFault::ChannelOutOfRange {
            channel: Channel::RightY,
            value: 1685,
        })
    );
}

#[test]
fn unset_switch_names_the_side() {
    let bad = frame_with(|f| f.sw_r = 0);
    let mut rx = make_receiver(MockTransport::frames([bad]));

    assert_eq!(rx.step(), Cycle::Rejected(FrameFault::SwitchUnset(SwitchSide::Right)));
}

#[test]
fn frames_are_published_in_arrival_order() {
    let frames: Vec<_> = (0..4u16)
        .map(|i| frame_with(|f| f.ch_r_x = CH_VALUE_MID + i * 100))
        .collect();
    let mut rx = make_receiver(MockTransport::frames(frames));

    for _ in 0..4 {
        rx.step();
    }

    let values: Vec<u16> = rx
        .publisher()
        .frames
        .iter()
        .map(|f: &DecodedFrame| f.ch_r_x)
        .collect();
    assert_eq!(values, vec![1024, 1124, 1224, 1324]);
}

// ── Transport faults ──────────────────────────────────────────

#[test]
fn read_failure_recovers_like_corruption() {
    let mut transport = MockTransport::new();
    transport.push(LinkRead::Fail);
    transport.push(LinkRead::Frame(CENTER));
    let mut rx = make_receiver(transport);

    assert_eq!(rx.step(), Cycle::TransportFault);
    assert_eq!(rx.step(), Cycle::Published);

    assert_eq!(rx.transport().resyncs, 1);
    assert_eq!(rx.delay().waits_ms, vec![3]);
    assert_eq!(rx.stats().transport_faults, 1);
    assert_eq!(rx.publisher().frames.len(), 1);
}

#[test]
fn start_resyncs_before_first_read() {
    let mut rx = make_receiver(MockTransport::frames([CENTER]));

    rx.start();
    assert_eq!(rx.transport().resyncs, 1);
    assert_eq!(rx.transport().reads, 0);

    rx.step();
    assert_eq!(rx.transport().resyncs, 1);
}

#[test]
fn configured_resync_delay_is_used() {
    let mut config = ReceiverConfig::default();
    config.timing.resync_delay_ms = 7;
    let mut rx = Receiver::new(
        MockTransport::frames([[0u8; 18]]),
        MockPublisher::default(),
        CountingDelay::default(),
        &config,
    );

    rx.step();
    assert_eq!(rx.delay().waits_ms, vec![7]);
}

// ── Byte-stream replay ────────────────────────────────────────

#[test]
fn replayed_stream_publishes_valid_frames() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&CENTER);
    bytes.extend_from_slice(&frame_with(|f| f.mouse_press_l = 1));
    let mut rx = make_receiver(IoTransport::new(Cursor::new(bytes)));

    assert_eq!(rx.step(), Cycle::Published);
    assert_eq!(rx.step(), Cycle::Published);
    assert_eq!(rx.step(), Cycle::TransportFault);

    let frames = &rx.publisher().frames;
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].mouse_press_l, 1);
}
