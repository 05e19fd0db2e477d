//! Integration tests for the spawned receiver thread.
//!
//! Frames are fed through an mpsc-backed transport so the worker blocks
//! in `read_frame` exactly as it would on the UART.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver as Rx, Sender};
use std::time::{Duration, Instant};

use dr16::adapters::time::SystemDelay;
use dr16::adapters::topic::{FrameTopic, TopicPublisher, subscribe};
use dr16::app::ports::FrameTransport;
use dr16::app::receiver::Receiver;
use dr16::config::ReceiverConfig;
use dr16::error::TransportError;
use dr16::frame::{DecodedFrame, FRAME_LEN};

use crate::mock_link::{CENTER, frame_with};

static TEST_TOPIC: FrameTopic = FrameTopic::new();

struct ChannelTransport {
    rx: Rx<[u8; FRAME_LEN]>,
    resyncs: Arc<AtomicUsize>,
}

impl FrameTransport for ChannelTransport {
    type Error = TransportError;

    fn read_frame(&mut self, buf: &mut [u8; FRAME_LEN]) -> Result<(), TransportError> {
        *buf = self.rx.recv().map_err(|_| TransportError::EndOfStream)?;
        Ok(())
    }

    fn resync(&mut self) {
        self.resyncs.fetch_add(1, Ordering::SeqCst);
    }
}

fn link() -> (Sender<[u8; FRAME_LEN]>, ChannelTransport, Arc<AtomicUsize>) {
    let (tx, rx) = mpsc::channel();
    let resyncs = Arc::new(AtomicUsize::new(0));
    let transport = ChannelTransport {
        rx,
        resyncs: resyncs.clone(),
    };
    (tx, transport, resyncs)
}

#[test]
fn worker_publishes_valid_frames_to_subscribers() {
    let mut sub = subscribe(&TEST_TOPIC).unwrap();
    let (tx, transport, resyncs) = link();
    let config = ReceiverConfig::default();

    let handle = Receiver::new(
        transport,
        TopicPublisher::new(&TEST_TOPIC),
        SystemDelay::new(),
        &config,
    )
    .spawn(&config.task)
    .unwrap();
    assert_eq!(handle.name(), Some("uart_dr16"));

    tx.send([0u8; FRAME_LEN]).unwrap();
    tx.send(frame_with(|f| f.ch_l_x = 1600)).unwrap();

    let deadline = Instant::now() + Duration::from_secs(2);
    let frame = loop {
        if let Some(f) = sub.try_next_message_pure() {
            break f;
        }
        assert!(Instant::now() < deadline, "no frame published");
        std::thread::sleep(Duration::from_millis(5));
    };

    assert_eq!(frame.ch_l_x, 1600);
    assert_eq!(sub.try_next_message_pure(), None);
    // start() plus one for the corrupted frame.
    assert_eq!(resyncs.load(Ordering::SeqCst), 2);
    drop(tx);
}

#[test]
fn worker_drives_closure_publisher() {
    let (tx, transport, _resyncs) = link();
    let (out_tx, out_rx) = mpsc::channel::<DecodedFrame>();
    let config = ReceiverConfig::default();

    let _handle = Receiver::new(
        transport,
        move |f: &DecodedFrame| {
            let _ = out_tx.send(*f);
        },
        SystemDelay::new(),
        &config,
    )
    .spawn(&config.task)
    .unwrap();

    tx.send(CENTER).unwrap();
    tx.send([0xFF; FRAME_LEN]).unwrap();
    tx.send(frame_with(|f| f.key_mask = 0x8000)).unwrap();

    let first = out_rx.recv_timeout(Duration::from_secs(2)).unwrap();
    let second = out_rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(first.key_mask, 0);
    assert_eq!(second.key_mask, 0x8000);
    drop(tx);
}
