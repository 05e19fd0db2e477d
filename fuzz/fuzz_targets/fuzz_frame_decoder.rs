//! Fuzz target: `decode` / `filter::check` / `InputTracker::update`
//!
//! Slices arbitrary byte sequences into 18-byte frames and asserts that
//! the codec never panics, that every frame re-encodes to its own bytes,
//! and that the filter only accepts frames whose decoded fields are in
//! range.
//!
//! cargo fuzz run fuzz_frame_decoder

#![no_main]

use dr16::frame::filter::is_corrupted;
use dr16::frame::input::InputTracker;
use dr16::frame::{CH_VALUE_MAX, CH_VALUE_MIN, Channel, FRAME_LEN, RawFrame, decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut tracker = InputTracker::new();

    for chunk in data.chunks_exact(FRAME_LEN) {
        let mut bytes = [0u8; FRAME_LEN];
        bytes.copy_from_slice(chunk);
        let raw = RawFrame::new(bytes);

        let frame = decode(&raw);
        assert_eq!(encode(&frame), raw, "re-encode must reproduce the frame");

        if !is_corrupted(&raw) {
            for ch in Channel::ALL {
                let v = frame.channel(ch);
                assert!((CH_VALUE_MIN..=CH_VALUE_MAX).contains(&v), "{ch:?} = {v}");
            }
            assert!(frame.sw_l != 0 && frame.sw_r != 0);
            let _ = tracker.update(&frame);
        }
    }
});
