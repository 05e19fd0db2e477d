//! DR16 receiver library.
//!
//! Decodes the 18-byte DR16 remote-control frame, rejects corrupted
//! frames, and runs the acquisition loop that publishes decoded frames
//! to the `dr16_cmd` topic. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module, so the pure logic
//! builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod frame;
