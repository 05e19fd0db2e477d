//! Receiver core: acquisition loop and its port boundary.
//!
//! The [`receiver`] runs the read → validate → publish cycle. Everything it
//! touches arrives through the **port traits** in [`ports`], so the loop is
//! fully testable without a UART or a pub/sub runtime.

pub mod ports;
pub mod receiver;
