//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the receiver against
//! mock adapters. All tests run on the host (x86_64) with no UART
//! required.

mod mock_link;
mod receiver_tests;
mod worker_thread_tests;
