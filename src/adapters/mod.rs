//! Adapters: concrete implementations of the receiver's port traits.
//!
//! | Adapter  | Implements       | Connects to                     |
//! |----------|------------------|---------------------------------|
//! | `uart`   | FrameTransport   | ESP-IDF UART driver (RX ring)   |
//! |          |                  | any `std::io::Read` byte stream |
//! | `topic`  | FramePublisher   | `dr16_cmd` pub/sub channel      |
//! | `time`   | DelayNs          | FreeRTOS tick / thread sleep    |

pub mod time;
pub mod topic;
pub mod uart;
