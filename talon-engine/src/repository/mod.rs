//! Repository layer
//!
//! The engine's only door to the network. The gateway trait abstracts the
//! three remote operations (posting search, slot search, claim) so the
//! snapshot builder, dispatcher and poller can be exercised against mock
//! gateways in tests.

mod gateway;

pub use gateway::{HttpShiftGateway, ShiftGateway};
