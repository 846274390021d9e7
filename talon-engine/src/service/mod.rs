//! Service layer
//!
//! Services sit between the poll loop and the outside world for everything
//! that is not the hiring gateway. Currently that is booking persistence:
//! recording accepted claims so they survive the process.
//!
//! Services are trait-based to enable testing and dependency injection.

mod booking_log;

pub use booking_log::{BookingLog, BookingRecord, InMemoryBookingLog, JsonlBookingLog};
