//! Session timer: a caller-driven countdown state machine.

mod session;

pub use session::{SessionTimer, TimerState, DEFAULT_SESSION_SECS};
