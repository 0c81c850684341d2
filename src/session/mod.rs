//! Recording session engine.
//!
//! Turns a stream of interaction events into a durable `.wwrec` file. The engine
//! assigns indices and elapsed-time stamps; callers only supply the event kind and
//! its payload.

pub mod clock;
pub mod engine;

pub use clock::{Clock, SystemClock};
pub use engine::RecordingSession;
