//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the turn controller and turns its virtual clock
//! into real timers; content generation runs on short-lived tasks it spawns.

mod session;

pub use session::{Command, SessionWorker};
