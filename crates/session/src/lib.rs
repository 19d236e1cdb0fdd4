//! Session lifecycle and turn orchestration.
//!
//! The `SessionManager` is the single entry point for everything that
//! mutates a session: creation, utterance handling, lesson advancement,
//! and closing. All mutation happens under the session's own lock, and
//! turn pairs are appended atomically. A background sweeper evicts
//! sessions idle past a configurable timeout.

pub mod manager;
pub mod store;
pub mod sweeper;

pub use manager::{Reply, SessionManager, SessionStart};
pub use store::InMemorySessionStore;
pub use sweeper::{spawn_sweeper, sweep_once};
