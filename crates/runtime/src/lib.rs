//! Runtime orchestration for the survival simulation.
//!
//! This crate wires the pure rules of `survival-core` and the catalogs of
//! `survival-content` into an embeddable session API: collaborator
//! injection, notification fan-out, diagnostic logging, and snapshot
//! persistence. Consumers embed [`GameSession`] to drive ticks and
//! [`FileSnapshotRepository`] to save and resume them.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session orchestrator and builder
//! - [`event`] dispatches tick events to notification sinks
//! - [`repository`] persists and restores session snapshots
pub mod error;
pub mod event;
pub mod repository;
pub mod session;

pub use error::{Result, RuntimeError};
pub use event::{NotificationSink, TracingSink};
pub use repository::{FileSnapshotRepository, SessionSnapshot};
pub use session::{GameSession, SessionBuilder};
