//! Host-side interfaces shared by the locale picker widgets.
//!
//! The widgets never touch a concrete page. Everything they read or mutate goes
//! through the [`Document`] trait, and every deferred effect goes through a
//! [`Scheduler`]. [`MemoryDocument`] and [`ManualScheduler`] implement both
//! for tests and for the bundled headless and terminal hosts.

pub mod document;
pub mod error;
pub mod event;
pub mod listeners;
pub mod memory;
pub mod node;
pub mod schedule;

pub use document::Document;
pub use error::MarkupError;
pub use event::{Event, EventKind, EventResponse, EventTarget, Key, ListenerId};
pub use listeners::ListenerSet;
pub use memory::{MemoryDocument, NodeSpec, Submission};
pub use node::{Marker, NodeId, Role};
pub use schedule::{DEFAULT_FRAME_INTERVAL, ManualScheduler, Scheduler, TaskHandle};
