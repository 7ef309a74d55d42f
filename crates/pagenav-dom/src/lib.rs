//! PageNav Document Adapter
//!
//! The navigator never touches a rendering surface directly. Everything it
//! needs from the host page goes through the [`Document`] trait:
//! - class list mutation and lookup
//! - attribute lookup with ancestor fallback
//! - mounting and unmounting elements
//! - event subscription (click, transition end)
//!
//! [`MemoryDocument`] is a complete in-memory implementation for headless
//! hosts and tests.

mod document;
mod error;
mod event;
mod memory;

pub use document::{Document, ElementId};
pub use error::DomError;
pub use event::{subscribe_once, Event, EventKind, EventTarget, Listener, ListenerId};
pub use memory::MemoryDocument;

pub type Result<T> = std::result::Result<T, DomError>;
