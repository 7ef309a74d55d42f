//! PageNav Core
//!
//! Shows exactly one page at a time inside a container element, keeps a
//! back-navigation stack and animates page changes through named
//! transitions.
//!
//! - [`Navigator`]: the navigation state machine (`follow_link`, `go_back`)
//! - [`PageNav`]: scans a document for pages and wires click handling
//! - [`NavigatorConfig`]: element ids, class names and transition style

mod bootstrap;
mod config;
mod error;
mod navigator;
mod page;

pub use bootstrap::{link_target, scan_pages, PageNav, ScannedPages};
pub use config::NavigatorConfig;
pub use error::CoreError;
pub use navigator::{Navigation, Navigator, Surface, WeakNavigator};
pub use page::{Page, PageRegistry};

// Re-export the collaborating crates
pub use pagenav_dom::{
    Document, DomError, ElementId, Event, EventKind, EventTarget, MemoryDocument,
};
pub use pagenav_transitions::{
    Direction, Transition, TransitionError, TransitionHandle, TransitionRegistry,
    TransitionRequest,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
