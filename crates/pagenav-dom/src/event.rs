//! Events and listener subscriptions

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::document::{Document, ElementId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    /// The rendering engine finished a CSS transition on the element
    TransitionEnd,
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Document,
    Element(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

pub type Listener = Arc<dyn Fn(&dyn Document, &Event) + Send + Sync>;

/// A dispatched event. `target` is the element the event originated on,
/// not the element the listener is attached to.
#[derive(Debug)]
pub struct Event {
    pub kind: EventKind,
    pub target: ElementId,
    default_prevented: AtomicBool,
}

impl Event {
    pub fn new(kind: EventKind, target: ElementId) -> Self {
        Self {
            kind,
            target,
            default_prevented: AtomicBool::new(false),
        }
    }

    pub fn click(target: ElementId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn transition_end(target: ElementId) -> Self {
        Self::new(EventKind::TransitionEnd, target)
    }

    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::SeqCst);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::SeqCst)
    }
}

type OnceCallback = Box<dyn FnOnce(&dyn Document, &Event) + Send>;

/// Subscribe a listener that runs at most once.
///
/// The listener unsubscribes itself before running `f`, so a second event
/// on the same target never reaches it.
pub fn subscribe_once<F>(
    document: &dyn Document,
    target: EventTarget,
    kind: EventKind,
    f: F,
) -> ListenerId
where
    F: FnOnce(&dyn Document, &Event) + Send + 'static,
{
    let boxed: OnceCallback = Box::new(f);
    let callback = Arc::new(Mutex::new(Some(boxed)));
    let own_id: Arc<OnceLock<ListenerId>> = Arc::new(OnceLock::new());

    let listener: Listener = {
        let callback = Arc::clone(&callback);
        let own_id = Arc::clone(&own_id);
        Arc::new(move |document: &dyn Document, event: &Event| {
            let Some(f) = callback.lock().take() else {
                return;
            };
            if let Some(id) = own_id.get() {
                document.unsubscribe(*id);
            }
            f(document, event);
        })
    };

    let id = document.subscribe(target, kind, listener);
    let _ = own_id.set(id);

    // Fired from another thread before the id was known
    if callback.lock().is_none() {
        document.unsubscribe(id);
    }

    id
}
