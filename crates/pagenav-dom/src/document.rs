//! Document adapter trait

use serde::{Deserialize, Serialize};

use crate::event::{EventKind, EventTarget, Listener, ListenerId};
use crate::Result;

/// Opaque handle to an element owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The subset of a DOM the navigator consumes.
///
/// Elements are referenced, never owned: every method takes an [`ElementId`]
/// and fails with [`DomError::UnknownElement`](crate::DomError) when the
/// handle does not belong to this document.
pub trait Document: Send + Sync {
    /// Look up an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// All elements carrying `class`, in document order.
    ///
    /// Detached elements are included after the attached tree; a page stays
    /// findable while it is unmounted.
    fn elements_by_class(&self, class: &str) -> Vec<ElementId>;

    /// Upper-case tag name (`A`, `DIV`, `HTML`).
    fn node_name(&self, element: ElementId) -> Result<String>;

    fn attribute(&self, element: ElementId, name: &str) -> Result<Option<String>>;

    fn parent(&self, element: ElementId) -> Result<Option<ElementId>>;

    fn add_class(&self, element: ElementId, class: &str) -> Result<()>;

    fn remove_class(&self, element: ElementId, class: &str) -> Result<()>;

    fn has_class(&self, element: ElementId, class: &str) -> Result<bool>;

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    fn append_child(&self, parent: ElementId, child: ElementId) -> Result<()>;

    /// Remove `element` from its parent. Detaching a parentless element is a
    /// no-op.
    fn detach(&self, element: ElementId) -> Result<()>;

    /// Flush pending style changes so a following class change is observed
    /// as a transition by the rendering engine.
    fn force_reflow(&self, element: ElementId) -> Result<()>;

    fn subscribe(&self, target: EventTarget, kind: EventKind, listener: Listener) -> ListenerId;

    /// Returns false if the listener was already removed.
    fn unsubscribe(&self, id: ListenerId) -> bool;

    fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.elements_by_class(class).into_iter().next()
    }

    fn toggle_class(&self, element: ElementId, class: &str) -> Result<()> {
        if self.has_class(element, class)? {
            self.remove_class(element, class)
        } else {
            self.add_class(element, class)
        }
    }

    /// Walk from `element` up through its ancestors and return the first
    /// value of `name` accepted by `accept`.
    ///
    /// The walk ends at the `HTML` element.
    fn closest_attribute(
        &self,
        element: ElementId,
        name: &str,
        accept: &dyn Fn(&str) -> bool,
    ) -> Result<Option<String>> {
        let mut cursor = Some(element);
        while let Some(current) = cursor {
            if let Some(value) = self.attribute(current, name)? {
                if accept(&value) {
                    return Ok(Some(value));
                }
            }
            if self.node_name(current)? == "HTML" {
                break;
            }
            cursor = self.parent(current)?;
        }
        Ok(None)
    }
}
