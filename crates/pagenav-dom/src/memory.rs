//! In-memory document tree
//!
//! Behaves like a browser DOM for everything the navigator relies on:
//! parent/child links, class lists, attributes and bubbling event dispatch.
//! Rendering is not modelled; `force_reflow` only counts calls.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::document::{Document, ElementId};
use crate::error::DomError;
use crate::event::{Event, EventKind, EventTarget, Listener, ListenerId};
use crate::Result;

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    reflows: u32,
}

struct Registration {
    target: EventTarget,
    kind: EventKind,
    listener: Listener,
}

#[derive(Default)]
struct Tree {
    nodes: HashMap<ElementId, Node>,
    /// Creation order; orders detached subtrees after the attached tree
    order: Vec<ElementId>,
}

impl Tree {
    fn node(&self, id: ElementId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(DomError::UnknownElement(id))
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(DomError::UnknownElement(id))
    }

    fn unlink(&mut self, child: ElementId) -> Result<()> {
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|c| *c != child);
        Ok(())
    }

    /// Pre-order walk from the root, followed by each detached subtree in
    /// creation order of its top element.
    fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let tops = self
            .order
            .iter()
            .copied()
            .filter(|id| self.nodes.get(id).is_some_and(|n| n.parent.is_none()));

        for top in tops {
            let mut stack = vec![top];
            while let Some(id) = stack.pop() {
                out.push(id);
                if let Some(node) = self.nodes.get(&id) {
                    stack.extend(node.children.iter().rev().copied());
                }
            }
        }
        out
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, of: ElementId) -> Result<bool> {
        let mut cursor = Some(of);
        while let Some(current) = cursor {
            if current == candidate {
                return Ok(true);
            }
            cursor = self.node(current)?.parent;
        }
        Ok(false)
    }
}

pub struct MemoryDocument {
    tree: RwLock<Tree>,
    listeners: RwLock<BTreeMap<ListenerId, Registration>>,
    next_element: AtomicU64,
    next_listener: AtomicU64,
    root: ElementId,
    body: ElementId,
}

impl MemoryDocument {
    /// Create a document holding an `HTML` root with a `BODY` child.
    pub fn new() -> Self {
        let root = ElementId::from_raw(0);
        let body = ElementId::from_raw(1);

        let mut tree = Tree::default();
        tree.nodes.insert(
            root,
            Node {
                tag: "HTML".to_string(),
                children: vec![body],
                ..Node::default()
            },
        );
        tree.nodes.insert(
            body,
            Node {
                tag: "BODY".to_string(),
                parent: Some(root),
                ..Node::default()
            },
        );
        tree.order.extend([root, body]);

        Self {
            tree: RwLock::new(tree),
            listeners: RwLock::new(BTreeMap::new()),
            next_element: AtomicU64::new(2),
            next_listener: AtomicU64::new(0),
            root,
            body,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element. The tag is normalized to upper case.
    pub fn create_element(&self, tag: &str) -> ElementId {
        let id = ElementId::from_raw(self.next_element.fetch_add(1, Ordering::Relaxed));
        let mut tree = self.tree.write();
        tree.nodes.insert(
            id,
            Node {
                tag: tag.to_uppercase(),
                ..Node::default()
            },
        );
        tree.order.push(id);
        id
    }

    pub fn set_attribute(&self, element: ElementId, name: &str, value: &str) -> Result<()> {
        let mut tree = self.tree.write();
        tree.node_mut(element)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn children(&self, element: ElementId) -> Result<Vec<ElementId>> {
        Ok(self.tree.read().node(element)?.children.clone())
    }

    pub fn classes(&self, element: ElementId) -> Result<Vec<String>> {
        Ok(self.tree.read().node(element)?.classes.clone())
    }

    /// True if `element` is reachable from the root.
    pub fn is_connected(&self, element: ElementId) -> Result<bool> {
        self.tree.read().is_ancestor_or_self(self.root, element)
    }

    pub fn reflow_count(&self, element: ElementId) -> Result<u32> {
        Ok(self.tree.read().node(element)?.reflows)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Dispatch `event`, bubbling from its target through every ancestor and
    /// finally to document-level listeners.
    ///
    /// Listeners are collected up front and run without any internal lock
    /// held, so they are free to mutate the document or unsubscribe.
    pub fn dispatch(&self, event: &Event) -> Result<()> {
        let mut path = Vec::new();
        {
            let tree = self.tree.read();
            let mut cursor = Some(event.target);
            while let Some(current) = cursor {
                path.push(EventTarget::Element(current));
                cursor = tree.node(current)?.parent;
            }
        }
        path.push(EventTarget::Document);

        for target in path {
            let batch: Vec<(ListenerId, Listener)> = self
                .listeners
                .read()
                .iter()
                .filter(|(_, r)| r.target == target && r.kind == event.kind)
                .map(|(id, r)| (*id, r.listener.clone()))
                .collect();

            for (id, listener) in batch {
                // A listener earlier in this batch may have removed it
                if !self.listeners.read().contains_key(&id) {
                    continue;
                }
                listener(self as &dyn Document, event);
            }
        }

        tracing::trace!(kind = ?event.kind, target = %event.target, "Dispatched event");

        Ok(())
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let tree = self.tree.read();
        tree.document_order().into_iter().find(|element| {
            tree.nodes
                .get(element)
                .and_then(|n| n.attributes.get("id"))
                .is_some_and(|value| value == id)
        })
    }

    fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        let tree = self.tree.read();
        tree.document_order()
            .into_iter()
            .filter(|element| {
                tree.nodes
                    .get(element)
                    .is_some_and(|n| n.classes.iter().any(|c| c == class))
            })
            .collect()
    }

    fn node_name(&self, element: ElementId) -> Result<String> {
        Ok(self.tree.read().node(element)?.tag.clone())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Result<Option<String>> {
        Ok(self.tree.read().node(element)?.attributes.get(name).cloned())
    }

    fn parent(&self, element: ElementId) -> Result<Option<ElementId>> {
        Ok(self.tree.read().node(element)?.parent)
    }

    fn add_class(&self, element: ElementId, class: &str) -> Result<()> {
        let mut tree = self.tree.write();
        let node = tree.node_mut(element)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, element: ElementId, class: &str) -> Result<()> {
        let mut tree = self.tree.write();
        tree.node_mut(element)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, element: ElementId, class: &str) -> Result<bool> {
        Ok(self
            .tree
            .read()
            .node(element)?
            .classes
            .iter()
            .any(|c| c == class))
    }

    fn append_child(&self, parent: ElementId, child: ElementId) -> Result<()> {
        let mut tree = self.tree.write();
        tree.node(parent)?;
        if tree.is_ancestor_or_self(child, parent)? {
            return Err(DomError::HierarchyCycle { parent, child });
        }
        tree.unlink(child)?;
        tree.node_mut(child)?.parent = Some(parent);
        tree.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn detach(&self, element: ElementId) -> Result<()> {
        self.tree.write().unlink(element)
    }

    fn force_reflow(&self, element: ElementId) -> Result<()> {
        self.tree.write().node_mut(element)?.reflows += 1;
        Ok(())
    }

    fn subscribe(&self, target: EventTarget, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId::from_raw(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().insert(
            id,
            Registration {
                target,
                kind,
                listener,
            },
        );
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.write().remove(&id).is_some()
    }
}
