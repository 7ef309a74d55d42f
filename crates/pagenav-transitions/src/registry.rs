//! Transition registry
//!
//! Maps a style name to a [`Transition`]. Lookups never fail: an unknown
//! name resolves to the `none` strategy, which is registered at
//! construction and can be replaced but never removed.

use std::collections::HashMap;
use std::sync::Arc;

use pagenav_dom::{Document, ElementId};

use crate::builtin::{NoneTransition, SwipeTransition};
use crate::direction::Direction;
use crate::handle::TransitionHandle;

/// Style used when no style is configured
pub const DEFAULT_STYLE: &str = "swipe";

/// Style every failed lookup lands on
pub const FALLBACK_STYLE: &str = "none";

/// Everything a transition needs to show or hide one page.
pub struct TransitionRequest<'a> {
    pub document: &'a dyn Document,
    /// Element pages are mounted into
    pub container: ElementId,
    /// Page element being shown or hidden
    pub element: ElementId,
    pub direction: Direction,
    /// True when showing, false when hiding
    pub entering: bool,
}

/// A named show/hide strategy.
///
/// On success the element must end up mounted in the container when
/// entering and unmounted when leaving, either immediately or once the
/// returned handle finishes.
pub trait Transition: Send + Sync {
    fn run(&self, request: &TransitionRequest<'_>) -> pagenav_dom::Result<TransitionHandle>;
}

impl<F> Transition for F
where
    F: Fn(&TransitionRequest<'_>) -> pagenav_dom::Result<TransitionHandle> + Send + Sync,
{
    fn run(&self, request: &TransitionRequest<'_>) -> pagenav_dom::Result<TransitionHandle> {
        self(request)
    }
}

pub struct TransitionRegistry {
    transitions: HashMap<String, Arc<dyn Transition>>,
    default_style: String,
}

impl TransitionRegistry {
    /// Registry with the built-in strategies and `swipe` as default style
    pub fn new() -> Self {
        Self::with_default_style(DEFAULT_STYLE)
    }

    pub fn with_default_style(style: impl Into<String>) -> Self {
        let mut registry = Self {
            transitions: HashMap::new(),
            default_style: style.into(),
        };
        registry.register("swipe", SwipeTransition);
        registry.register(FALLBACK_STYLE, NoneTransition);
        registry
    }

    /// Store `transition` under `name`. An existing registration is replaced.
    pub fn register<T>(&mut self, name: impl Into<String>, transition: T)
    where
        T: Transition + 'static,
    {
        let name = name.into();
        let replaced = self
            .transitions
            .insert(name.clone(), Arc::new(transition))
            .is_some();

        tracing::debug!(style = %name, replaced, "Registered page transition");
    }

    /// Resolve a style name to a transition.
    ///
    /// `None` or an empty name means the default style. Anything not
    /// registered resolves to the `none` strategy.
    pub fn resolve(&self, name: Option<&str>) -> Arc<dyn Transition> {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(self.default_style.as_str());

        if let Some(transition) = self.transitions.get(name) {
            return Arc::clone(transition);
        }

        tracing::debug!(style = %name, fallback = FALLBACK_STYLE, "Unknown page transition");

        self.transitions
            .get(FALLBACK_STYLE)
            .cloned()
            .unwrap_or_else(|| Arc::new(NoneTransition))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transitions.contains_key(name)
    }

    /// Registered style names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transitions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_style(&self) -> &str {
        &self.default_style
    }

    pub fn set_default_style(&mut self, style: impl Into<String>) {
        self.default_style = style.into();
    }
}

impl Default for TransitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
