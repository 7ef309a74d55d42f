//! Navigation state machine
//!
//! ```text
//!            follow_link(id)                 go_back()
//! current ──────────────────▶ target   current ─────────▶ history.pop()
//!   │ pushed onto history                 history empty ⇒ back control hidden
//! ```
//!
//! Logical state changes synchronously. Animations finish later and report
//! through the [`TransitionHandle`]s carried by [`Navigation`]; nothing here
//! waits on them, and a second navigation may start while a previous one is
//! still animating.

use parking_lot::RwLock;
use std::sync::{Arc, Weak};

use pagenav_dom::{Document, ElementId};
use pagenav_transitions::{
    Direction, NoneTransition, Transition, TransitionHandle, TransitionRegistry,
    TransitionRequest,
};

use crate::error::CoreError;
use crate::page::{Page, PageRegistry};
use crate::Result;

/// Elements the navigator drives besides the pages themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Element pages are mounted into
    pub container: ElementId,
    pub back_control: ElementId,
    /// Class that hides the back control
    pub hidden_class: String,
}

impl Surface {
    pub fn new(container: ElementId, back_control: ElementId) -> Self {
        Self {
            container,
            back_control,
            hidden_class: "hidden".to_string(),
        }
    }
}

/// Outcome of one page change
#[derive(Debug)]
pub struct Navigation {
    pub from: String,
    pub to: String,
    /// Completion of the outgoing page's transition
    pub leaving: TransitionHandle,
    /// Completion of the incoming page's transition
    pub entering: TransitionHandle,
}

impl Navigation {
    /// Resolve once both pages have finished animating.
    pub async fn finished(self) -> Result<()> {
        self.leaving.wait().await?;
        self.entering.wait().await?;
        Ok(())
    }
}

struct NavState {
    current: Page,
    /// Bottom to top; the top becomes current on `go_back`
    history: Vec<Page>,
}

struct Inner {
    document: Arc<dyn Document>,
    surface: Surface,
    pages: PageRegistry,
    state: RwLock<NavState>,
    transitions: RwLock<TransitionRegistry>,
}

#[derive(Clone)]
pub struct Navigator {
    inner: Arc<Inner>,
}

/// Non-owning navigator reference, held by document listeners
#[derive(Clone)]
pub struct WeakNavigator {
    inner: Weak<Inner>,
}

impl WeakNavigator {
    pub fn upgrade(&self) -> Option<Navigator> {
        self.inner.upgrade().map(|inner| Navigator { inner })
    }
}

impl Navigator {
    /// Create a navigator showing `initial_page`.
    ///
    /// The initial page's element is assumed to be mounted already. History
    /// starts empty, so the back control is hidden.
    pub fn new(
        document: Arc<dyn Document>,
        surface: Surface,
        pages: PageRegistry,
        initial_page: &str,
        transitions: TransitionRegistry,
    ) -> Result<Self> {
        let current = pages
            .get(initial_page)
            .cloned()
            .ok_or_else(|| CoreError::PageNotFound(initial_page.to_string()))?;

        document.add_class(surface.back_control, &surface.hidden_class)?;

        tracing::info!(
            page_id = %current.id,
            pages = pages.len(),
            style = %transitions.default_style(),
            "Navigator ready"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                document,
                surface,
                pages,
                state: RwLock::new(NavState {
                    current,
                    history: Vec::new(),
                }),
                transitions: RwLock::new(transitions),
            }),
        })
    }

    /// Show `page_id`, pushing the current page onto the history.
    ///
    /// Fails with [`CoreError::PageNotFound`] without touching any state if
    /// the id is unknown. A failing transition is reported after the
    /// navigation has been applied.
    pub fn follow_link(&self, page_id: &str) -> Result<Navigation> {
        let target = self
            .inner
            .pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| CoreError::PageNotFound(page_id.to_string()))?;

        let (leaving, depth) = {
            let mut state = self.inner.state.write();
            let leaving = std::mem::replace(&mut state.current, target.clone());
            state.history.push(leaving.clone());
            (leaving, state.history.len())
        };

        let mut failure = None;
        if let Err(err) = self.set_back_hidden(false) {
            failure.get_or_insert(err);
        }

        let transition = self.inner.transitions.read().resolve(None);
        let leaving_handle =
            self.settle(&*transition, &leaving, Direction::for_hide(false), false, &mut failure);
        let entering_handle =
            self.settle(&*transition, &target, Direction::for_show(false), true, &mut failure);

        if let Some(err) = failure {
            return Err(err);
        }

        tracing::info!(from = %leaving.id, to = %target.id, depth, "Followed link");

        Ok(Navigation {
            from: leaving.id,
            to: target.id,
            leaving: leaving_handle,
            entering: entering_handle,
        })
    }

    /// Return to the most recent page in the history.
    ///
    /// With an empty history this does nothing and returns `Ok(None)`.
    pub fn go_back(&self) -> Result<Option<Navigation>> {
        let (leaving, target, depth) = {
            let mut state = self.inner.state.write();
            let Some(target) = state.history.pop() else {
                tracing::debug!("Back requested with empty history");
                return Ok(None);
            };
            let leaving = std::mem::replace(&mut state.current, target.clone());
            (leaving, target, state.history.len())
        };

        let mut failure = None;
        if depth == 0 {
            if let Err(err) = self.set_back_hidden(true) {
                failure.get_or_insert(err);
            }
        }

        let transition = self.inner.transitions.read().resolve(None);
        let leaving_handle =
            self.settle(&*transition, &leaving, Direction::for_hide(true), false, &mut failure);
        let entering_handle =
            self.settle(&*transition, &target, Direction::for_show(true), true, &mut failure);

        if let Some(err) = failure {
            return Err(err);
        }

        tracing::info!(from = %leaving.id, to = %target.id, depth, "Went back");

        Ok(Some(Navigation {
            from: leaving.id,
            to: target.id,
            leaving: leaving_handle,
            entering: entering_handle,
        }))
    }

    /// Register a transition style; replaces any existing one of that name.
    pub fn register_page_transition<T>(&self, name: impl Into<String>, transition: T)
    where
        T: Transition + 'static,
    {
        self.inner.transitions.write().register(name, transition);
    }

    /// Switch the style used by subsequent navigations.
    pub fn set_transition_style(&self, style: impl Into<String>) {
        let style = style.into();
        tracing::debug!(style = %style, "Transition style changed");
        self.inner.transitions.write().set_default_style(style);
    }

    pub fn transition_style(&self) -> String {
        self.inner.transitions.read().default_style().to_string()
    }

    pub fn current_page(&self) -> Page {
        self.inner.state.read().current.clone()
    }

    /// Page ids in the history, oldest first
    pub fn history(&self) -> Vec<String> {
        self.inner
            .state
            .read()
            .history
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn can_go_back(&self) -> bool {
        !self.inner.state.read().history.is_empty()
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.inner.pages
    }

    pub fn surface(&self) -> &Surface {
        &self.inner.surface
    }

    pub fn document(&self) -> &Arc<dyn Document> {
        &self.inner.document
    }

    pub fn downgrade(&self) -> WeakNavigator {
        WeakNavigator {
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn set_back_hidden(&self, hidden: bool) -> Result<()> {
        let surface = &self.inner.surface;
        if hidden {
            self.inner
                .document
                .add_class(surface.back_control, &surface.hidden_class)?;
        } else {
            self.inner
                .document
                .remove_class(surface.back_control, &surface.hidden_class)?;
        }
        Ok(())
    }

    /// Run `transition` for one page. If it fails, the page is mounted or
    /// unmounted immediately instead so exactly one page stays mounted, and
    /// the first error is kept in `failure`.
    fn settle(
        &self,
        transition: &dyn Transition,
        page: &Page,
        direction: Direction,
        entering: bool,
        failure: &mut Option<CoreError>,
    ) -> TransitionHandle {
        let request = TransitionRequest {
            document: &*self.inner.document,
            container: self.inner.surface.container,
            element: page.element,
            direction,
            entering,
        };

        match transition.run(&request) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(page_id = %page.id, entering, error = %err, "Transition failed, settling page");
                if let Err(fallback_err) = NoneTransition.run(&request) {
                    tracing::warn!(page_id = %page.id, error = %fallback_err, "Failed to settle page");
                }
                failure.get_or_insert(err.into());
                TransitionHandle::completed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagenav_dom::MemoryDocument;

    struct Fixture {
        doc: Arc<MemoryDocument>,
        container: ElementId,
        back: ElementId,
        navigator: Navigator,
    }

    fn fixture(ids: &[&str]) -> Fixture {
        let doc = Arc::new(MemoryDocument::new());
        let container = doc.create_element("div");
        let back = doc.create_element("div");
        doc.append_child(doc.body(), container).unwrap();
        doc.append_child(doc.body(), back).unwrap();

        let pages = PageRegistry::new(ids.iter().map(|id| Page::new(*id, doc.create_element("div"))));
        let first = pages.get(ids[0]).unwrap().element;
        doc.append_child(container, first).unwrap();

        let navigator = Navigator::new(
            doc.clone(),
            Surface::new(container, back),
            pages,
            ids[0],
            TransitionRegistry::with_default_style("none"),
        )
        .unwrap();

        Fixture {
            doc,
            container,
            back,
            navigator,
        }
    }

    #[test]
    fn test_new_hides_back_control() {
        let f = fixture(&["home", "about"]);
        assert!(f.doc.has_class(f.back, "hidden").unwrap());
        assert_eq!(f.navigator.current_page().id, "home");
        assert!(!f.navigator.can_go_back());
    }

    #[test]
    fn test_new_rejects_unknown_initial_page() {
        let doc = Arc::new(MemoryDocument::new());
        let container = doc.create_element("div");
        let back = doc.create_element("div");

        let result = Navigator::new(
            doc,
            Surface::new(container, back),
            PageRegistry::default(),
            "home",
            TransitionRegistry::new(),
        );
        assert!(matches!(result, Err(CoreError::PageNotFound(id)) if id == "home"));
    }

    #[test]
    fn test_follow_link() {
        let f = fixture(&["home", "about"]);

        let nav = f.navigator.follow_link("about").unwrap();
        assert_eq!(nav.from, "home");
        assert_eq!(nav.to, "about");

        assert_eq!(f.navigator.current_page().id, "about");
        assert_eq!(f.navigator.history(), vec!["home".to_string()]);
        assert!(!f.doc.has_class(f.back, "hidden").unwrap());

        let about = f.navigator.pages().get("about").unwrap().element;
        assert_eq!(f.doc.children(f.container).unwrap(), vec![about]);
    }

    #[test]
    fn test_follow_unknown_link_leaves_state() {
        let f = fixture(&["home", "about"]);

        let err = f.navigator.follow_link("missing").unwrap_err();
        assert!(matches!(err, CoreError::PageNotFound(id) if id == "missing"));
        assert_eq!(f.navigator.current_page().id, "home");
        assert!(f.navigator.history().is_empty());
        assert!(f.doc.has_class(f.back, "hidden").unwrap());
    }

    #[test]
    fn test_go_back_on_empty_history_is_noop() {
        let f = fixture(&["home"]);

        assert!(f.navigator.go_back().unwrap().is_none());
        assert_eq!(f.navigator.current_page().id, "home");
        assert!(f.doc.has_class(f.back, "hidden").unwrap());
    }

    #[test]
    fn test_back_control_tracks_history() {
        let f = fixture(&["home", "about", "contact"]);

        f.navigator.follow_link("about").unwrap();
        f.navigator.follow_link("contact").unwrap();
        f.navigator.go_back().unwrap();
        assert!(!f.doc.has_class(f.back, "hidden").unwrap());

        f.navigator.go_back().unwrap();
        assert!(f.doc.has_class(f.back, "hidden").unwrap());
        assert_eq!(f.navigator.current_page().id, "home");
    }

    #[test]
    fn test_transition_style_switch() {
        let f = fixture(&["home", "about"]);
        assert_eq!(f.navigator.transition_style(), "none");

        f.navigator.set_transition_style("swipe");
        assert_eq!(f.navigator.transition_style(), "swipe");

        // Swipe keeps the leaving page mounted until its transition ends
        f.navigator.follow_link("about").unwrap();
        assert_eq!(f.doc.children(f.container).unwrap().len(), 2);
    }

    #[test]
    fn test_weak_navigator() {
        let f = fixture(&["home"]);
        let weak = f.navigator.downgrade();
        assert!(weak.upgrade().is_some());

        drop(f.navigator);
        assert!(weak.upgrade().is_none());
    }
}
