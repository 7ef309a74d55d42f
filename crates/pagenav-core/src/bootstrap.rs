//! Document bootstrap
//!
//! Turns a loaded document into a running navigator:
//! 1. resolve the container and back control by id
//! 2. scan page elements, normalizing pages that start hidden
//! 3. build the [`Navigator`] with the configured transition style
//! 4. route link clicks to `follow_link` and back clicks to `go_back`

use std::sync::Arc;

use pagenav_dom::{Document, ElementId, Event, EventKind, EventTarget, ListenerId};
use pagenav_transitions::TransitionRegistry;

use crate::config::NavigatorConfig;
use crate::error::CoreError;
use crate::navigator::{Navigator, Surface, WeakNavigator};
use crate::page::{Page, PageRegistry};
use crate::Result;

/// Placeholder link value that never counts as a destination
const EMPTY_LINK: &str = "#.html";

#[derive(Debug, Clone)]
pub struct ScannedPages {
    pub pages: PageRegistry,
    /// Page carrying the current-view class
    pub current: Page,
}

/// Collect every page element in document order.
///
/// Pages marked hidden lose the marker and are detached, so only the current
/// page stays mounted. Elements without an `id` cannot be navigated to and
/// are skipped.
pub fn scan_pages(document: &dyn Document, config: &NavigatorConfig) -> Result<ScannedPages> {
    let mut found = Vec::new();

    for element in document.elements_by_class(&config.page_class) {
        if document.has_class(element, &config.hidden_class)? {
            document.remove_class(element, &config.hidden_class)?;
            document.detach(element)?;
        }

        match document.attribute(element, "id")? {
            Some(id) if !id.is_empty() => found.push(Page::new(id, element)),
            _ => tracing::warn!(element = %element, "Skipping page without id"),
        }
    }

    let pages = PageRegistry::new(found);

    let current_element = document
        .first_by_class(&config.current_class)
        .ok_or_else(|| CoreError::NoCurrentView(config.current_class.clone()))?;
    let current = pages
        .iter()
        .find(|p| p.element == current_element)
        .cloned()
        .ok_or_else(|| {
            CoreError::NoCurrentView(format!(
                "element {} is not a page",
                current_element
            ))
        })?;

    tracing::debug!(pages = ?pages.ids(), current = %current.id, "Scanned pages");

    Ok(ScannedPages { pages, current })
}

/// Destination page id of a click on `element`, looked up on the element
/// and its ancestors.
pub fn link_target(
    document: &dyn Document,
    element: ElementId,
    attribute: &str,
) -> Result<Option<String>> {
    Ok(document.closest_attribute(element, attribute, &|value: &str| {
        !value.is_empty() && value != EMPTY_LINK
    })?)
}

/// A navigator bound to a document's click events.
///
/// Dropping it removes the listeners; navigator clones obtained through
/// [`navigator`](Self::navigator) keep working for programmatic use.
pub struct PageNav {
    navigator: Navigator,
    listeners: Vec<ListenerId>,
}

impl PageNav {
    pub fn attach(document: Arc<dyn Document>, config: &NavigatorConfig) -> Result<Self> {
        config.validate()?;

        let container = find_element(&*document, &config.container)?;
        let back_control = find_element(&*document, &config.back_control)?;
        let scanned = scan_pages(&*document, config)?;

        let surface = Surface {
            container,
            back_control,
            hidden_class: config.hidden_class.clone(),
        };
        let navigator = Navigator::new(
            Arc::clone(&document),
            surface,
            scanned.pages,
            &scanned.current.id,
            TransitionRegistry::with_default_style(config.transition_style()),
        )?;

        let listeners = vec![
            install_link_listener(&*document, navigator.downgrade(), &config.link_attribute),
            install_back_listener(&*document, navigator.downgrade(), back_control),
        ];

        tracing::info!(
            container = %config.container,
            back_control = %config.back_control,
            "Page navigation attached"
        );

        Ok(Self {
            navigator,
            listeners,
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Remove the click listeners.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for PageNav {
    fn drop(&mut self) {
        let document = self.navigator.document();
        for id in self.listeners.drain(..) {
            document.unsubscribe(id);
        }
        tracing::debug!("Page navigation detached");
    }
}

fn find_element(document: &dyn Document, id: &str) -> Result<ElementId> {
    document
        .element_by_id(id)
        .ok_or_else(|| CoreError::ElementNotFound(id.to_string()))
}

fn install_link_listener(
    document: &dyn Document,
    navigator: WeakNavigator,
    attribute: &str,
) -> ListenerId {
    let attribute = attribute.to_string();
    document.subscribe(
        EventTarget::Document,
        EventKind::Click,
        Arc::new(move |document: &dyn Document, event: &Event| {
            let Some(navigator) = navigator.upgrade() else {
                return;
            };
            let page_id = match link_target(document, event.target, &attribute) {
                Ok(Some(page_id)) => page_id,
                Ok(None) => return,
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to read link target");
                    return;
                }
            };

            event.prevent_default();
            if let Err(err) = navigator.follow_link(&page_id) {
                tracing::warn!(page_id = %page_id, error = %err, "Link navigation failed");
            }
        }),
    )
}

fn install_back_listener(
    document: &dyn Document,
    navigator: WeakNavigator,
    back_control: ElementId,
) -> ListenerId {
    document.subscribe(
        EventTarget::Element(back_control),
        EventKind::Click,
        Arc::new(move |document: &dyn Document, event: &Event| {
            let Some(navigator) = navigator.upgrade() else {
                return;
            };
            // Only the anchor inside the back control navigates
            match document.node_name(event.target) {
                Ok(name) if name == "A" => {}
                _ => return,
            }

            if let Err(err) = navigator.go_back() {
                tracing::warn!(error = %err, "Back navigation failed");
            }
        }),
    )
}
