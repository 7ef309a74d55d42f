//! Built-in transition strategies

use pagenav_dom::{subscribe_once, Document, ElementId, EventKind, EventTarget};

use crate::direction::Direction;
use crate::handle::TransitionHandle;
use crate::registry::{Transition, TransitionRequest};

/// Class names the built-in strategies toggle
pub mod classes {
    /// Present while a slide animation is running
    pub const SLIDE: &str = "slide";
    /// Marks the page that finished sliding in
    pub const CURRENT_VIEW: &str = "current-view";
}

/// Mount or unmount immediately, without any intermediate state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneTransition;

impl Transition for NoneTransition {
    fn run(&self, request: &TransitionRequest<'_>) -> pagenav_dom::Result<TransitionHandle> {
        if request.entering {
            request
                .document
                .append_child(request.container, request.element)?;
        } else {
            request.document.detach(request.element)?;
        }
        Ok(TransitionHandle::completed())
    }
}

/// Slide the page in or out, finishing on the element's transition end.
///
/// Entering: the page is mounted offset in `direction`, a reflow is forced,
/// then the offset class is removed so the engine animates it into place.
/// Leaving: the offset class is added so the page animates out, and it is
/// unmounted once the transition ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTransition;

impl Transition for SwipeTransition {
    fn run(&self, request: &TransitionRequest<'_>) -> pagenav_dom::Result<TransitionHandle> {
        let document = request.document;
        let element = request.element;
        let direction = request.direction;
        let entering = request.entering;

        document.add_class(element, classes::SLIDE)?;
        if entering {
            document.add_class(element, direction.as_class())?;
            document.append_child(request.container, element)?;
        }

        let (handle, signal) = TransitionHandle::pending();
        subscribe_once(
            document,
            EventTarget::Element(element),
            EventKind::TransitionEnd,
            move |document, _| {
                if let Err(err) = finish_slide(document, element, direction, entering) {
                    tracing::warn!(element = %element, error = %err, "Failed to finish slide");
                }
                signal.finish();
            },
        );

        document.force_reflow(element)?;
        if entering {
            document.remove_class(element, direction.as_class())?;
        } else {
            document.add_class(element, direction.as_class())?;
        }

        Ok(handle)
    }
}

fn finish_slide(
    document: &dyn Document,
    element: ElementId,
    direction: Direction,
    entering: bool,
) -> pagenav_dom::Result<()> {
    document.remove_class(element, classes::SLIDE)?;
    document.remove_class(element, direction.as_class())?;
    if entering {
        document.add_class(element, classes::CURRENT_VIEW)?;
    } else {
        document.remove_class(element, classes::CURRENT_VIEW)?;
        document.detach(element)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagenav_dom::{Event, MemoryDocument};

    fn setup() -> (MemoryDocument, ElementId, ElementId) {
        let doc = MemoryDocument::new();
        let container = doc.create_element("div");
        let page = doc.create_element("section");
        doc.append_child(doc.body(), container).unwrap();
        (doc, container, page)
    }

    fn request(
        doc: &MemoryDocument,
        container: ElementId,
        element: ElementId,
        direction: Direction,
        entering: bool,
    ) -> TransitionRequest<'_> {
        TransitionRequest {
            document: doc,
            container,
            element,
            direction,
            entering,
        }
    }

    #[test]
    fn test_none_mounts_and_unmounts() {
        let (doc, container, page) = setup();

        let mut shown = NoneTransition
            .run(&request(&doc, container, page, Direction::GoRight, true))
            .unwrap();
        assert!(shown.is_finished());
        assert_eq!(doc.children(container).unwrap(), vec![page]);
        assert!(doc.classes(page).unwrap().is_empty());

        let mut hidden = NoneTransition
            .run(&request(&doc, container, page, Direction::GoLeft, false))
            .unwrap();
        assert!(hidden.is_finished());
        assert!(doc.children(container).unwrap().is_empty());
    }

    #[test]
    fn test_swipe_enter() {
        let (doc, container, page) = setup();

        let mut handle = SwipeTransition
            .run(&request(&doc, container, page, Direction::GoRight, true))
            .unwrap();

        // Mounted and sliding, offset class already released
        assert_eq!(doc.children(container).unwrap(), vec![page]);
        assert_eq!(doc.reflow_count(page).unwrap(), 1);
        assert!(doc.has_class(page, classes::SLIDE).unwrap());
        assert!(!doc.has_class(page, "go-right").unwrap());
        assert!(!handle.is_finished());

        doc.dispatch(&Event::transition_end(page)).unwrap();

        assert!(handle.is_finished());
        assert_eq!(
            doc.classes(page).unwrap(),
            vec![classes::CURRENT_VIEW.to_string()]
        );
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn test_swipe_leave() {
        let (doc, container, page) = setup();
        doc.append_child(container, page).unwrap();
        doc.add_class(page, classes::CURRENT_VIEW).unwrap();

        let mut handle = SwipeTransition
            .run(&request(&doc, container, page, Direction::GoLeft, false))
            .unwrap();

        // Still mounted while animating out
        assert_eq!(doc.children(container).unwrap(), vec![page]);
        assert!(doc.has_class(page, classes::SLIDE).unwrap());
        assert!(doc.has_class(page, "go-left").unwrap());

        doc.dispatch(&Event::transition_end(page)).unwrap();

        assert!(handle.is_finished());
        assert!(doc.children(container).unwrap().is_empty());
        assert!(doc.classes(page).unwrap().is_empty());
    }

    #[test]
    fn test_swipe_finishes_once() {
        let (doc, container, page) = setup();

        SwipeTransition
            .run(&request(&doc, container, page, Direction::GoRight, true))
            .unwrap();
        doc.dispatch(&Event::transition_end(page)).unwrap();

        // A later slide-out sets up its own listener; the old one is gone
        doc.add_class(page, "marker").unwrap();
        doc.dispatch(&Event::transition_end(page)).unwrap();
        assert!(doc.has_class(page, "marker").unwrap());
        assert!(doc.has_class(page, classes::CURRENT_VIEW).unwrap());
    }

    #[tokio::test]
    async fn test_swipe_handle_can_be_awaited() {
        let (doc, container, page) = setup();

        let handle = SwipeTransition
            .run(&request(&doc, container, page, Direction::GoLeft, true))
            .unwrap();
        doc.dispatch(&Event::transition_end(page)).unwrap();

        handle.wait().await.unwrap();
        assert!(doc.has_class(page, classes::CURRENT_VIEW).unwrap());
    }
}
