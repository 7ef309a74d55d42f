//! Pages and the page registry

use std::collections::HashMap;

use pagenav_dom::ElementId;

/// A view unit shown exclusively within the container.
///
/// The element belongs to the document; the navigator only refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub element: ElementId,
}

impl Page {
    pub fn new(id: impl Into<String>, element: ElementId) -> Self {
        Self {
            id: id.into(),
            element,
        }
    }
}

/// Pages by id, in discovery order. Fixed once built.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl PageRegistry {
    /// Build from pages in document order. A repeated id replaces the
    /// earlier page in place.
    pub fn new(pages: impl IntoIterator<Item = Page>) -> Self {
        let mut registry = Self::default();
        for page in pages {
            match registry.index.get(&page.id) {
                Some(&position) => {
                    tracing::warn!(page_id = %page.id, "Duplicate page id, keeping the later element");
                    registry.pages[position] = page;
                }
                None => {
                    registry.index.insert(page.id.clone(), registry.pages.len());
                    registry.pages.push(page);
                }
            }
        }
        registry
    }

    pub fn get(&self, id: &str) -> Option<&Page> {
        self.index.get(id).map(|&position| &self.pages[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
