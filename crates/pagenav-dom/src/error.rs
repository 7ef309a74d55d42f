//! Document error types

use thiserror::Error;

use crate::document::ElementId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    #[error("Cannot insert {child} into {parent}: would create a cycle")]
    HierarchyCycle { parent: ElementId, child: ElementId },
}
