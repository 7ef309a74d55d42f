//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("No current view: {0}")]
    NoCurrentView(String),

    #[error("Document error: {0}")]
    Dom(#[from] pagenav_dom::DomError),

    #[error("Transition error: {0}")]
    Transition(#[from] pagenav_transitions::TransitionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
