//! Transition error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The transition was dropped before it signalled completion, e.g. its
    /// transition-end listener was removed by the host.
    #[error("Transition abandoned before completion")]
    Abandoned,

    #[error("Document error: {0}")]
    Dom(#[from] pagenav_dom::DomError),
}
