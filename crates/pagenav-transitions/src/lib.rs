//! PageNav Transitions
//!
//! Decouples navigation from animation mechanics. A transition is a named
//! strategy that mounts or unmounts one page element and reports when its
//! visual work is done:
//! - `none`: mount/unmount immediately
//! - `swipe`: slide in/out, finished on the element's transition end
//!
//! ```text
//! Navigator → TransitionRegistry::resolve(style) → Transition::run(request)
//!           → TransitionHandle (await for completion, or ignore)
//! ```

mod builtin;
mod direction;
mod error;
mod handle;
mod registry;

pub use builtin::{classes, NoneTransition, SwipeTransition};
pub use direction::Direction;
pub use error::TransitionError;
pub use handle::{TransitionHandle, TransitionSignal};
pub use registry::{
    Transition, TransitionRegistry, TransitionRequest, DEFAULT_STYLE, FALLBACK_STYLE,
};

pub type Result<T> = std::result::Result<T, TransitionError>;
