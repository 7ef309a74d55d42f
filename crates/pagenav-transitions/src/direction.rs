//! Slide direction tokens

use serde::{Deserialize, Serialize};

/// Opaque direction marker handed to every transition.
///
/// Forward navigation hides toward the left and shows from the right;
/// backward navigation mirrors both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    GoLeft,
    GoRight,
}

impl Direction {
    /// Direction for the page being shown
    pub fn for_show(back: bool) -> Self {
        if back {
            Direction::GoLeft
        } else {
            Direction::GoRight
        }
    }

    /// Direction for the page being hidden
    pub fn for_hide(back: bool) -> Self {
        if back {
            Direction::GoRight
        } else {
            Direction::GoLeft
        }
    }

    /// CSS class carrying the direction
    pub fn as_class(&self) -> &'static str {
        match self {
            Direction::GoLeft => "go-left",
            Direction::GoRight => "go-right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_class())
    }
}
