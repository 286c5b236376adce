#![forbid(unsafe_code)]

//! Stagger public facade crate.
//!
//! Re-exports the geometry and layout types and offers a small prelude for
//! hosts that embed a [`StaggerPanel`].

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use stagger_core::geometry::{Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use stagger_layout::{
    Arrangement, DEFAULT_SPACING, LayoutItem, Orientation, Stack, StackConfig,
    StackConfigError, StackMetrics, StaggerPanel, UvPoint, UvSize,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for stagger hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration mutation was rejected.
    Config(StackConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<StackConfigError> for Error {
    fn from(err: StackConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for stagger APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        Error, LayoutItem, Orientation, Rect, Result, Size, StackConfig, StaggerPanel,
    };
}
