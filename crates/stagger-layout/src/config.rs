#![forbid(unsafe_code)]

//! Panel configuration and its single validation rule.
//!
//! A panel is sized along V either by a fixed number of stacks or by a fixed
//! stack extent, never both. Neither means one stack spanning all of V.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::axis::Orientation;

/// Gap between adjacent stacks and between adjacent items in a stack.
pub const DEFAULT_SPACING: f64 = 8.0;

/// Orientation, stack sizing and spacing for a staggered panel.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use stagger_layout::{Orientation, StackConfig};
///
/// let config = StackConfig::new()
///     .with_orientation(Orientation::Vertical)
///     .with_stack_count(NonZeroUsize::new(3))
///     .expect("no stack width set");
///
/// assert_eq!(config.stack_count().map(NonZeroUsize::get), Some(3));
/// assert!(config.with_stack_width(Some(120.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStackConfig")]
pub struct StackConfig {
    orientation: Orientation,
    stack_count: Option<NonZeroUsize>,
    stack_width: Option<f64>,
    spacing: f64,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            stack_count: None,
            stack_width: None,
            spacing: DEFAULT_SPACING,
        }
    }
}

impl StackConfig {
    /// Horizontal, one stack, default spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the spacing. Negative or NaN values become `0.0`.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.set_spacing(spacing);
        self
    }

    /// Set or clear the fixed stack count.
    pub fn with_stack_count(
        mut self,
        stack_count: Option<NonZeroUsize>,
    ) -> Result<Self, StackConfigError> {
        self.set_stack_count(stack_count)?;
        Ok(self)
    }

    /// Set or clear the fixed stack extent along V.
    pub fn with_stack_width(mut self, stack_width: Option<f64>) -> Result<Self, StackConfigError> {
        self.set_stack_width(stack_width)?;
        Ok(self)
    }

    #[inline]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub const fn stack_count(&self) -> Option<NonZeroUsize> {
        self.stack_count
    }

    #[inline]
    pub const fn stack_width(&self) -> Option<f64> {
        self.stack_width
    }

    #[inline]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        self.spacing = if spacing > 0.0 { spacing } else { 0.0 };
    }

    /// Set or clear the fixed stack count.
    ///
    /// Fails without modifying `self` if a stack width is set.
    pub fn set_stack_count(
        &mut self,
        stack_count: Option<NonZeroUsize>,
    ) -> Result<(), StackConfigError> {
        if let (Some(stack_count), Some(stack_width)) = (stack_count, self.stack_width) {
            return Err(StackConfigError::ConfigurationConflict {
                stack_count,
                stack_width,
            });
        }
        self.stack_count = stack_count;
        Ok(())
    }

    /// Set or clear the fixed stack extent along V.
    ///
    /// Fails without modifying `self` if a stack count is set.
    pub fn set_stack_width(&mut self, stack_width: Option<f64>) -> Result<(), StackConfigError> {
        if let (Some(stack_width), Some(stack_count)) = (stack_width, self.stack_count) {
            return Err(StackConfigError::ConfigurationConflict {
                stack_count,
                stack_width,
            });
        }
        self.stack_width = stack_width;
        Ok(())
    }
}

/// Rejected configuration mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StackConfigError {
    /// Stack count and stack width would both be set.
    ConfigurationConflict {
        stack_count: NonZeroUsize,
        stack_width: f64,
    },
}

impl fmt::Display for StackConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationConflict {
                stack_count,
                stack_width,
            } => write!(
                f,
                "stack count ({stack_count}) and stack width ({stack_width}) are mutually exclusive; clear one before setting the other"
            ),
        }
    }
}

impl std::error::Error for StackConfigError {}

#[derive(Deserialize)]
#[serde(default)]
struct RawStackConfig {
    orientation: Orientation,
    stack_count: Option<NonZeroUsize>,
    stack_width: Option<f64>,
    spacing: f64,
}

impl Default for RawStackConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            stack_count: None,
            stack_width: None,
            spacing: DEFAULT_SPACING,
        }
    }
}

impl TryFrom<RawStackConfig> for StackConfig {
    type Error = StackConfigError;

    fn try_from(raw: RawStackConfig) -> Result<Self, Self::Error> {
        StackConfig::new()
            .with_orientation(raw.orientation)
            .with_spacing(raw.spacing)
            .with_stack_count(raw.stack_count)?
            .with_stack_width(raw.stack_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> Option<NonZeroUsize> {
        NonZeroUsize::new(n)
    }

    #[test]
    fn default_is_single_horizontal_stack() {
        let config = StackConfig::default();
        assert_eq!(config.orientation(), Orientation::Horizontal);
        assert_eq!(config.stack_count(), None);
        assert_eq!(config.stack_width(), None);
        assert_eq!(config.spacing(), DEFAULT_SPACING);
    }

    #[test]
    fn width_then_count_conflicts() {
        let mut config = StackConfig::new();
        config.set_stack_width(Some(100.0)).expect("width alone is fine");
        let err = config.set_stack_count(count(2)).unwrap_err();
        assert!(matches!(
            err,
            StackConfigError::ConfigurationConflict { stack_width, .. } if stack_width == 100.0
        ));
        assert_eq!(config.stack_width(), Some(100.0));
        assert_eq!(config.stack_count(), None);
    }

    #[test]
    fn count_then_width_conflicts() {
        let mut config = StackConfig::new();
        config.set_stack_count(count(3)).expect("count alone is fine");
        assert!(config.set_stack_width(Some(50.0)).is_err());
        assert_eq!(config.stack_count(), count(3));
        assert_eq!(config.stack_width(), None);
    }

    #[test]
    fn clearing_first_allows_switching() {
        let mut config = StackConfig::new();
        config.set_stack_count(count(3)).expect("set count");
        config.set_stack_count(None).expect("clear count");
        config.set_stack_width(Some(50.0)).expect("set width");
        config.set_stack_width(None).expect("clear width");
        config.set_stack_count(count(4)).expect("set count again");
        assert_eq!(config.stack_count(), count(4));
    }

    #[test]
    fn clearing_never_conflicts() {
        let mut config = StackConfig::new().with_stack_count(count(2)).expect("count");
        config.set_stack_width(None).expect("clearing the unset width is fine");
        assert_eq!(config.stack_count(), count(2));
    }

    #[test]
    fn negative_and_nan_spacing_clamp_to_zero() {
        assert_eq!(StackConfig::new().with_spacing(-4.0).spacing(), 0.0);
        assert_eq!(StackConfig::new().with_spacing(f64::NAN).spacing(), 0.0);
        assert_eq!(StackConfig::new().with_spacing(2.5).spacing(), 2.5);
    }

    #[test]
    fn error_message_names_both_values() {
        let err = StackConfigError::ConfigurationConflict {
            stack_count: NonZeroUsize::MIN,
            stack_width: 64.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("stack count (1)"));
        assert!(msg.contains("stack width (64)"));
    }

    #[test]
    fn deserialize_fills_defaults() {
        let config: StackConfig =
            serde_json::from_str(r#"{"orientation":"vertical","stack_count":4}"#)
                .expect("valid config");
        assert_eq!(config.orientation(), Orientation::Vertical);
        assert_eq!(config.stack_count(), count(4));
        assert_eq!(config.spacing(), DEFAULT_SPACING);
    }

    #[test]
    fn deserialize_rejects_conflict() {
        let result: Result<StackConfig, _> =
            serde_json::from_str(r#"{"stack_count":2,"stack_width":40.0}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn deserialize_rejects_zero_count() {
        let result: Result<StackConfig, _> = serde_json::from_str(r#"{"stack_count":0}"#);
        assert!(result.is_err());
    }
}
