#![forbid(unsafe_code)]

//! Staggered stack layout.
//!
//! Items are distributed over parallel stacks (rows when horizontal, columns
//! when vertical). Each item goes to the currently shortest stack, so stacks
//! stay balanced as items arrive, the way a masonry wall is built.
//!
//! - [`Orientation`], [`UvSize`], [`UvPoint`] - orientation-relative geometry
//! - [`StackConfig`] - stack count / stack width / spacing, mutually validated
//! - [`StackMetrics`] - stack-count derivation and exact stack extent
//! - [`balancer`] - greedy partition and rectangle placement
//! - [`StaggerPanel`] - the measure/arrange protocol for [`LayoutItem`]s
//!
//! # Two-phase layout
//!
//! ```
//! use std::num::NonZeroUsize;
//! use stagger_core::geometry::{Rect, Size};
//! use stagger_layout::{Arrangement, StackConfig};
//!
//! let config = StackConfig::new().with_stack_count(NonZeroUsize::new(2)).unwrap();
//! let desired = [Size::new(50.0, 0.0), Size::new(30.0, 0.0), Size::new(40.0, 0.0)];
//! let arrangement = Arrangement::compute(&config, Size::new(300.0, 100.0), &desired);
//!
//! assert_eq!(arrangement.metrics.item_v, 46.0);
//! assert_eq!(arrangement.rects[0], Rect::new(0.0, 0.0, 50.0, 46.0));
//! ```

pub mod axis;
pub mod balancer;
pub mod config;
pub mod metrics;
pub mod panel;

pub use axis::{Orientation, UvPoint, UvSize};
pub use balancer::{Arrangement, Selector, Stack};
pub use config::{DEFAULT_SPACING, StackConfig, StackConfigError};
pub use metrics::{MAX_STACK_COUNT, STACK_COUNT_BIAS, StackMetrics};
pub use panel::{LayoutItem, StaggerPanel};
pub use stagger_core::geometry::{Point, Rect, Size};
