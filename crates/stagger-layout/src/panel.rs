#![forbid(unsafe_code)]

//! Host-facing panel: the measure/arrange protocol.
//!
//! The host owns the items and the layout loop. Each pass it calls
//! [`StaggerPanel::measure`] with the available size, then
//! [`StaggerPanel::arrange`] with the final size. Configuration changes and
//! [`StaggerPanel::invalidate`] mark both phases dirty so the host knows a
//! new pass is due.

use std::num::NonZeroUsize;

use stagger_core::geometry::{Rect, Size};

use crate::axis::{Orientation, UvSize};
use crate::balancer::Arrangement;
use crate::config::{StackConfig, StackConfigError};
use crate::metrics::measure_item_v;

/// What the panel needs from a layout participant.
pub trait LayoutItem {
    /// Measure against `available` and record the result as the desired size.
    fn measure(&mut self, available: Size) -> Size;

    /// Size recorded by the last [`measure`](Self::measure) call.
    fn desired_size(&self) -> Size;

    /// Receive the final rectangle for this pass.
    fn arrange(&mut self, rect: Rect);
}

impl<T: LayoutItem + ?Sized> LayoutItem for Box<T> {
    fn measure(&mut self, available: Size) -> Size {
        (**self).measure(available)
    }

    fn desired_size(&self) -> Size {
        (**self).desired_size()
    }

    fn arrange(&mut self, rect: Rect) {
        (**self).arrange(rect)
    }
}

/// Dirty flags and the inputs of the last completed passes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutState {
    generation: u64,
    measure_dirty: bool,
    arrange_dirty: bool,
    last_constraint: Option<Size>,
    last_final_size: Option<Size>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            generation: 0,
            measure_dirty: true,
            arrange_dirty: true,
            last_constraint: None,
            last_final_size: None,
        }
    }
}

impl LayoutState {
    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.measure_dirty = true;
        self.arrange_dirty = true;
    }
}

/// A panel that balances items across parallel stacks.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use stagger_core::geometry::{Rect, Size};
/// use stagger_layout::{LayoutItem, StaggerPanel};
///
/// struct Tile { natural: Size, desired: Size, rect: Rect }
///
/// impl LayoutItem for Tile {
///     fn measure(&mut self, available: Size) -> Size {
///         self.desired = Size::new(self.natural.width.min(available.width), available.height);
///         self.desired
///     }
///     fn desired_size(&self) -> Size { self.desired }
///     fn arrange(&mut self, rect: Rect) { self.rect = rect; }
/// }
///
/// let mut tiles: Vec<Tile> = [50.0, 30.0, 40.0]
///     .into_iter()
///     .map(|w| Tile { natural: Size::new(w, 0.0), desired: Size::ZERO, rect: Rect::default() })
///     .collect();
///
/// let mut panel = StaggerPanel::default();
/// panel.set_stack_count(NonZeroUsize::new(2)).unwrap();
/// panel.measure(Size::new(f64::INFINITY, 100.0), &mut tiles);
/// panel.arrange(Size::new(500.0, 100.0), &mut tiles);
///
/// assert_eq!(tiles[1].rect, Rect::new(0.0, 54.0, 30.0, 46.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaggerPanel {
    config: StackConfig,
    state: LayoutState,
    last_arrangement: Option<Arrangement>,
}

impl StaggerPanel {
    pub fn new(config: StackConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.config.orientation()
    }

    #[inline]
    pub fn stack_count(&self) -> Option<NonZeroUsize> {
        self.config.stack_count()
    }

    #[inline]
    pub fn stack_width(&self) -> Option<f64> {
        self.config.stack_width()
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.config.spacing()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        let mut next = self.config;
        next.set_orientation(orientation);
        self.replace_config(next);
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        let mut next = self.config;
        next.set_spacing(spacing);
        self.replace_config(next);
    }

    /// Set or clear the fixed stack count.
    ///
    /// Rejected, leaving the panel untouched, while a stack width is set.
    pub fn set_stack_count(
        &mut self,
        stack_count: Option<NonZeroUsize>,
    ) -> Result<(), StackConfigError> {
        let mut next = self.config;
        if let Err(err) = next.set_stack_count(stack_count) {
            stagger_core::warn!(%err, "stack count rejected");
            return Err(err);
        }
        self.replace_config(next);
        Ok(())
    }

    /// Set or clear the fixed stack extent along V.
    ///
    /// Rejected, leaving the panel untouched, while a stack count is set.
    pub fn set_stack_width(&mut self, stack_width: Option<f64>) -> Result<(), StackConfigError> {
        let mut next = self.config;
        if let Err(err) = next.set_stack_width(stack_width) {
            stagger_core::warn!(%err, "stack width rejected");
            return Err(err);
        }
        self.replace_config(next);
        Ok(())
    }

    /// Swap in a whole configuration at once.
    pub fn set_config(&mut self, config: StackConfig) {
        self.replace_config(config);
    }

    fn replace_config(&mut self, config: StackConfig) {
        if config != self.config {
            self.config = config;
            self.state.invalidate();
        }
    }

    /// Mark both phases dirty. Call after adding, removing or reordering
    /// items, or after an item's content changes.
    pub fn invalidate(&mut self) {
        self.state.invalidate();
    }

    /// Counter bumped by every effective configuration change and
    /// [`invalidate`](Self::invalidate).
    #[inline]
    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    /// Whether a measure pass with `constraint` would differ from the last one.
    pub fn needs_measure(&self, constraint: Size) -> bool {
        self.state.measure_dirty || self.state.last_constraint != Some(constraint)
    }

    /// Whether an arrange pass with `final_size` would differ from the last one.
    pub fn needs_arrange(&self, final_size: Size) -> bool {
        self.state.arrange_dirty || self.state.last_final_size != Some(final_size)
    }

    /// Result of the most recent [`arrange`](Self::arrange).
    pub fn last_arrangement(&self) -> Option<&Arrangement> {
        self.last_arrangement.as_ref()
    }

    /// Size each item would be measured at under `constraint`.
    pub fn item_constraint(&self, constraint: Size) -> Size {
        let orientation = self.config.orientation();
        let bounds = UvSize::from_size(orientation, constraint);
        let item_v = measure_item_v(&self.config, bounds.v);
        UvSize::from_uv(orientation, bounds.u, item_v).to_size()
    }

    /// Measure every item once and return `constraint` unchanged.
    pub fn measure<T: LayoutItem>(&mut self, constraint: Size, items: &mut [T]) -> Size {
        let span = stagger_core::debug_span!(
            "stagger_measure",
            items = items.len(),
            w = constraint.width,
            h = constraint.height
        );
        let _guard = span.enter();

        let available = self.item_constraint(constraint);
        for item in items.iter_mut() {
            item.measure(available);
        }
        stagger_core::debug!(
            width = available.width,
            height = available.height,
            "measured items"
        );

        self.state.measure_dirty = false;
        self.state.arrange_dirty = true;
        self.state.last_constraint = Some(constraint);
        constraint
    }

    /// Place every item inside `final_size` and return it unchanged.
    pub fn arrange<T: LayoutItem>(&mut self, final_size: Size, items: &mut [T]) -> Size {
        let span = stagger_core::debug_span!(
            "stagger_arrange",
            items = items.len(),
            w = final_size.width,
            h = final_size.height
        );
        let _guard = span.enter();

        let desired: Vec<Size> = items.iter().map(|item| item.desired_size()).collect();
        let arrangement = Arrangement::compute(&self.config, final_size, &desired);
        stagger_core::debug!(
            stacks = arrangement.metrics.stack_count,
            item_v = arrangement.metrics.item_v,
            "derived stack layout"
        );

        for (item, rect) in items.iter_mut().zip(&arrangement.rects) {
            item.arrange(*rect);
        }

        self.state.arrange_dirty = false;
        self.state.last_final_size = Some(final_size);
        self.last_arrangement = Some(arrangement);
        final_size
    }
}
