#![forbid(unsafe_code)]

//! Stack-count derivation and per-stack V extent.
//!
//! Measurement and arrangement size stacks differently. Measurement only needs
//! a bound to hand to each item and ignores spacing. Arrangement derives the
//! number of stacks that fit, then recomputes the extent from that count so
//! the stacks tile V exactly:
//!
//! ```text
//! count * item_v + (count - 1) * spacing == v
//! ```

use crate::config::StackConfig;

/// Bias added before truncating the stack-count quotient. Absorbs division
/// error when the quotient lands just below an integer.
pub const STACK_COUNT_BIAS: f64 = 1.1;

/// Upper bound on the derived stack count.
pub const MAX_STACK_COUNT: usize = 1 << 16;

/// Resolved stack geometry for one arrangement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackMetrics {
    /// Number of stacks, always `>= 1`.
    pub stack_count: usize,
    /// Extent of every stack along V.
    pub item_v: f64,
    /// Gap between stacks and between items in a stack.
    pub spacing: f64,
}

impl StackMetrics {
    /// Derive the stack count and exact stack extent for a final V extent.
    ///
    /// An explicit stack count is used as given. Only counts derived from
    /// geometry are bounded by [`MAX_STACK_COUNT`].
    pub fn resolve(config: &StackConfig, v: f64) -> Self {
        let spacing = config.spacing();
        let stack_count = match config.stack_count() {
            Some(count) => count.get(),
            None => derive_stack_count(v, provisional_item_v(config, v), spacing),
        };
        Self {
            stack_count,
            item_v: tiled_item_v(v, stack_count, spacing),
            spacing,
        }
    }

    /// V offset of the stack at `index`.
    #[inline]
    pub fn stack_offset(&self, index: usize) -> f64 {
        index as f64 * (self.item_v + self.spacing)
    }

    /// Total V covered by all stacks and the gaps between them.
    pub fn covered_v(&self) -> f64 {
        let n = self.stack_count as f64;
        n * self.item_v + (n - 1.0) * self.spacing
    }
}

/// Cross-axis bound handed to every item during measurement.
pub fn measure_item_v(config: &StackConfig, v: f64) -> f64 {
    if let Some(width) = config.stack_width() {
        width
    } else if let Some(count) = config.stack_count() {
        v / count.get() as f64
    } else {
        v
    }
}

/// First estimate of the stack extent, before the count is derived.
pub fn provisional_item_v(config: &StackConfig, v: f64) -> f64 {
    if let Some(width) = config.stack_width() {
        width
    } else if let Some(count) = config.stack_count() {
        tiled_item_v(v, count.get(), config.spacing())
    } else {
        v
    }
}

/// Number of stacks of extent `item_v` that fit in `v`.
///
/// Never less than 1 and never more than [`MAX_STACK_COUNT`]. Degenerate
/// inputs (non-positive step, NaN) yield a single stack.
pub fn derive_stack_count(v: f64, item_v: f64, spacing: f64) -> usize {
    let step = item_v + spacing;
    if !(step > 0.0) {
        return 1;
    }
    let raw = STACK_COUNT_BIAS + (v - item_v) / step;
    if raw.is_nan() {
        return 1;
    }
    // Float-to-int casts truncate and saturate.
    (raw as usize).clamp(1, MAX_STACK_COUNT)
}

/// Extent of each of `count` stacks that exactly tile `v` with `spacing` gaps.
#[inline]
pub fn tiled_item_v(v: f64, count: usize, spacing: f64) -> f64 {
    let n = count.max(1) as f64;
    (v - (n - 1.0) * spacing) / n
}
