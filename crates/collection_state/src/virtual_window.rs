//! Window math for virtualized lists and grids.
//!
//! Items are assumed to share one estimated size along the scroll axis. The window is an inclusive
//! index range widened by `overscan` items on each side.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{config::VirtualListConfig, error::InvalidArgument};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Inclusive range of items to render plus the spacer geometry around it.
pub struct VirtualWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub overscan: usize,
    pub item_count: usize,
    pub item_size: f64,
}

impl VirtualWindow {
    /// A window over zero items.
    pub fn empty(overscan: usize, item_size: f64) -> Self {
        Self {
            start_index: 0,
            end_index: 0,
            overscan,
            item_count: 0,
            item_size,
        }
    }

    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Number of items in the window.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end_index - self.start_index + 1
        }
    }

    /// Rendered indices; empty for an empty window.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let range: RangeInclusive<usize> = if self.is_empty() {
            // An exhausted inclusive range.
            1..=0
        } else {
            self.start_index..=self.end_index
        };
        range
    }

    /// Spacer size before the first rendered item.
    pub fn offset_before(&self) -> f64 {
        self.start_index as f64 * self.item_size
    }

    /// Spacer size after the last rendered item.
    pub fn offset_after(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.item_count - self.end_index - 1) as f64 * self.item_size
    }

    /// Full scrollable extent.
    pub fn total_size(&self) -> f64 {
        self.item_count as f64 * self.item_size
    }
}

fn check_item_size(size: f64) -> Result<(), InvalidArgument> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(InvalidArgument::InvalidItemSize(size))
    }
}

/// Computes the rendered window for a scroll position.
///
/// Negative (overscrolled) offsets and viewports count as zero.
///
/// # Errors
///
/// Returns [`InvalidArgument::InvalidItemSize`] when `item_size` is not a positive finite number.
pub fn compute_window(
    item_count: usize,
    item_size: f64,
    viewport_size: f64,
    scroll_offset: f64,
    overscan: usize,
) -> Result<VirtualWindow, InvalidArgument> {
    check_item_size(item_size)?;
    if item_count == 0 {
        return Ok(VirtualWindow::empty(overscan, item_size));
    }

    let offset = non_negative(scroll_offset);
    let viewport = non_negative(viewport_size);
    let last = item_count - 1;

    let first_visible = (offset / item_size).floor() as usize;
    let start = first_visible.saturating_sub(overscan).min(last);
    let visible = ((viewport / item_size).ceil() as usize).saturating_add(overscan.saturating_mul(2));
    let end = start.saturating_add(visible).min(last);

    Ok(VirtualWindow {
        start_index: start,
        end_index: end,
        overscan,
        item_count,
        item_size,
    })
}

/// [`compute_window`] with sizes taken from a [`VirtualListConfig`].
///
/// # Errors
///
/// See [`compute_window`].
pub fn compute_window_with(
    config: &VirtualListConfig,
    item_count: usize,
    viewport_size: f64,
    scroll_offset: f64,
) -> Result<VirtualWindow, InvalidArgument> {
    compute_window(
        item_count,
        config.estimated_item_size,
        viewport_size,
        scroll_offset,
        config.overscan,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Row window of a grid, expanded to item indices.
pub struct GridWindow {
    pub rows: VirtualWindow,
    pub columns: usize,
    pub item_count: usize,
}

impl GridWindow {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// First rendered item index.
    pub fn start_index(&self) -> usize {
        self.rows.start_index * self.columns
    }

    /// Last rendered item index, clipped to the final partial row.
    pub fn end_index(&self) -> usize {
        ((self.rows.end_index + 1) * self.columns)
            .min(self.item_count)
            .saturating_sub(1)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let range: RangeInclusive<usize> = if self.is_empty() {
            1..=0
        } else {
            self.start_index()..=self.end_index()
        };
        range
    }
}

/// Windows the rows of a grid with `columns` items per row.
///
/// # Errors
///
/// Returns [`InvalidArgument::ZeroColumns`] for `columns == 0`, or
/// [`InvalidArgument::InvalidItemSize`] for a bad `row_size`.
pub fn compute_grid_window(
    item_count: usize,
    columns: usize,
    row_size: f64,
    viewport_size: f64,
    scroll_offset: f64,
    overscan: usize,
) -> Result<GridWindow, InvalidArgument> {
    if columns == 0 {
        return Err(InvalidArgument::ZeroColumns);
    }
    let row_count = item_count.div_ceil(columns);
    let rows = compute_window(row_count, row_size, viewport_size, scroll_offset, overscan)?;
    Ok(GridWindow {
        rows,
        columns,
        item_count,
    })
}

/// Columns that fit in `width`; never less than one.
pub fn columns_for_width(width: f64, item_width: f64) -> usize {
    if !(item_width.is_finite() && item_width > 0.0) || !width.is_finite() {
        return 1;
    }
    ((width / item_width).floor() as usize).max(1)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
