//! `use_virtual_list` / `use_virtual_grid`: windowed rendering driven by scroll signals.

use collection_host_web::ScrollMetrics;
use collection_state::{
    columns_for_width, compute_grid_window, compute_window_with, config::DEFAULT_ITEM_SIZE,
    GridWindow, VirtualListConfig, VirtualWindow,
};
use leptos::*;

fn checked_config(config: VirtualListConfig) -> VirtualListConfig {
    let size = config.estimated_item_size;
    if size.is_finite() && size > 0.0 {
        return config;
    }
    logging::warn!("virtual list item size {size} rejected; using {DEFAULT_ITEM_SIZE}");
    VirtualListConfig {
        estimated_item_size: DEFAULT_ITEM_SIZE,
        ..config
    }
}

#[derive(Clone, Copy)]
/// Handle returned by [`use_virtual_list`].
pub struct VirtualListHandle {
    pub scroll_offset: RwSignal<f64>,
    pub viewport_size: RwSignal<f64>,
    /// Window recomputed whenever the item count, offset, or viewport changes.
    pub window: Signal<VirtualWindow>,
}

/// Windows `item_count` items of uniform estimated size.
///
/// A non-positive or non-finite item size is logged and replaced by the default.
pub fn use_virtual_list(
    config: VirtualListConfig,
    item_count: Signal<usize>,
) -> VirtualListHandle {
    let config = checked_config(config);
    let scroll_offset = create_rw_signal(0.0);
    let viewport_size = create_rw_signal(0.0);
    let window = create_memo(move |_| {
        let count = item_count.get();
        compute_window_with(&config, count, viewport_size.get(), scroll_offset.get())
            .unwrap_or_else(|_| VirtualWindow::empty(config.overscan, config.estimated_item_size))
    });

    VirtualListHandle {
        scroll_offset,
        viewport_size,
        window: window.into(),
    }
}

impl VirtualListHandle {
    /// Feeds a scroll-container measurement into the window.
    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        self.scroll_offset.set(metrics.scroll_top);
        self.viewport_size.set(metrics.client_height);
    }
}

#[derive(Clone, Copy)]
/// Handle returned by [`use_virtual_grid`].
pub struct VirtualGridHandle {
    pub scroll_offset: RwSignal<f64>,
    pub viewport_size: RwSignal<f64>,
    pub container_width: RwSignal<f64>,
    /// Items per row for the current container width.
    pub columns: Signal<usize>,
    pub window: Signal<GridWindow>,
}

/// Windows a responsive grid: columns follow the container width, rows are
/// `config.estimated_item_size` tall.
pub fn use_virtual_grid(
    config: VirtualListConfig,
    item_width: f64,
    item_count: Signal<usize>,
) -> VirtualGridHandle {
    let config = checked_config(config);
    let scroll_offset = create_rw_signal(0.0);
    let viewport_size = create_rw_signal(0.0);
    let container_width = create_rw_signal(0.0);
    let columns = create_memo(move |_| columns_for_width(container_width.get(), item_width));
    let window = create_memo(move |_| {
        let columns = columns.get();
        let count = item_count.get();
        compute_grid_window(
            count,
            columns,
            config.estimated_item_size,
            viewport_size.get(),
            scroll_offset.get(),
            config.overscan,
        )
        .unwrap_or_else(|_| GridWindow {
            rows: VirtualWindow::empty(config.overscan, config.estimated_item_size),
            columns,
            item_count: 0,
        })
    });

    VirtualGridHandle {
        scroll_offset,
        viewport_size,
        container_width,
        columns: columns.into(),
        window: window.into(),
    }
}

impl VirtualGridHandle {
    /// Feeds a scroll-container measurement into the window and column count.
    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        self.scroll_offset.set(metrics.scroll_top);
        self.viewport_size.set(metrics.client_height);
        self.container_width.set(metrics.client_width);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn window_follows_scroll_signals() {
        let _ = create_runtime();
        let count = create_rw_signal(1_000usize);
        let list = use_virtual_list(VirtualListConfig::default(), count.into());

        list.on_scroll(ScrollMetrics {
            scroll_top: 2_000.0,
            client_height: 400.0,
            scroll_height: 40_000.0,
            client_width: 300.0,
        });
        let window = list.window.get_untracked();
        assert_eq!((window.start_index, window.end_index), (47, 63));

        count.set(0);
        assert!(list.window.get_untracked().is_empty());
    }

    #[test]
    fn invalid_item_size_falls_back_to_default() {
        let _ = create_runtime();
        let list = use_virtual_list(
            VirtualListConfig {
                estimated_item_size: 0.0,
                overscan: 0,
            },
            Signal::derive(|| 10),
        );
        list.viewport_size.set(80.0);
        assert_eq!(list.window.get_untracked().end_index, 2);
    }

    #[test]
    fn grid_columns_track_container_width() {
        let _ = create_runtime();
        let grid = use_virtual_grid(
            VirtualListConfig {
                estimated_item_size: 100.0,
                overscan: 1,
            },
            240.0,
            Signal::derive(|| 25),
        );
        grid.on_scroll(ScrollMetrics {
            scroll_top: 0.0,
            client_height: 200.0,
            scroll_height: 700.0,
            client_width: 1_000.0,
        });

        assert_eq!(grid.columns.get_untracked(), 4);
        let window = grid.window.get_untracked();
        assert_eq!((window.start_index(), window.end_index()), (0, 19));
    }
}
