//! Scroll-container measurements for virtualization and infinite-scroll triggers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
/// Snapshot of a scroll container's geometry, in CSS pixels.
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub scroll_top: f64,
    /// Visible height of the container.
    pub client_height: f64,
    /// Full content height.
    pub scroll_height: f64,
    /// Visible width of the container.
    pub client_width: f64,
}

impl ScrollMetrics {
    /// Remaining scrollable distance below the viewport.
    pub fn distance_to_end(&self) -> f64 {
        (self.scroll_height - self.scroll_top - self.client_height).max(0.0)
    }

    /// `true` once the viewport is within `threshold` pixels of the end of the content.
    pub fn is_near_end(&self, threshold: f64) -> bool {
        self.scroll_height > 0.0 && self.distance_to_end() <= threshold
    }
}

/// Reads the current metrics of `element`.
#[cfg(target_arch = "wasm32")]
pub fn element_metrics(element: &web_sys::Element) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: f64::from(element.scroll_top()),
        client_height: f64::from(element.client_height()),
        scroll_height: f64::from(element.scroll_height()),
        client_width: f64::from(element.client_width()),
    }
}

/// Reads the current metrics of `element`. Always zeroed off-browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn element_metrics(element: &web_sys::Element) -> ScrollMetrics {
    let _ = element;
    ScrollMetrics::default()
}
