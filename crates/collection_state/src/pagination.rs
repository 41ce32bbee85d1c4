//! Page/page-size/total tracking with clamped transitions.
//!
//! Every mutating operation returns `true` when the effective state changed. A `false` return is
//! the "no state-change signal" case and callers must not notify observers for it.

use serde::{Deserialize, Serialize};

use crate::{config::PaginationConfig, error::InvalidArgument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Current page, page size, and total item count.
///
/// Invariant: `page` lies in `[1, max(total_pages, 1)]` after every mutation.
pub struct PaginationState {
    page: usize,
    page_size: usize,
    total_items: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Entry in a page-number strip rendered by pagination controls.
pub enum PageItem {
    /// A clickable page number.
    Page(usize),
    /// A collapsed run of page numbers.
    Ellipsis,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            total_items: 0,
        }
    }
}

impl PaginationState {
    /// Starts at page 1 with no known items.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::ZeroPageSize`] when `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self, InvalidArgument> {
        if page_size == 0 {
            return Err(InvalidArgument::ZeroPageSize);
        }
        Ok(Self {
            page: 1,
            page_size,
            total_items: 0,
        })
    }

    /// Builds the initial state from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::ZeroPageSize`] when the configured page size is zero.
    pub fn from_config(config: &PaginationConfig) -> Result<Self, InvalidArgument> {
        Self::new(config.page_size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / page_size)`, or 0 when there are no items.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Zero-based index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    /// 1-based inclusive `(first, last)` item numbers shown on the current page.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.total_items == 0 {
            return None;
        }
        let first = self.offset() + 1;
        let last = (self.offset() + self.page_size).min(self.total_items);
        Some((first, last))
    }

    /// Moves to page `n`, clamped into the valid range.
    pub fn set_page(&mut self, n: usize) -> bool {
        let next = self.clamp_page(n);
        if next == self.page {
            return false;
        }
        self.page = next;
        true
    }

    /// Changes the page size, keeping the first item of the current page in view.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::ZeroPageSize`] when `n` is zero; the state is left untouched.
    pub fn set_page_size(&mut self, n: usize) -> Result<bool, InvalidArgument> {
        if n == 0 {
            return Err(InvalidArgument::ZeroPageSize);
        }
        if n == self.page_size {
            return Ok(false);
        }
        let first_item = self.offset();
        self.page_size = n;
        self.page = self.clamp_page(first_item / n + 1);
        Ok(true)
    }

    /// Updates the total item count and re-clamps the page.
    pub fn set_total(&mut self, n: usize) -> bool {
        if n == self.total_items {
            return false;
        }
        self.total_items = n;
        self.page = self.clamp_page(self.page);
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.set_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.set_page(self.page - 1)
    }

    /// Returns to page 1. Page size and total are kept.
    pub fn reset(&mut self) -> bool {
        self.set_page(1)
    }

    /// Page-number strip: first and last page, the current page with `siblings` neighbors on
    /// either side, and ellipses for the gaps. A gap of exactly one page shows that page instead.
    pub fn page_items(&self, siblings: usize) -> Vec<PageItem> {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return Vec::new();
        }

        let start = self.page.saturating_sub(siblings).max(1);
        let end = self.page.saturating_add(siblings).min(total_pages);
        let mut items = Vec::with_capacity(end - start + 5);

        if start > 1 {
            items.push(PageItem::Page(1));
        }
        match start {
            0..=2 => {}
            3 => items.push(PageItem::Page(2)),
            _ => items.push(PageItem::Ellipsis),
        }
        items.extend((start..=end).map(PageItem::Page));
        if end + 2 == total_pages {
            items.push(PageItem::Page(total_pages - 1));
        } else if end + 2 < total_pages {
            items.push(PageItem::Ellipsis);
        }
        if end < total_pages {
            items.push(PageItem::Page(total_pages));
        }
        items
    }

    fn clamp_page(&self, n: usize) -> usize {
        n.clamp(1, self.total_pages().max(1))
    }
}
