//! Fixed-size result pages with a bounded strip of page-number controls.

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Maximum page-number controls shown at once.
pub const MAX_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    /// Page numbers to render as controls, ascending.
    pub pages: Vec<usize>,
    /// Whether a trailing "…" indicator follows `pages`.
    pub show_ellipsis: bool,
}

impl PageWindow {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub window: PageWindow,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Pins `page` into `1..=max(1, total_pages)`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slices `items` into the requested page and computes its window.
///
/// Out-of-range `current_page` values are clamped rather than rejected.
pub fn paginate<T>(items: &[T], page_size: usize, current_page: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);
    let current = clamp_page(current_page, total);

    let start = (current - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        window: page_window(current, total),
    }
}

/// Page-number strip for `current` of `total` pages.
pub fn page_window(current: usize, total: usize) -> PageWindow {
    let current = clamp_page(current, total);

    let (first, last) = if total <= MAX_WINDOW {
        (1, total)
    } else if current <= 3 {
        (1, MAX_WINDOW)
    } else if current >= total - 2 {
        (total - MAX_WINDOW + 1, total)
    } else {
        (current - 2, current + 2)
    };

    PageWindow {
        current_page: current,
        total_pages: total,
        pages: (first..=last).collect(),
        show_ellipsis: total > MAX_WINDOW && current < total - 2,
    }
}
