//! Catalog pagination

/// Default number of foods per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Maximum number of page links shown at once.
pub const MAX_PAGES_SHOWN: usize = 5;

/// Splits a list into fixed-size, 1-based pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Return the requested page, clamping the page number into range.
    pub fn page<'a, T>(&self, items: &'a [T], requested: usize) -> Page<'a, T> {
        let total_pages = self.total_pages(items.len());
        let current = requested.clamp(1, total_pages.max(1));
        let start = ((current - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        Page {
            items: &items[start..end],
            offset: start,
            current,
            total_pages,
            total_items: items.len(),
        }
    }
}

/// One page of results
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Index of the first item within the whole list
    pub offset: usize,
    pub current: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Page numbers to display: up to [`MAX_PAGES_SHOWN`], centered on the
    /// current page where possible, never outside `1..=total_pages`.
    pub fn page_range(&self) -> Vec<usize> {
        page_range(self.current, self.total_pages)
    }
}

pub fn page_range(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(MAX_PAGES_SHOWN / 2).max(1);
    let mut end = start + MAX_PAGES_SHOWN - 1;
    if end > total_pages {
        end = total_pages;
        start = (end + 1).saturating_sub(MAX_PAGES_SHOWN).max(1);
    }
    (start..=end).collect()
}
