//! Page slicing over a filtered collection. Pages are 1-based.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page size must be greater than zero")]
pub struct InvalidPageSize;

/// Current page and page size. Out-of-range moves are rejected, never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Result<Self, InvalidPageSize> {
        if page_size == 0 {
            return Err(InvalidPageSize);
        }
        Ok(Pager { page: 1, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the page size returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), InvalidPageSize> {
        if page_size == 0 {
            return Err(InvalidPageSize);
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Never less than 1, so an empty list still reads as "page 1 of 1".
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Move to `page` if it lies in `[1, total_pages]`. Returns whether the move happened.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page < 1 || page > self.total_pages(len) {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.go_to(self.page + 1, len)
    }

    pub fn previous(&mut self, len: usize) -> bool {
        match self.page.checked_sub(1) {
            Some(p) => self.go_to(p, len),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// True if the current page no longer exists for `len` records.
    pub fn is_out_of_range(&self, len: usize) -> bool {
        self.page > self.total_pages(len)
    }

    pub fn start_index(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        let start = self.start_index().min(records.len());
        let end = (start + self.page_size).min(records.len());
        &records[start..end]
    }

    /// Slice plus the counters the list footer shows.
    pub fn paginate<T: Clone>(&self, records: &[T]) -> PageSlice<T> {
        let items = self.slice(records).to_vec();
        let (first_index, last_index) = if items.is_empty() {
            (0, 0)
        } else {
            let first = self.start_index() + 1;
            (first, first + items.len() - 1)
        };
        PageSlice {
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages(records.len()),
            total_items: records.len(),
            first_index,
            last_index,
            items,
        }
    }
}

/// One visible page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based index of the first visible item, 0 when empty.
    pub first_index: usize,
    pub last_index: usize,
}

impl<T> PageSlice<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
