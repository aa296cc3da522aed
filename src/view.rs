//! List-view controller: source records, filter state and the current page.
//! Nothing recomputes implicitly; callers mutate, then call `refresh()`.

use crate::filter::{filter_records, Filterable, ListFilter};
use crate::config::Config;
use crate::pagination::{InvalidPageSize, PageSlice, Pager};
use crate::stats::Aggregate;
use tracing::debug;

type FilterUpdate<T> = <<T as Filterable>::Filter as ListFilter>::Update;

pub struct ListView<T: Filterable> {
    source: Vec<T>,
    filter: T::Filter,
    pager: Pager,
}

/// Everything a list page renders, computed in one pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot<T: Aggregate> {
    pub source_count: usize,
    pub filtered_count: usize,
    pub page: PageSlice<T>,
    /// Over the filtered subset, not just the visible page.
    pub stats: T::Stats,
}

impl<T: Aggregate> ViewSnapshot<T> {
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }
}

impl<T: Filterable> ListView<T> {
    pub fn new(page_size: usize) -> Result<Self, InvalidPageSize> {
        Ok(ListView {
            source: Vec::new(),
            filter: T::Filter::default(),
            pager: Pager::new(page_size)?,
        })
    }

    /// Empty view using the configured page size.
    pub fn from_config(config: &Config) -> Result<Self, InvalidPageSize> {
        Self::new(config.page_size)
    }

    pub fn with_records(records: Vec<T>, page_size: usize) -> Result<Self, InvalidPageSize> {
        let mut view = Self::new(page_size)?;
        view.source = records;
        Ok(view)
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    pub fn filter(&self) -> &T::Filter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    pub fn filtered_len(&self) -> usize {
        self.source.iter().filter(|r| r.matches(&self.filter)).count()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.filtered_len())
    }

    /// Any filter change sends the view back to page 1.
    pub fn update_filter(&mut self, update: FilterUpdate<T>) {
        let changed = self.filter.apply(update);
        self.pager.reset();
        debug!(changed, "filter updated, page reset");
    }

    pub fn clear_filters(&mut self) {
        self.filter = T::Filter::default();
        self.pager.reset();
    }

    /// Swap in freshly fetched records. The page is kept unless it no longer exists.
    pub fn replace_source(&mut self, records: Vec<T>) {
        self.source = records;
        let len = self.filtered_len();
        if self.pager.is_out_of_range(len) {
            self.pager.reset();
        }
    }

    /// Mutable access for in-place edits (e.g. appending an intervention).
    pub fn find_mut<P>(&mut self, pred: P) -> Option<&mut T>
    where
        P: FnMut(&&mut T) -> bool,
    {
        self.source.iter_mut().find(pred)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let len = self.filtered_len();
        let moved = self.pager.go_to(page, len);
        if !moved {
            debug!(page, current = self.pager.page(), "page change rejected");
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.filtered_len();
        self.pager.next(len)
    }

    pub fn previous_page(&mut self) -> bool {
        let len = self.filtered_len();
        self.pager.previous(len)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), InvalidPageSize> {
        self.pager.set_page_size(page_size)
    }
}

impl<T: Filterable + Aggregate + Clone> ListView<T> {
    pub fn refresh(&self) -> ViewSnapshot<T> {
        let filtered = filter_records(&self.source, &self.filter);
        let stats = T::aggregate(&filtered);
        let page = self.pager.paginate(&filtered);
        debug!(
            source = self.source.len(),
            filtered = filtered.len(),
            page = page.page,
            "view refreshed"
        );
        ViewSnapshot {
            source_count: self.source.len(),
            filtered_count: filtered.len(),
            page: PageSlice {
                items: page.items.into_iter().cloned().collect(),
                page: page.page,
                page_size: page.page_size,
                total_pages: page.total_pages,
                total_items: page.total_items,
                first_index: page.first_index,
                last_index: page.last_index,
            },
            stats,
        }
    }
}
