//! Row derivation for the gastos table.
//!
//! [`visible_rows`] is the only place where filtering, sorting and paging
//! happen. It is a pure function of the collection and the [`TableState`],
//! and the controller calls it every time something changes.
use api_types::gasto::Gasto;

use crate::columns::Column;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

// Never typed by a user, so a filter cannot match across two cells.
const CELL_SEPARATOR: &str = "\u{25EC}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sort {
    pub column: Column,
    pub direction: SortDirection,
}

/// One page of rows, plus what a paginator needs to describe it.
#[derive(Debug)]
pub struct VisibleRows<'a> {
    pub rows: Vec<&'a Gasto>,
    /// Records in the collection.
    pub total: usize,
    /// Records left after filtering.
    pub matched: usize,
    /// Zero-based page actually shown, after clamping.
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
}

impl VisibleRows<'_> {
    /// One-based inclusive range of the shown rows, `None` when nothing matched.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let start = self.page * self.page_size + 1;
        Some((start, start + self.rows.len() - 1))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn normalize_filter(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether the rendered cells of `gasto` contain `filter`.
///
/// `filter` must already be normalized.
pub fn matches(gasto: &Gasto, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let haystack = Column::data()
        .map(|column| column.cell(gasto))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
        .to_lowercase();
    haystack.contains(filter)
}

pub fn visible_rows<'a>(
    all: &'a [Gasto],
    filter: &str,
    sort: Option<Sort>,
    page: usize,
    page_size: usize,
) -> VisibleRows<'a> {
    let filter = normalize_filter(filter);
    let page_size = page_size.max(1);

    let mut rows = all
        .iter()
        .filter(|gasto| matches(gasto, &filter))
        .collect::<Vec<_>>();

    if let Some(sort) = sort.filter(|sort| sort.column.is_sortable()) {
        rows.sort_by(|a, b| {
            let ord = sort
                .column
                .sort_value(a)
                .compare(&sort.column.sort_value(b));
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    let matched = rows.len();
    let page_count = matched.div_ceil(page_size).max(1);
    let page = page.min(page_count - 1);
    let rows = rows
        .into_iter()
        .skip(page * page_size)
        .take(page_size)
        .collect();

    VisibleRows {
        rows,
        total: all.len(),
        matched,
        page,
        page_count,
        page_size,
    }
}

/// Filter, sort and paging state of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    filter: String,
    sort: Option<Sort>,
    page: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: String::new(),
            sort: None,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Stores the normalized filter and goes back to the first page.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = normalize_filter(text);
        self.first_page();
    }

    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort.filter(|sort| sort.column.is_sortable());
    }

    /// Cycles the sort on `column`: ascending, descending, unsorted.
    pub fn toggle_sort(&mut self, column: Column) {
        if !column.is_sortable() {
            return;
        }
        self.sort = match self.sort {
            Some(Sort {
                column: current,
                direction: SortDirection::Asc,
            }) if current == column => Some(Sort {
                column,
                direction: SortDirection::Desc,
            }),
            Some(Sort {
                column: current,
                direction: SortDirection::Desc,
            }) if current == column => None,
            _ => Some(Sort {
                column,
                direction: SortDirection::Asc,
            }),
        };
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn next_page(&mut self, page_count: usize) {
        if self.page + 1 < page_count {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn clamp_page(&mut self, page_count: usize) {
        self.page = self.page.min(page_count.saturating_sub(1));
    }

    /// Keeps the first row of the current page visible.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        self.page = self.page * self.page_size / page_size;
        self.page_size = page_size;
    }

    pub fn grow_page_size(&mut self) {
        if let Some(next) = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|size| *size > self.page_size)
        {
            self.set_page_size(next);
        }
    }

    pub fn shrink_page_size(&mut self) {
        if let Some(prev) = PAGE_SIZE_OPTIONS
            .iter()
            .rev()
            .copied()
            .find(|size| *size < self.page_size)
        {
            self.set_page_size(prev);
        }
    }
}
