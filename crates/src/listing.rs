//! Client-side view over a product snapshot: selection, sorting and paging.

use crate::catalog::{Product, ProductId, Snapshot};
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            column: SortColumn::Id,
            direction: SortDirection::Descending,
        }
    }
}

/// Header checkbox state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
    Checked,
    Indeterminate,
    Unchecked,
}

pub fn header_state(selected: usize, total: usize) -> HeaderState {
    if selected == 0 {
        HeaderState::Unchecked
    } else if selected == total {
        HeaderState::Checked
    } else {
        HeaderState::Indeterminate
    }
}

// Case-insensitive first so "arco" and "Arco" sit together, then exact.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Row comparator.
///
/// Names compare on Spanish when both rows have it, otherwise on Portuguese
/// when both have it. Any other pair compares `Equal`, so such rows keep
/// their input order under the stable sort in [`sorted`].
pub fn compare(a: &Product, b: &Product, sort: SortState) -> Ordering {
    let ord = match sort.column {
        SortColumn::Id => a.id.cmp(&b.id),
        SortColumn::Name => match (a.name.es_name(), b.name.es_name()) {
            (Some(x), Some(y)) => collate(x, y),
            _ => match (a.name.pt_name(), b.name.pt_name()) {
                (Some(x), Some(y)) => collate(x, y),
                _ => Ordering::Equal,
            },
        },
    };
    match sort.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

pub fn sorted(products: &[Product], sort: SortState) -> Vec<&Product> {
    let mut rows: Vec<&Product> = products.iter().collect();
    rows.sort_by(|a, b| compare(a, b, sort));
    rows
}

/// Slice out 1-based `page`. Pages past the end come back empty; the page
/// number itself is left alone.
pub fn paginate<T>(rows: &[T], page: usize, size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(size).min(rows.len());
    let end = start.saturating_add(size).min(rows.len());
    &rows[start..end]
}

pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    total.div_ceil(size).max(1)
}

#[derive(Clone, Debug)]
pub struct ListController {
    selection: BTreeSet<ProductId>,
    revision: Option<u64>,
    pub sort: SortState,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListController {
    pub fn new(page_size: usize) -> Self {
        ListController {
            selection: BTreeSet::new(),
            revision: None,
            sort: SortState::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Bind to `snapshot`. A different revision drops the selection, even if
    /// the rows are the same, and clamps the page to the new page count.
    pub fn observe(&mut self, snapshot: &Snapshot) {
        if self.revision != Some(snapshot.revision) {
            self.revision = Some(snapshot.revision);
            self.selection.clear();
        }
        self.clamp_page(snapshot.len());
    }

    pub fn selection(&self) -> &BTreeSet<ProductId> {
        &self.selection
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selection.contains(&id)
    }

    pub fn toggle_row(&mut self, id: ProductId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Select every row of the snapshot, or clear when all are already selected.
    pub fn toggle_all(&mut self, snapshot: &Snapshot) {
        if self.header_state(snapshot.len()) == HeaderState::Checked {
            self.selection.clear();
        } else {
            self.selection = snapshot.products().iter().map(|p| p.id).collect();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn header_state(&self, total: usize) -> HeaderState {
        header_state(self.selection.len(), total)
    }

    pub fn set_sort(&mut self, column: SortColumn) {
        if self.sort.column == column {
            self.sort.direction = self.sort.direction.flipped();
        } else {
            self.sort = SortState {
                column,
                direction: SortDirection::Ascending,
            };
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    pub fn clamp_page(&mut self, total: usize) {
        self.page = self.page.clamp(1, self.page_count(total));
    }

    pub fn next_page(&mut self, total: usize) {
        if self.page < self.page_count(total) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Rows of the current page, sorted.
    pub fn visible_rows<'a>(&self, snapshot: &'a Snapshot) -> Vec<&'a Product> {
        let rows = sorted(snapshot.products(), self.sort);
        paginate(&rows, self.page, self.page_size).to_vec()
    }

    /// 1-based first and last row shown on the current page, if any.
    pub fn row_range(&self, total: usize) -> Option<(usize, usize)> {
        let first = self.page.saturating_sub(1) * self.page_size + 1;
        let last = (self.page * self.page_size).min(total);
        if total == 0 || first > last {
            None
        } else {
            Some((first, last))
        }
    }
}
