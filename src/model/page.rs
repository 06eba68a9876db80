use serde::{Deserialize, Serialize};

/// One page of an already filtered and sorted listing.
///
/// Pages are 1-based. A requested page of 0 is read as page 1 and a page size of 0
/// falls back to the caller's default. Asking past the last page yields no items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn paginate(items: Vec<T>, page: usize, page_size: usize, default_size: usize) -> Self {
        let page = page.max(1);
        let page_size = match page_size {
            0 => default_size.max(1),
            n => n,
        };
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size);

        let items = items
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}
