//! Fixed-size result pages
//!
//! Pages are never clamped: asking for a page past the end yields an empty
//! slice, and it is up to the caller to step back. A page size of zero is
//! treated as one.

/// The `page`-th slice (zero-based) of `items`
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let page_size = page_size.max(1);
    let Some(start) = page.checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items; zero when there are none
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}
