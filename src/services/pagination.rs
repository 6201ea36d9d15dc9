//! Pure pagination arithmetic
//!
//! Page indices are 1-based everywhere. A zero-match result derives zero
//! pages, but navigation still clamps to page 1 so there is always a valid
//! current page.

/// Number of page links shown in the navigation control.
const WINDOW: u64 = 5;

/// `ceil(total / page_size)` pages.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size)
}

/// Bound a requested page to `[1, max(total_pages, 1)]`. Out-of-range
/// requests are clamped, never sent to the store.
pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    requested.clamp(1, total_pages.max(1))
}

/// The visible page numbers for the navigation control: at most `WINDOW`
/// consecutive pages centred on `current`, shifted to stay within
/// `[1, total_pages]`.
pub fn page_window(current: u64, total_pages: u64) -> Vec<u64> {
    if total_pages == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(WINDOW / 2).max(1);
    let end = (start + WINDOW - 1).min(total_pages);
    if end - start + 1 < WINDOW {
        start = end.saturating_sub(WINDOW - 1).max(1);
    }
    (start..=end).collect()
}
