//! Pagination
//!
//! Fixed page size per screen, 1-based pages, and the page-button strip:
//! first and last page always shown, up to three pages around the current
//! one, ellipses where pages are skipped.

/// Current page of a list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size: page_size.max(1) }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Current page clamped into `[1, total_pages]`.
    pub fn clamped(&self, len: usize) -> usize {
        self.page.clamp(1, total_pages(len, self.page_size))
    }
}

/// `max(1, ceil(len / page_size))`
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Slice of `items` shown on `page`; out-of-range pages clamp to the last.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let page = page.clamp(1, total_pages(items.len(), size));
    let start = ((page - 1) * size).min(items.len());
    let end = (start + size).min(items.len());
    &items[start..end]
}

/// One entry of the page-button strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Page buttons for `current` of `total`.
pub fn page_buttons(current: usize, total: usize) -> Vec<PageButton> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    if total == 1 {
        return vec![PageButton::Page(1)];
    }

    let mut buttons = vec![PageButton::Page(1)];
    let window_start = current.saturating_sub(1).max(2);
    let window_end = (current + 1).min(total - 1);

    if window_start > 2 {
        buttons.push(PageButton::Ellipsis);
    }
    for page in window_start..=window_end {
        buttons.push(PageButton::Page(page));
    }
    if window_end < total - 1 {
        buttons.push(PageButton::Ellipsis);
    }
    buttons.push(PageButton::Page(total));
    buttons
}

/// Everything the page-control strip needs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    pub page: usize,
    pub total_pages: usize,
    pub buttons: Vec<PageButton>,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    /// 1-based index of the first row shown, 0 when empty
    pub first_row: usize,
    pub last_row: usize,
    pub total_rows: usize,
}

impl PageControls {
    pub fn new(page: usize, page_size: usize, total_rows: usize) -> Self {
        let total = total_pages(total_rows, page_size);
        let page = page.clamp(1, total);
        let empty = total_rows == 0;
        let first_row = if empty { 0 } else { (page - 1) * page_size.max(1) + 1 };
        let last_row = (page * page_size.max(1)).min(total_rows);
        Self {
            page,
            total_pages: total,
            buttons: page_buttons(page, total),
            prev_disabled: empty || page <= 1,
            next_disabled: empty || page >= total,
            first_row,
            last_row,
            total_rows,
        }
    }

    /// Page buttons are all disabled on an empty list.
    pub fn buttons_disabled(&self) -> bool {
        self.total_rows == 0
    }
}
