// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// Rows per page for every table.
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` items; an empty list still has one page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if len == 0 || page_size == 0 {
        1
    } else {
        len.div_ceil(page_size)
    }
}

/// Slice of `items` shown on 1-indexed `page`.
///
/// Out-of-range pages yield an empty slice; clamping is the caller's job.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if page == 0 || start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page to show after a row was removed from `page`, which now holds
/// `remaining` rows.
pub fn page_after_removal(page: usize, remaining: usize) -> usize {
    if remaining == 0 && page > 1 {
        page - 1
    } else {
        page
    }
}

/// Clamps a requested page into `[1, total]`.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}
