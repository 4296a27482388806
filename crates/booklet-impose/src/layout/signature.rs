//! Signature planning
//!
//! This module pads a page list to whole signatures and reorders it into
//! sheet-printing order for saddle-stitch booklets.
//!
//! ## Saddle-stitch order
//!
//! Each signature of `N` pages is printed on `N/4` sheets. Sheet `i` carries:
//! - Front: left = page `N-2i`, right = page `2i+1`
//! - Back: left = page `2i+2`, right = page `N-2i-1`
//!
//! (1-based page numbers.) For a 4-page signature that is `[4, 1]` on the
//! front and `[2, 3]` on the back; an 8-page signature gives
//! `[8, 1] [2, 7] [6, 3] [4, 5]`. Printing the sheets in this order and
//! folding each signature on its own reproduces reading order.

use crate::constants::{DEFAULT_GROUP_SIZE, PAGES_PER_FOLDED_SHEET};
use crate::types::{OutputLayout, Page};

use super::{PlannedSlot, SheetPlan, Slot};

// =============================================================================
// Padding
// =============================================================================

/// Group size actually used for a requested one.
///
/// Anything that is not a positive multiple of 4 silently becomes 4: a
/// signature is made of folded sheets and each sheet holds four pages.
pub fn effective_group_size(group_size: usize) -> usize {
    if group_size > 0 && group_size % PAGES_PER_FOLDED_SHEET == 0 {
        group_size
    } else {
        DEFAULT_GROUP_SIZE
    }
}

/// Number of filler pages needed to bring `len` to a whole number of groups
pub fn filler_needed(len: usize, group_size: usize) -> usize {
    let group = effective_group_size(group_size);
    match len % group {
        0 => 0,
        remainder => group - remainder,
    }
}

/// Append filler pages until the length is a multiple of the group size.
///
/// Existing pages keep their order and identity. Calling this on an
/// already aligned list returns it unchanged.
pub fn pad_to_group(pages: &[Page], group_size: usize) -> Vec<Page> {
    let fillers = filler_needed(pages.len(), group_size);
    let mut padded = Vec::with_capacity(pages.len() + fillers);
    padded.extend_from_slice(pages);
    padded.extend((0..fillers).map(|_| Page::filler()));
    padded
}

// =============================================================================
// Page Ordering
// =============================================================================

/// Sheet-printing order as indices into a list of `total_pages` pages.
///
/// `total_pages` is expected to be padded already; a trailing partial
/// group is ignored.
pub fn signature_order(total_pages: usize, group_size: usize) -> Vec<usize> {
    let group = effective_group_size(group_size);
    let num_groups = total_pages / group;
    let sheets = group / PAGES_PER_FOLDED_SHEET;
    let mut order = Vec::with_capacity(num_groups * group);

    for g in 0..num_groups {
        let start = g * group;
        for i in 0..sheets {
            let last = group - 1 - 2 * i;
            let first = 2 * i;
            order.push(start + last); // front, left
            order.push(start + first); // front, right
            order.push(start + first + 1); // back, left
            order.push(start + last - 1); // back, right
        }
    }

    order
}

/// Pad `pages` and permute them into sheet-printing order.
///
/// The result holds the same pages (same ids) as [`pad_to_group`], reordered
/// so that consecutive pairs are the left/right halves of successive sheet
/// sides.
pub fn plan_signatures(pages: &[Page], group_size: usize) -> Vec<Page> {
    let padded = pad_to_group(pages, group_size);
    signature_order(padded.len(), group_size)
        .into_iter()
        .map(|idx| padded[idx].clone())
        .collect()
}

// =============================================================================
// Sheets
// =============================================================================

/// Split pages that are already in final order into output sheets.
///
/// Single-up yields one sheet per page. Two-up pairs consecutive pages;
/// an odd tail leaves the right slot empty.
pub fn plan_sheets(pages: &[Page], layout: OutputLayout) -> Vec<SheetPlan> {
    match layout {
        OutputLayout::SingleUp => pages
            .iter()
            .enumerate()
            .map(|(index, page)| SheetPlan {
                index,
                slots: vec![PlannedSlot {
                    slot: Slot::Full,
                    page: Some(page.clone()),
                }],
            })
            .collect(),
        OutputLayout::TwoUp => pages
            .chunks(2)
            .enumerate()
            .map(|(index, pair)| SheetPlan {
                index,
                slots: vec![
                    PlannedSlot {
                        slot: Slot::Left,
                        page: pair.first().cloned(),
                    },
                    PlannedSlot {
                        slot: Slot::Right,
                        page: pair.get(1).cloned(),
                    },
                ],
            })
            .collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_group_size_fallback() {
        assert_eq!(effective_group_size(0), 4);
        assert_eq!(effective_group_size(6), 4);
        assert_eq!(effective_group_size(3), 4);
        assert_eq!(effective_group_size(8), 8);
        assert_eq!(effective_group_size(16), 16);
    }

    #[test]
    fn test_filler_needed() {
        assert_eq!(filler_needed(0, 4), 0);
        assert_eq!(filler_needed(5, 4), 3);
        assert_eq!(filler_needed(8, 4), 0);
        assert_eq!(filler_needed(9, 8), 7);
        assert_eq!(filler_needed(5, 6), 3); // falls back to 4
    }

    #[test]
    fn test_folio_order() {
        assert_eq!(signature_order(4, 4), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_two_folios() {
        assert_eq!(signature_order(8, 4), vec![3, 0, 1, 2, 7, 4, 5, 6]);
    }

    #[test]
    fn test_eight_page_signature() {
        assert_eq!(signature_order(8, 8), vec![7, 0, 1, 6, 5, 2, 3, 4]);
    }

    #[test]
    fn test_partial_group_ignored() {
        assert_eq!(signature_order(6, 4), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_plan_sheets_two_up_odd_tail() {
        let pages: Vec<Page> = (0..3).map(|_| Page::filler()).collect();
        let sheets = plan_sheets(&pages, OutputLayout::TwoUp);

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].page(Slot::Left), Some(&pages[0]));
        assert_eq!(sheets[0].page(Slot::Right), Some(&pages[1]));
        assert_eq!(sheets[1].page(Slot::Left), Some(&pages[2]));
        assert_eq!(sheets[1].page(Slot::Right), None);
    }

    #[test]
    fn test_plan_sheets_single_up() {
        let pages: Vec<Page> = (0..3).map(|_| Page::filler()).collect();
        let sheets = plan_sheets(&pages, OutputLayout::SingleUp);

        assert_eq!(sheets.len(), 3);
        assert!(sheets.iter().all(|s| s.slots.len() == 1));
        assert_eq!(sheets[2].index, 2);
        assert_eq!(sheets[2].page(Slot::Full), Some(&pages[2]));
    }
}
