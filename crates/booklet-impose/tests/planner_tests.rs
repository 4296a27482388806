use booklet_impose::layout::{Slot, filler_needed};
use booklet_impose::*;
use proptest::prelude::*;
use std::collections::HashSet;

/// Pages numbered 1..=n by their source index + 1
fn numbered_pages(n: usize) -> Vec<Page> {
    let source = SourceId::new();
    (0..n)
        .map(|i| Page::document(source, i, 612.0, 792.0))
        .collect()
}

/// 1-based page numbers, 0 for filler
fn numbers(pages: &[Page]) -> Vec<usize> {
    pages
        .iter()
        .map(|p| p.source_index().map(|i| i + 1).unwrap_or(0))
        .collect()
}

#[test]
fn test_pad_empty_list() {
    assert!(pad_to_group(&[], 4).is_empty());
}

#[test]
fn test_pad_five_pages_to_eight() {
    let pages = numbered_pages(5);
    let padded = pad_to_group(&pages, 4);

    assert_eq!(padded.len(), 8);
    assert_eq!(&padded[..5], &pages[..]);
    assert!(padded[5..].iter().all(Page::is_filler));
}

#[test]
fn test_pad_aligned_list_is_unchanged() {
    let pages = numbered_pages(8);
    assert_eq!(pad_to_group(&pages, 4), pages);
    assert_eq!(pad_to_group(&pages, 8), pages);
}

#[test]
fn test_invalid_group_size_means_four() {
    let pages = numbered_pages(5);
    for group in [0, 3, 6, 10] {
        assert_eq!(pad_to_group(&pages, group).len(), 8, "group {}", group);
    }
    assert_eq!(filler_needed(5, 0), 3);
}

#[test]
fn test_pad_respects_larger_groups() {
    assert_eq!(pad_to_group(&numbered_pages(5), 16).len(), 16);
    assert_eq!(pad_to_group(&numbered_pages(17), 8).len(), 24);
}

#[test]
fn test_fillers_are_distinct() {
    let padded = pad_to_group(&numbered_pages(1), 4);
    let ids: HashSet<_> = padded.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), 4);
}

#[test]
fn test_order_single_folio() {
    let planned = plan_signatures(&numbered_pages(4), 4);
    assert_eq!(numbers(&planned), vec![4, 1, 2, 3]);
}

#[test]
fn test_order_eight_pages_in_folios() {
    let planned = plan_signatures(&numbered_pages(8), 4);
    assert_eq!(numbers(&planned), vec![4, 1, 2, 3, 8, 5, 6, 7]);
}

#[test]
fn test_order_eight_page_signature() {
    let planned = plan_signatures(&numbered_pages(8), 8);
    assert_eq!(numbers(&planned), vec![8, 1, 2, 7, 6, 3, 4, 5]);
}

#[test]
fn test_order_sixteen_page_signature() {
    let order = signature_order(16, 16);
    let one_based: Vec<usize> = order.iter().map(|i| i + 1).collect();
    assert_eq!(
        one_based,
        vec![16, 1, 2, 15, 14, 3, 4, 13, 12, 5, 6, 11, 10, 7, 8, 9]
    );
}

#[test]
fn test_order_with_filler() {
    let planned = plan_signatures(&numbered_pages(5), 4);
    assert_eq!(numbers(&planned), vec![4, 1, 2, 3, 0, 5, 0, 0]);
}

#[test]
fn test_plan_keeps_page_identity() {
    let pages = numbered_pages(4);
    let planned = plan_signatures(&pages, 4);
    assert_eq!(planned[1].id, pages[0].id);
    assert_eq!(planned[0].id, pages[3].id);
}

#[test]
fn test_plan_sheets_pairs_in_order() {
    let planned = plan_signatures(&numbered_pages(8), 4);
    let sheets = plan_sheets(&planned, OutputLayout::TwoUp);

    assert_eq!(sheets.len(), 4);
    let pairs: Vec<(usize, usize)> = sheets
        .iter()
        .map(|s| {
            let number = |slot| {
                s.page(slot)
                    .and_then(Page::source_index)
                    .map(|i| i + 1)
                    .unwrap_or(0)
            };
            (number(Slot::Left), number(Slot::Right))
        })
        .collect();
    assert_eq!(pairs, vec![(4, 1), (2, 3), (8, 5), (6, 7)]);
}

proptest! {
    #[test]
    fn prop_padded_length_is_multiple_of_group(len in 0usize..200, group in 0usize..40) {
        let padded = pad_to_group(&numbered_pages(len), group);
        let effective = if group > 0 && group % 4 == 0 { group } else { 4 };

        prop_assert_eq!(padded.len() % effective, 0);
        prop_assert!(padded.len() >= len);
        prop_assert!(padded.len() < len + effective);
    }

    #[test]
    fn prop_padding_is_idempotent(len in 0usize..100, group in 0usize..40) {
        let once = pad_to_group(&numbered_pages(len), group);
        let twice = pad_to_group(&once, group);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_plan_is_permutation_of_padded(len in 0usize..100, group in prop::sample::select(vec![4usize, 8, 12, 16, 32])) {
        let pages = numbered_pages(len);
        let planned = plan_signatures(&pages, group);

        let planned_ids: HashSet<_> = planned.iter().map(|p| p.id).collect();
        prop_assert_eq!(planned_ids.len(), planned.len());
        prop_assert_eq!(planned.len() % group, 0);
        for page in &pages {
            prop_assert!(planned_ids.contains(&page.id));
        }
        prop_assert_eq!(
            planned.iter().filter(|p| p.is_filler()).count(),
            planned.len() - len
        );
    }

    #[test]
    fn prop_signature_order_is_permutation(groups in 0usize..8, group in prop::sample::select(vec![4usize, 8, 16])) {
        let total = groups * group;
        let mut order = signature_order(total, group);
        order.sort_unstable();
        prop_assert_eq!(order, (0..total).collect::<Vec<_>>());
    }
}
