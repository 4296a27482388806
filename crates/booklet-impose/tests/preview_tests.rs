mod common;

use booklet_impose::layout::Slot;
use booklet_impose::*;
use common::*;

#[test]
fn test_sheet_plan_two_up_uses_print_order() {
    let working_set = pdf_working_set(5);
    let sheets = sheet_plan(working_set.pages(), &ImpositionOptions::default());

    assert_eq!(sheets.len(), 4);
    let first = &sheets[0];
    assert_eq!(first.index, 0);
    assert_eq!(
        first.page(Slot::Left).and_then(Page::source_index),
        Some(3)
    );
    assert_eq!(
        first.page(Slot::Right).and_then(Page::source_index),
        Some(0)
    );

    // [blank, 5]
    assert!(sheets[2].page(Slot::Left).unwrap().is_filler());
    assert_eq!(
        sheets[2].page(Slot::Right).and_then(Page::source_index),
        Some(4)
    );
}

#[test]
fn test_sheet_plan_single_up_keeps_order() {
    let working_set = pdf_working_set(3);
    let options = ImpositionOptions {
        layout: OutputLayout::SingleUp,
        ..Default::default()
    };
    let sheets = sheet_plan(working_set.pages(), &options);

    assert_eq!(sheets.len(), 3);
    for (i, sheet) in sheets.iter().enumerate() {
        assert_eq!(sheet.slots.len(), 1);
        assert_eq!(sheet.page(Slot::Full).and_then(Page::source_index), Some(i));
    }
}

#[tokio::test]
async fn test_preview_limits_sheets() {
    let working_set = pdf_working_set(16);
    let preview = generate_preview(
        working_set.pages(),
        working_set.sources(),
        &ImpositionOptions::default(),
        2,
    )
    .await
    .unwrap();

    assert_eq!(preview.sheets, 2);
    assert_eq!(preview.placed, 4);
    assert_eq!(load_output(&preview).get_pages().len(), 2);
}

#[tokio::test]
async fn test_preview_larger_than_document() {
    let working_set = pdf_working_set(3);
    let options = ImpositionOptions {
        layout: OutputLayout::SingleUp,
        ..Default::default()
    };
    let preview = generate_preview(working_set.pages(), working_set.sources(), &options, 10)
        .await
        .unwrap();

    assert_eq!(preview.sheets, 3);
}

#[tokio::test]
async fn test_preview_zero_sheets() {
    let working_set = pdf_working_set(3);
    let result = generate_preview(
        working_set.pages(),
        working_set.sources(),
        &ImpositionOptions::default(),
        0,
    )
    .await;
    assert!(matches!(result, Err(ImposeError::Config(_))));
}

#[tokio::test]
async fn test_preview_empty_input() {
    let result = generate_preview(&[], &SourceStore::new(), &ImpositionOptions::default(), 1).await;
    assert!(matches!(result, Err(ImposeError::NoPages)));
}
