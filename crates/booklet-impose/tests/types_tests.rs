use booklet_impose::*;

#[test]
fn test_paper_size_dimensions() {
    let a4 = PaperSize::A4;
    assert_eq!(a4.dimensions_mm(), (210.0, 297.0));

    let a3 = PaperSize::A3;
    assert_eq!(a3.dimensions_mm(), (297.0, 420.0));

    let a5 = PaperSize::A5;
    assert_eq!(a5.dimensions_mm(), (148.0, 210.0));

    let letter = PaperSize::Letter;
    assert_eq!(letter.dimensions_mm(), (215.9, 279.4));

    let legal = PaperSize::Legal;
    assert_eq!(legal.dimensions_mm(), (215.9, 355.6));

    let tabloid = PaperSize::Tabloid;
    assert_eq!(tabloid.dimensions_mm(), (279.4, 431.8));

    let custom = PaperSize::Custom {
        width_mm: 100.0,
        height_mm: 200.0,
    };
    assert_eq!(custom.dimensions_mm(), (100.0, 200.0));
}

#[test]
fn test_paper_orientation() {
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Landscape),
        (297.0, 210.0)
    );
    assert_eq!(
        PaperSize::A4.dimensions_with_orientation(Orientation::Portrait),
        (210.0, 297.0)
    );
}

#[test]
fn test_layout_properties() {
    assert_eq!(OutputLayout::default(), OutputLayout::TwoUp);
    assert_eq!(OutputLayout::TwoUp.pages_per_sheet(), 2);
    assert_eq!(OutputLayout::TwoUp.orientation(), Orientation::Landscape);
    assert_eq!(OutputLayout::SingleUp.pages_per_sheet(), 1);
    assert_eq!(OutputLayout::SingleUp.orientation(), Orientation::Portrait);
}

#[test]
fn test_filler_has_no_source() {
    let filler = Page::filler();
    assert_eq!(filler.kind(), PageKind::Filler);
    assert!(filler.is_filler());
    assert_eq!(filler.source_id(), None);
    assert_eq!(filler.source_index(), None);
    assert_eq!(filler.native_size, None);
}

#[test]
fn test_content_pages_have_sources() {
    let source = SourceId::new();

    let page = Page::document(source, 3, 612.0, 792.0);
    assert_eq!(page.kind(), PageKind::Document);
    assert_eq!(page.source_id(), Some(source));
    assert_eq!(page.source_index(), Some(3));
    assert!(!page.is_filler());

    let image = Page::image(source, 64.0, 32.0);
    assert_eq!(image.kind(), PageKind::Image);
    assert_eq!(image.source_id(), Some(source));
    assert_eq!(image.source_index(), Some(0));
    assert_eq!(image.native_size, Some((64.0, 32.0)));
}

#[test]
fn test_page_ids_are_unique() {
    let a = Page::filler();
    let b = Page::filler();
    assert_ne!(a.id, b.id);
    assert_ne!(PageId::new(), PageId::new());
    assert_eq!(a.id.to_string(), a.id.as_uuid().to_string());
}

#[cfg(feature = "serde")]
#[test]
fn test_page_serde() {
    let page = Page::document(SourceId::new(), 1, 100.0, 200.0);
    let json = serde_json::to_string(&page).unwrap();
    let back: Page = serde_json::from_str(&json).unwrap();
    assert_eq!(back, page);
}
