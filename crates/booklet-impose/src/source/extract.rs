//! Page extraction and source loading

use super::{SourceKind, SourceUnit};
use crate::render::get_page_dimensions;
use crate::types::*;
use lopdf::Document;
use std::io::Cursor;
use std::path::Path;

/// Load a source file from disk and detect its kind
pub async fn load_source(path: impl AsRef<Path>) -> Result<SourceUnit> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| Some(path.display().to_string()));
    SourceUnit::from_bytes(bytes, name)
}

/// Extract one page per PDF page, or a single page for an image.
///
/// Pages carry their native size in points: the MediaBox for PDF pages
/// and the pixel dimensions for images.
pub fn extract_pages(unit: &SourceUnit) -> Result<Vec<Page>> {
    match unit.kind {
        SourceKind::Document => extract_document_pages(unit),
        SourceKind::Image => extract_image_page(unit).map(|page| vec![page]),
    }
}

fn extract_document_pages(unit: &SourceUnit) -> Result<Vec<Page>> {
    let doc = Document::load_mem(&unit.bytes)?;
    let pages = doc
        .get_pages()
        .into_values()
        .enumerate()
        .map(|(index, page_id)| {
            let (width, height) = get_page_dimensions(&doc, page_id)?;
            Ok(Page::document(unit.id, index, width, height))
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Extracted {} pages from {}",
        pages.len(),
        unit.name.as_deref().unwrap_or("document")
    );
    Ok(pages)
}

fn extract_image_page(unit: &SourceUnit) -> Result<Page> {
    let (width, height) = image::ImageReader::new(Cursor::new(&unit.bytes[..]))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(Page::image(unit.id, width as f32, height as f32))
}
