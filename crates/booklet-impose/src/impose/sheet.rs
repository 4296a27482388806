//! Sheet assembly for composition
//!
//! The assembler is the only writer of the output document. It walks the
//! sheet plan in order, embeds each page's content once and records every
//! placement it has to skip.

use super::decode::{DecodedSource, DecodedSources};
use super::io::finalize_document;
use crate::constants::OUTPUT_PDF_VERSION;
use crate::layout::{SheetPlan, Slot, place_in_slot, slot_area};
use crate::render::{
    PlacedXObject, RasterImage, XObjectKind, create_image_xobject, create_page_xobject,
    page_media_box, render_sheet_page,
};
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;
use thiserror::Error;

/// Why a page was left off its sheet
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("source {0} is not in the source store")]
    MissingSource(SourceId),
    #[error("source could not be decoded: {0}")]
    Decode(String),
    #[error("page index {index} is out of range for a source with {count} pages")]
    PageIndexOutOfRange { index: usize, count: usize },
    #[error("content has a degenerate size of {width}x{height}")]
    DegenerateSize { width: f32, height: f32 },
    #[error("bleed leaves no room: available area is {max_width}x{max_height}")]
    GeometryInfeasible { max_width: f32, max_height: f32 },
}

/// A placement that was skipped; its slot stays blank
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPlacement {
    /// Zero-based output sheet index
    pub sheet: usize,
    pub slot: Slot,
    pub page: PageId,
    pub reason: SkipReason,
}

/// Geometry shared by every sheet of one composition
#[derive(Debug, Clone, Copy)]
pub(crate) struct SheetGeometry {
    pub size: (f32, f32),
    pub bleed: f32,
    pub scaling: ScalingMode,
}

/// Content located in a decoded source, not yet embedded
enum Resolved<'d> {
    Form {
        doc: &'d Document,
        page_id: ObjectId,
        media_box: [f32; 4],
    },
    Image(&'d RasterImage),
}

impl Resolved<'_> {
    fn native_size(&self) -> (f32, f32) {
        match self {
            Resolved::Form { media_box, .. } => {
                (media_box[2] - media_box[0], media_box[3] - media_box[1])
            }
            Resolved::Image(image) => image.native_size(),
        }
    }
}

/// Single writer building the output document sheet by sheet
pub(crate) struct Assembler<'a> {
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    decoded: &'a DecodedSources,
    geometry: SheetGeometry,
    // Source page ids in page-tree order
    page_ids: HashMap<SourceId, Vec<ObjectId>>,
    // Embedded XObjects, reused when the same content appears again
    forms: HashMap<(SourceId, ObjectId), ObjectId>,
    images: HashMap<SourceId, ObjectId>,
    // Per-source object copy caches for shared resources
    copies: HashMap<SourceId, HashMap<ObjectId, ObjectId>>,
    placed: usize,
    skipped: Vec<SkippedPlacement>,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(decoded: &'a DecodedSources, geometry: SheetGeometry) -> Self {
        let mut output = Document::with_version(OUTPUT_PDF_VERSION);
        let pages_tree_id = output.new_object_id();
        Self {
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            decoded,
            geometry,
            page_ids: HashMap::new(),
            forms: HashMap::new(),
            images: HashMap::new(),
            copies: HashMap::new(),
            placed: 0,
            skipped: Vec::new(),
        }
    }

    /// Append one output page for the sheet
    pub(crate) fn render_sheet(&mut self, sheet: &SheetPlan) {
        let mut placed = Vec::with_capacity(sheet.slots.len());

        for planned in &sheet.slots {
            let Some(page) = planned.page.as_ref() else {
                continue;
            };

            match self.place(page, planned.slot) {
                Ok(Some(item)) => placed.push(item),
                Ok(None) => {}
                Err(reason) => {
                    log::warn!(
                        "Skipping page {} on sheet {} ({:?}): {}",
                        page.id,
                        sheet.index + 1,
                        planned.slot,
                        reason
                    );
                    self.skipped.push(SkippedPlacement {
                        sheet: sheet.index,
                        slot: planned.slot,
                        page: page.id,
                        reason,
                    });
                }
            }
        }

        self.placed += placed.len();
        let (width, height) = self.geometry.size;
        let page_id = render_sheet_page(
            &mut self.output,
            self.pages_tree_id,
            width,
            height,
            &placed,
        );
        self.page_refs.push(Object::Reference(page_id));
    }

    /// Finish the page tree; returns the document, the number of placed
    /// pages and the skipped placements
    pub(crate) fn finish(mut self) -> (Document, usize, Vec<SkippedPlacement>) {
        finalize_document(&mut self.output, self.pages_tree_id, self.page_refs);
        (self.output, self.placed, self.skipped)
    }

    /// Place one page; filler pages place nothing
    fn place(
        &mut self,
        page: &Page,
        slot: Slot,
    ) -> std::result::Result<Option<PlacedXObject>, SkipReason> {
        let (source, index) = match page.content {
            PageContent::Document { source, index } => (source, Some(index)),
            PageContent::Image { source } => (source, None),
            PageContent::Filler => return Ok(None),
        };

        let area = slot_area(self.geometry.size, slot, self.geometry.bleed);
        if area.is_empty() {
            return Err(SkipReason::GeometryInfeasible {
                max_width: area.width,
                max_height: area.height,
            });
        }

        let resolved = self.resolve(source, index)?;
        let native = resolved.native_size();
        let placement = place_in_slot(
            self.geometry.size,
            slot,
            self.geometry.bleed,
            native,
            self.geometry.scaling,
        )
        .ok_or(SkipReason::DegenerateSize {
            width: native.0,
            height: native.1,
        })?;

        let (xobject_id, kind) = self.embed(source, resolved)?;
        Ok(Some(PlacedXObject {
            xobject_id,
            kind,
            placement,
        }))
    }

    /// Find the content a page refers to in the decoded sources.
    ///
    /// `index` is the page number for document pages and `None` for images.
    fn resolve(
        &mut self,
        source: SourceId,
        index: Option<usize>,
    ) -> std::result::Result<Resolved<'a>, SkipReason> {
        let decoded: &'a DecodedSources = self.decoded;

        let decoded_source = match decoded.get(&source) {
            None => return Err(SkipReason::MissingSource(source)),
            Some(Err(message)) => return Err(SkipReason::Decode(message.clone())),
            Some(Ok(decoded_source)) => decoded_source,
        };

        match (decoded_source, index) {
            (DecodedSource::Document(doc), Some(index)) => {
                let page_ids = self
                    .page_ids
                    .entry(source)
                    .or_insert_with(|| doc.get_pages().into_values().collect());
                let page_id = *page_ids.get(index).ok_or(SkipReason::PageIndexOutOfRange {
                    index,
                    count: page_ids.len(),
                })?;
                Ok(Resolved::Form {
                    doc,
                    page_id,
                    media_box: page_media_box(doc, page_id),
                })
            }
            (DecodedSource::Image(image), None) => Ok(Resolved::Image(image)),
            (DecodedSource::Document(_), None) => Err(SkipReason::Decode(
                "image page refers to a PDF source".to_string(),
            )),
            (DecodedSource::Image(_), Some(_)) => Err(SkipReason::Decode(
                "document page refers to an image source".to_string(),
            )),
        }
    }

    /// Embed resolved content once, reusing earlier XObjects
    fn embed(
        &mut self,
        source: SourceId,
        resolved: Resolved<'a>,
    ) -> std::result::Result<(ObjectId, XObjectKind), SkipReason> {
        match resolved {
            Resolved::Form {
                doc,
                page_id,
                media_box,
            } => {
                let kind = XObjectKind::Form {
                    origin: (media_box[0], media_box[1]),
                };
                if let Some(&id) = self.forms.get(&(source, page_id)) {
                    return Ok((id, kind));
                }
                let cache = self.copies.entry(source).or_default();
                let id = create_page_xobject(&mut self.output, doc, page_id, cache)
                    .map_err(|e| SkipReason::Decode(e.to_string()))?;
                self.forms.insert((source, page_id), id);
                Ok((id, kind))
            }
            Resolved::Image(image) => {
                let id = match self.images.get(&source) {
                    Some(&id) => id,
                    None => {
                        let id = create_image_xobject(&mut self.output, image);
                        self.images.insert(source, id);
                        id
                    }
                };
                Ok((id, XObjectKind::Image))
            }
        }
    }
}
