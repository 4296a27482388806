//! Booklet composition - placing pages onto output sheets
//!
//! This module orchestrates the composition process:
//! 1. Order pages for printing (signature order for two-up)
//! 2. Split the order into sheets
//! 3. Decode the referenced sources concurrently
//! 4. Assemble sheets in order on a single writer and serialize the PDF

mod decode;
mod io;
mod sheet;

pub use io::save_pdf;
pub use sheet::{SkipReason, SkippedPlacement};

use crate::layout::{plan_sheets, plan_signatures};
use crate::options::ImpositionOptions;
use crate::source::SourceStore;
use crate::types::*;
use decode::decode_sources;
use io::document_to_bytes;
use sheet::{Assembler, SheetGeometry};
use std::time::Duration;

/// Result of a composition
#[derive(Debug, Clone)]
pub struct Composition {
    /// Serialized PDF
    pub bytes: Vec<u8>,
    /// Number of output sheets (PDF pages)
    pub sheets: usize,
    /// Number of pages drawn onto sheets
    pub placed: usize,
    /// Placements that were skipped, in sheet order
    pub skipped: Vec<SkippedPlacement>,
}

/// Pages in the order they are composed: signature order for two-up,
/// unchanged for single-up
pub fn print_order(pages: &[Page], options: &ImpositionOptions) -> Vec<Page> {
    match options.layout {
        OutputLayout::TwoUp => plan_signatures(pages, options.group_size),
        OutputLayout::SingleUp => pages.to_vec(),
    }
}

/// Plan and compose in one step
pub async fn impose(
    pages: &[Page],
    sources: &SourceStore,
    options: &ImpositionOptions,
) -> Result<Composition> {
    let order = print_order(pages, options);
    compose(&order, sources, options).await
}

/// Compose pages that are already in final printing order.
///
/// Per-page problems (missing or undecodable source, no room left by the
/// bleed) leave the slot blank and are reported in
/// [`Composition::skipped`]; only configuration, task or serialization
/// failures abort.
pub async fn compose(
    pages: &[Page],
    sources: &SourceStore,
    options: &ImpositionOptions,
) -> Result<Composition> {
    options.validate()?;

    if pages.is_empty() {
        return Err(ImposeError::NoPages);
    }

    // Snapshot the inputs; nothing below sees later changes
    let pages = pages.to_vec();
    let options = options.clone();

    let decoded = decode_sources(&pages, sources, options.max_concurrent_decodes).await?;

    tokio::task::spawn_blocking(move || -> Result<Composition> {
        let geometry = SheetGeometry {
            size: options.sheet_dimensions_pt(),
            bleed: options.bleed_pt(),
            scaling: options.scaling_mode(),
        };
        let sheets = plan_sheets(&pages, options.layout);
        log::debug!(
            "Composing {} pages onto {} {:?} sheets",
            pages.len(),
            sheets.len(),
            options.layout
        );

        let mut assembler = Assembler::new(&decoded, geometry);
        for sheet in &sheets {
            assembler.render_sheet(sheet);
        }
        let (document, placed, skipped) = assembler.finish();

        Ok(Composition {
            bytes: document_to_bytes(document)?,
            sheets: sheets.len(),
            placed,
            skipped,
        })
    })
    .await?
}

/// [`compose`] bounded by a timeout.
///
/// On expiry nothing is returned; the partially built document is dropped.
pub async fn compose_with_timeout(
    pages: &[Page],
    sources: &SourceStore,
    options: &ImpositionOptions,
    timeout: Duration,
) -> Result<Composition> {
    tokio::time::timeout(timeout, compose(pages, sources, options))
        .await
        .map_err(|_| ImposeError::Timeout(timeout))?
}
