//! The ordered page list a booklet is built from

use crate::impose::{Composition, impose};
use crate::layout::{filler_needed, plan_signatures};
use crate::options::ImpositionOptions;
use crate::source::{SourceStore, SourceUnit, extract_pages, load_source};
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;

/// Ordered pages together with the sources they refer to.
///
/// Mutations happen between compositions; [`WorkingSet::impose`] works on
/// a snapshot.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    pages: Vec<Page>,
    sources: SourceStore,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn sources(&self) -> &SourceStore {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Append every page of a source unit; returns the number of pages added
    pub fn ingest(&mut self, unit: SourceUnit) -> Result<usize> {
        let pages = extract_pages(&unit)?;
        let added = pages.len();
        self.sources.insert(unit);
        self.pages.extend(pages);
        Ok(added)
    }

    /// Load a file from disk and append its pages
    pub async fn ingest_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let unit = load_source(path).await?;
        log::debug!("Loaded {} as {:?}", path.display(), unit.kind);

        let (unit, pages) = tokio::task::spawn_blocking(move || {
            let pages = extract_pages(&unit)?;
            Ok::<_, ImposeError>((unit, pages))
        })
        .await??;

        let added = pages.len();
        self.sources.insert(unit);
        self.pages.extend(pages);
        Ok(added)
    }

    /// Append a blank page, returning its id
    pub fn add_filler(&mut self) -> PageId {
        let page = Page::filler();
        let id = page.id;
        self.pages.push(page);
        id
    }

    /// Insert a blank page at `index` (clamped to the end)
    pub fn insert_filler(&mut self, index: usize) -> PageId {
        let page = Page::filler();
        let id = page.id;
        self.pages.insert(index.min(self.pages.len()), page);
        id
    }

    /// Remove a page by id.
    ///
    /// The source stays in the store; other pages may still refer to it.
    pub fn remove(&mut self, id: PageId) -> Result<Page> {
        let position = self.position(id)?;
        Ok(self.pages.remove(position))
    }

    /// Move the page at `from` so it ends up at `to`
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.pages.len();
        if from >= len || to >= len {
            return Err(ImposeError::InvalidReorder(format!(
                "Cannot move page {} to {} in a working set of {} pages",
                from, to, len
            )));
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        Ok(())
    }

    /// Put the pages in the given order.
    ///
    /// `order` must name every page exactly once.
    pub fn reorder(&mut self, order: &[PageId]) -> Result<()> {
        let unique: HashSet<_> = order.iter().collect();
        if order.len() != self.pages.len() || unique.len() != order.len() {
            return Err(ImposeError::InvalidReorder(format!(
                "Reorder needs each of the {} pages exactly once, got {} ids",
                self.pages.len(),
                order.len()
            )));
        }

        let mut reordered = Vec::with_capacity(order.len());
        for &id in order {
            reordered.push(self.pages[self.position(id)?].clone());
        }
        self.pages = reordered;
        Ok(())
    }

    /// Append filler pages up to a whole number of signatures; returns how
    /// many were added
    pub fn pad_to_group(&mut self, group_size: usize) -> usize {
        let fillers = filler_needed(self.pages.len(), group_size);
        self.pages.extend((0..fillers).map(|_| Page::filler()));
        fillers
    }

    /// Pages in the order they will be printed.
    ///
    /// The working set itself is not changed.
    pub fn print_order(&self, layout: OutputLayout, group_size: usize) -> Vec<Page> {
        match layout {
            OutputLayout::TwoUp => plan_signatures(&self.pages, group_size),
            OutputLayout::SingleUp => self.pages.clone(),
        }
    }

    /// Drop all pages and sources
    pub fn clear(&mut self) {
        self.pages.clear();
        self.sources.clear();
    }

    /// Plan and compose the current pages
    pub async fn impose(&self, options: &ImpositionOptions) -> Result<Composition> {
        impose(&self.pages, &self.sources, options).await
    }

    fn position(&self, id: PageId) -> Result<usize> {
        self.pages
            .iter()
            .position(|page| page.id == id)
            .ok_or(ImposeError::PageNotFound(id))
    }
}
