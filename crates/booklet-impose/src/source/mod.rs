//! Source files and the pages extracted from them
//!
//! A source unit is a PDF or a PNG/JPEG image held as read-only bytes.
//! The store maps source ids to units and is handed to the compositor;
//! the bytes are never modified.

mod extract;

pub use extract::{extract_pages, load_source};

use crate::types::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Kind of content a source unit holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceKind {
    /// Paginated document (PDF)
    Document,
    /// Single raster image (PNG or JPEG)
    Image,
}

impl SourceKind {
    /// Detect the kind from the leading bytes.
    ///
    /// Image signatures sit at offset zero and win over a `%PDF-` marker
    /// found further in, which may just be metadata text.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Png) | Ok(image::ImageFormat::Jpeg) => Some(SourceKind::Image),
            Ok(_) => None,
            Err(_) if is_pdf(bytes) => Some(SourceKind::Document),
            Err(_) => None,
        }
    }
}

/// PDF files may carry a little junk before the header
fn is_pdf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    head.windows(5).any(|w| w == b"%PDF-")
}

/// An ingested source file
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub id: SourceId,
    pub kind: SourceKind,
    /// Display name, usually the file name
    pub name: Option<String>,
    pub bytes: Arc<[u8]>,
}

impl SourceUnit {
    /// Wrap bytes whose kind is already known
    pub fn new(kind: SourceKind, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: SourceId::new(),
            kind,
            name: None,
            bytes: bytes.into(),
        }
    }

    /// Wrap bytes, detecting the kind from their content
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>, name: Option<String>) -> Result<Self> {
        let bytes = bytes.into();
        let kind = SourceKind::detect(&bytes).ok_or_else(|| {
            ImposeError::UnsupportedSource(
                name.clone()
                    .unwrap_or_else(|| format!("{} bytes of unknown content", bytes.len())),
            )
        })?;
        Ok(Self {
            id: SourceId::new(),
            kind,
            name,
            bytes,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Source bytes available to a composition, keyed by source id
#[derive(Debug, Clone, Default)]
pub struct SourceStore {
    units: HashMap<SourceId, SourceUnit>,
}

impl SourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit, returning its id
    pub fn insert(&mut self, unit: SourceUnit) -> SourceId {
        let id = unit.id;
        self.units.insert(id, unit);
        id
    }

    pub fn get(&self, id: SourceId) -> Option<&SourceUnit> {
        self.units.get(&id)
    }

    pub fn remove(&mut self, id: SourceId) -> Option<SourceUnit> {
        self.units.remove(&id)
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }
}
