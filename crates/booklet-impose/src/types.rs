use std::fmt;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),
    #[error("Page {0} is not in the working set")]
    PageNotFound(PageId),
    #[error("Invalid page move or reorder: {0}")]
    InvalidReorder(String),
    #[error("Composition timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Identifier of a page in a working set.
///
/// Stays the same when the page is reordered or passed through the
/// signature planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageId(Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an ingested source file (PDF or image)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceId(Uuid);

impl SourceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a page draws onto its sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageContent {
    /// A page of a paginated source (PDF), zero-based
    Document { source: SourceId, index: usize },
    /// A single raster image
    Image { source: SourceId },
    /// Blank placeholder used to reach a full signature
    Filler,
}

/// Coarse classification of a page, without its source reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Document,
    Image,
    Filler,
}

/// The unit of imposition
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    pub id: PageId,
    pub content: PageContent,
    /// Intrinsic (width, height) in points; `None` for filler pages
    pub native_size: Option<(f32, f32)>,
}

impl Page {
    /// A page taken from a paginated source
    pub fn document(source: SourceId, index: usize, width: f32, height: f32) -> Self {
        Self {
            id: PageId::new(),
            content: PageContent::Document { source, index },
            native_size: Some((width, height)),
        }
    }

    /// A page made of one raster image
    pub fn image(source: SourceId, width: f32, height: f32) -> Self {
        Self {
            id: PageId::new(),
            content: PageContent::Image { source },
            native_size: Some((width, height)),
        }
    }

    /// A freshly minted blank page
    pub fn filler() -> Self {
        Self {
            id: PageId::new(),
            content: PageContent::Filler,
            native_size: None,
        }
    }

    pub fn kind(&self) -> PageKind {
        match self.content {
            PageContent::Document { .. } => PageKind::Document,
            PageContent::Image { .. } => PageKind::Image,
            PageContent::Filler => PageKind::Filler,
        }
    }

    pub fn is_filler(&self) -> bool {
        matches!(self.content, PageContent::Filler)
    }

    /// The originating source, `None` for filler pages
    pub fn source_id(&self) -> Option<SourceId> {
        match self.content {
            PageContent::Document { source, .. } | PageContent::Image { source } => Some(source),
            PageContent::Filler => None,
        }
    }

    /// Zero-based position within the source, `None` for filler pages.
    /// Images always report index 0.
    pub fn source_index(&self) -> Option<usize> {
        match self.content {
            PageContent::Document { index, .. } => Some(index),
            PageContent::Image { .. } => Some(0),
            PageContent::Filler => None,
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// How pages are laid onto output sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputLayout {
    /// One page per portrait sheet, in working-set order
    SingleUp,
    /// Two pages side by side on a landscape sheet, in signature order
    #[default]
    TwoUp,
}

impl OutputLayout {
    /// Orientation of the reference paper for this layout
    pub fn orientation(self) -> Orientation {
        match self {
            OutputLayout::SingleUp => Orientation::Portrait,
            OutputLayout::TwoUp => Orientation::Landscape,
        }
    }

    /// Number of pages placed on each output sheet
    pub fn pages_per_sheet(self) -> usize {
        match self {
            OutputLayout::SingleUp => 1,
            OutputLayout::TwoUp => 2,
        }
    }
}

/// Page scaling behavior when source pages don't match the slot size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingMode {
    /// Fit page to available space (preserve aspect ratio)
    Fit,
    /// Fill available space (may crop)
    Fill,
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Pages in the working set, filler included
    pub source_pages: usize,
    /// Filler pages the planner appends
    pub filler_pages_added: usize,
    /// Output PDF pages (one per sheet side)
    pub output_sheets: usize,
    /// Folded physical sheets (two-up only)
    pub physical_sheets: Option<usize>,
    /// Number of signatures (two-up only)
    pub signatures: Option<usize>,
}
