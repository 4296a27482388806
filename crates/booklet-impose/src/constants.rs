//! Shared constants for booklet imposition
//!
//! This module centralizes magic numbers and constants used throughout
//! the planning and composition process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 2.83465;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Signatures
// =============================================================================

/// Pages carried by one folded sheet (front and back, two pages each)
pub const PAGES_PER_FOLDED_SHEET: usize = 4;

/// Group size used whenever the requested one is not a positive multiple of 4
pub const DEFAULT_GROUP_SIZE: usize = PAGES_PER_FOLDED_SHEET;

// =============================================================================
// Composition
// =============================================================================

/// Default bound on concurrent source decodes
pub const DEFAULT_MAX_CONCURRENT_DECODES: usize = 4;

/// PDF version of the composed document
pub const OUTPUT_PDF_VERSION: &str = "1.7";
