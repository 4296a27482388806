//! Layout data types for imposition
//!
//! These types represent the intermediate layout calculations between
//! signature ordering and PDF rendering.

use crate::types::Page;

/// Where a page sits on an output sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The whole sheet (single-up)
    Full,
    /// Left half, its right edge on the fold (two-up)
    Left,
    /// Right half, its left edge on the fold (two-up)
    Right,
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether anything can be drawn inside
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Final placement of a page on the output sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// Position and size of the scaled content in points
    pub content_rect: Rect,
    /// Uniform scale factor applied to the native size
    pub scale: f32,
}

/// One slot of a planned sheet
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSlot {
    pub slot: Slot,
    /// `None` only for the missing right page of an odd two-up tail
    pub page: Option<Page>,
}

/// What goes on one output sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    /// Zero-based sheet index in the output document
    pub index: usize,
    pub slots: Vec<PlannedSlot>,
}

impl SheetPlan {
    /// The page in the given slot, if any
    pub fn page(&self, slot: Slot) -> Option<&Page> {
        self.slots
            .iter()
            .find(|s| s.slot == slot)
            .and_then(|s| s.page.as_ref())
    }
}
