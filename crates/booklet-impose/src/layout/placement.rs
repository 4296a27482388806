//! Content placement within sheet slots
//!
//! This module handles calculating the final position of page content
//! on an output sheet, accounting for:
//! - Bleed (all edges single-up; outer, top and bottom edges two-up)
//! - Scaling (fit inside the slot, or fill it)
//! - Alignment toward the fold for two-up sheets

use crate::types::ScalingMode;

use super::{PagePlacement, Rect, Slot};

/// The area a slot offers to its content after bleed is taken off.
///
/// The inner (fold) edge of a two-up slot carries no bleed, so facing
/// pages meet at the fold. The result may have a non-positive width or
/// height when the bleed is larger than the sheet.
pub fn slot_area(sheet: (f32, f32), slot: Slot, bleed: f32) -> Rect {
    let (sheet_width, sheet_height) = sheet;
    let half_width = sheet_width / 2.0;
    let height = sheet_height - 2.0 * bleed;

    match slot {
        Slot::Full => Rect::new(bleed, bleed, sheet_width - 2.0 * bleed, height),
        Slot::Left => Rect::new(bleed, bleed, half_width - bleed, height),
        Slot::Right => Rect::new(half_width, bleed, half_width - bleed, height),
    }
}

/// Calculate the uniform scale factor for a source of the given size.
///
/// `Fit` keeps the whole page inside the target; `Fill` covers the target
/// and lets the other dimension overflow.
pub fn calculate_scale(
    src_width: f32,
    src_height: f32,
    target_width: f32,
    target_height: f32,
    mode: ScalingMode,
) -> f32 {
    let scale_x = target_width / src_width;
    let scale_y = target_height / src_height;

    match mode {
        ScalingMode::Fit => scale_x.min(scale_y),
        ScalingMode::Fill => scale_x.max(scale_y),
    }
}

/// Place content of `native` size into a slot of the sheet.
///
/// Returns `None` when the slot has no room left after bleed, or when the
/// native size is degenerate.
pub fn place_in_slot(
    sheet: (f32, f32),
    slot: Slot,
    bleed: f32,
    native: (f32, f32),
    mode: ScalingMode,
) -> Option<PagePlacement> {
    let area = slot_area(sheet, slot, bleed);
    if area.is_empty() {
        return None;
    }

    let (src_width, src_height) = native;
    if !(src_width > 0.0 && src_height > 0.0) {
        return None;
    }

    let scale = calculate_scale(src_width, src_height, area.width, area.height, mode);
    let scaled_width = src_width * scale;
    let scaled_height = src_height * scale;

    // Two-up content hugs the fold; single-up content is centred
    let x = match slot {
        Slot::Full => area.x + (area.width - scaled_width) / 2.0,
        Slot::Left => area.right() - scaled_width,
        Slot::Right => area.x,
    };
    let y = area.y + (area.height - scaled_height) / 2.0;

    Some(PagePlacement {
        content_rect: Rect::new(x, y, scaled_width, scaled_height),
        scale,
    })
}
