//! Layout calculation modules for imposition
//!
//! This module handles all the geometric and ordering calculations:
//! - Signature planning (padding and sheet-printing order)
//! - Sheet planning (which page goes in which slot)
//! - Content placement (bleed, alignment, scaling)

mod placement;
mod signature;
mod types;

pub use placement::*;
pub use signature::*;
pub use types::*;
