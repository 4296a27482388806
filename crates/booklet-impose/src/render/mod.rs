//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Creating Form XObjects from source pages
//! - Decoding raster images into Image XObjects
//! - Building output sheet pages
//! - Deep copying PDF objects

mod page;
mod raster;
mod xobject;

pub use page::*;
pub use raster::{RasterImage, create_image_xobject};
pub use xobject::{copy_object_deep, create_page_xobject, get_page_dimensions, page_media_box};
