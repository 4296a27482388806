pub mod constants;
pub mod impose;
pub mod layout;
mod options;
mod preview;
pub mod render;
pub mod source;
mod stats;
mod types;
mod working_set;

pub use impose::{
    Composition, SkipReason, SkippedPlacement, compose, compose_with_timeout, impose,
    print_order, save_pdf,
};
pub use layout::{pad_to_group, plan_sheets, plan_signatures, signature_order};
pub use options::*;
pub use preview::{generate_preview, sheet_plan};
pub use source::{SourceKind, SourceStore, SourceUnit, extract_pages, load_source};
pub use stats::calculate_statistics;
pub use types::*;
pub use working_set::WorkingSet;
