use crate::impose::{Composition, compose, print_order};
use crate::layout::{SheetPlan, plan_sheets};
use crate::options::ImpositionOptions;
use crate::source::SourceStore;
use crate::types::*;

/// The sheets a composition would produce, without rendering anything
pub fn sheet_plan(pages: &[Page], options: &ImpositionOptions) -> Vec<SheetPlan> {
    plan_sheets(&print_order(pages, options), options.layout)
}

/// Generate a preview of the imposition
/// Composes only the first `max_sheets` sheets of the print order
pub async fn generate_preview(
    pages: &[Page],
    sources: &SourceStore,
    options: &ImpositionOptions,
    max_sheets: usize,
) -> Result<Composition> {
    if max_sheets == 0 {
        return Err(ImposeError::Config(
            "Preview needs at least one sheet".to_string(),
        ));
    }

    let order = print_order(pages, options);
    let limit = (max_sheets * options.layout.pages_per_sheet()).min(order.len());
    compose(&order[..limit], sources, options).await
}
