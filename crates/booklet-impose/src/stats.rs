use crate::constants::PAGES_PER_FOLDED_SHEET;
use crate::layout::filler_needed;
use crate::options::ImpositionOptions;
use crate::types::*;

/// Calculate statistics for the imposition of `page_count` pages
pub fn calculate_statistics(
    page_count: usize,
    options: &ImpositionOptions,
) -> Result<ImpositionStatistics> {
    if page_count == 0 {
        return Err(ImposeError::NoPages);
    }

    match options.layout {
        OutputLayout::TwoUp => Ok(calculate_two_up_stats(page_count, options)),
        OutputLayout::SingleUp => Ok(ImpositionStatistics {
            source_pages: page_count,
            filler_pages_added: 0,
            output_sheets: page_count,
            physical_sheets: None,
            signatures: None,
        }),
    }
}

fn calculate_two_up_stats(page_count: usize, options: &ImpositionOptions) -> ImpositionStatistics {
    let group = options.effective_group_size();
    let filler_pages_added = filler_needed(page_count, group);
    let padded_count = page_count + filler_pages_added;

    ImpositionStatistics {
        source_pages: page_count,
        filler_pages_added,
        // One output page per sheet side
        output_sheets: padded_count / 2,
        physical_sheets: Some(padded_count / PAGES_PER_FOLDED_SHEET),
        signatures: Some(padded_count / group),
    }
}
