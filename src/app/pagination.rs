/// OMDb returns ten results per page.
pub const PAGE_SIZE: u32 = 10;

/// Most page numbers shown at once in the pagination control.
const WINDOW: u32 = 5;

pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

/// The visible page numbers: a window of at most five, centered on the
/// current page and clamped at the first and last page.
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total <= WINDOW {
        (1..=total).collect()
    } else if current <= 3 {
        (1..=WINDOW).collect()
    } else if current >= total - 2 {
        (total - WINDOW + 1..=total).collect()
    } else {
        (current - 2..=current + 2).collect()
    }
}
