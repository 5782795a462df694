//! Pagination state owned by one controller.

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TOTAL_ROW: u64 = 0;
pub const DEFAULT_PAGE_BAR_SIZE: u32 = 5;

/// Current page, page size and total record count.
///
/// Raw input is signed because it comes from attributes and server
/// responses; every setter normalizes it so the state never holds a zero
/// page number or page size. `total_page` is always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_number: u32,
    page_size: u32,
    total_row: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            total_row: DEFAULT_TOTAL_ROW,
        }
    }
}

impl PaginationState {
    pub fn new(page_number: i64, page_size: i64, total_row: i64) -> Self {
        let mut state = Self::default();
        state.reconcile(page_number, page_size, total_row);
        state
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_row(&self) -> u64 {
        self.total_row
    }

    /// `ceil(total_row / page_size)`; zero iff there are no rows.
    pub fn total_page(&self) -> u32 {
        let pages = self.total_row.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Page number bounded to `[1, total_page]`, or 1 when there are no pages.
    pub fn clamped_page(&self) -> u32 {
        self.page_number.clamp(1, self.total_page().max(1))
    }

    pub fn set_page_number(&mut self, raw: i64) {
        self.page_number = positive_or(raw, DEFAULT_PAGE_NUMBER);
    }

    pub fn set_page_size(&mut self, raw: i64) {
        self.page_size = positive_or(raw, DEFAULT_PAGE_SIZE);
    }

    pub fn set_total_row(&mut self, raw: i64) {
        self.total_row = u64::try_from(raw).unwrap_or(DEFAULT_TOTAL_ROW);
    }

    /// Overwrite all three fields with values the server reported.
    pub fn reconcile(&mut self, page_number: i64, page_size: i64, total_row: i64) {
        self.set_page_number(page_number);
        self.set_page_size(page_size);
        self.set_total_row(total_row);
    }
}

/// Values that would be replaced by a default when normalized.
pub(crate) fn is_valid_positive(raw: i64) -> bool {
    raw > 0 && u32::try_from(raw).is_ok()
}

fn positive_or(raw: i64, default: u32) -> u32 {
    if raw <= 0 {
        return default;
    }
    u32::try_from(raw).unwrap_or(u32::MAX)
}
