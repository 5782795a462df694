//! Page-window math and first/prev/next/last target resolution.

/// Where a page-bar control leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Control is greyed out; activating it does nothing
    Disabled,
    Page(u32),
}

impl NavTarget {
    pub fn is_enabled(self) -> bool {
        matches!(self, NavTarget::Page(_))
    }
}

/// Inclusive range of page numbers shown in the bar. Empty when `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    pub const EMPTY: PageWindow = PageWindow { start: 1, end: 0 };

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Compute the sliding window of page numbers.
///
/// The current page stays centered except near either end, where the
/// window is pinned to `1` or `total_page`.
pub fn page_window(page_number: u32, total_page: u32, page_bar_size: u32) -> PageWindow {
    if total_page == 0 {
        return PageWindow::EMPTY;
    }
    let bar = page_bar_size.max(1);
    let page = page_number.clamp(1, total_page);
    let half = bar / 2;

    let (start, end) = if total_page < bar {
        (1, total_page)
    } else if page <= half {
        (1, bar)
    } else if page >= total_page - half {
        (total_page - bar + 1, total_page)
    } else {
        (page - half, page - half + bar - 1)
    };
    PageWindow { start, end }
}

/// Targets of the four fixed controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub first: NavTarget,
    pub prev: NavTarget,
    pub next: NavTarget,
    pub last: NavTarget,
}

impl Controls {
    pub fn resolve(page_number: u32, total_page: u32) -> Self {
        let page = page_number.clamp(1, total_page.max(1));

        let (first, prev) = if page == 1 {
            (NavTarget::Disabled, NavTarget::Disabled)
        } else {
            (NavTarget::Page(1), NavTarget::Page((page - 1).max(1)))
        };

        let (next, last) = if total_page == 0 || page == total_page {
            (NavTarget::Disabled, NavTarget::Disabled)
        } else {
            (
                NavTarget::Page((page + 1).min(total_page)),
                NavTarget::Page(total_page),
            )
        };

        Self {
            first,
            prev,
            next,
            last,
        }
    }

    pub fn all_disabled(&self) -> bool {
        [self.first, self.prev, self.next, self.last]
            .iter()
            .all(|target| !target.is_enabled())
    }
}
