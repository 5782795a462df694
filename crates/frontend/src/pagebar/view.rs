//! What the page bar shows, and the seam to whatever draws it.

use std::rc::Rc;

use super::config::PageBarConfig;
use super::state::PaginationState;
use super::window::{page_window, Controls, NavTarget, PageWindow};

/// Everything needed to draw the page bar once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBarModel {
    pub window: PageWindow,
    pub active_page: u32,
    pub controls: Controls,
    pub page_number: u32,
    pub total_page: u32,
    pub total_row: u64,
    pub page_size: u32,
    pub page_size_menu: Vec<u32>,
    pub class_name: Option<String>,
}

impl PageBarModel {
    pub fn build(state: &PaginationState, config: &PageBarConfig) -> Self {
        let total_page = state.total_page();
        let active_page = state.clamped_page();
        Self {
            window: page_window(active_page, total_page, config.page_bar_size()),
            active_page,
            controls: Controls::resolve(active_page, total_page),
            page_number: state.page_number(),
            total_page,
            total_row: state.total_row(),
            page_size: state.page_size(),
            page_size_menu: config.page_size_menu().to_vec(),
            class_name: config.class_name().map(str::to_string),
        }
    }

    /// Page links with their targets; the active page is not clickable.
    pub fn page_links(&self) -> impl Iterator<Item = (u32, NavTarget)> + '_ {
        self.window.pages().map(move |page| {
            let target = if page == self.active_page {
                NavTarget::Disabled
            } else {
                NavTarget::Page(page)
            };
            (page, target)
        })
    }

    pub fn info_line(&self) -> String {
        format!(
            "Page {}/{} ({} records)",
            self.page_number, self.total_page, self.total_row
        )
    }
}

/// Draws the page bar and places server-rendered markup.
pub trait PageBarView {
    fn render(&self, model: PageBarModel);

    /// Replace the content of the element matching `target` with `markup`.
    fn inject_markup(&self, target: &str, markup: &str);
}

impl<V: PageBarView + ?Sized> PageBarView for Rc<V> {
    fn render(&self, model: PageBarModel) {
        (**self).render(model)
    }

    fn inject_markup(&self, target: &str, markup: &str) {
        (**self).inject_markup(target, markup)
    }
}
