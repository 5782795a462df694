//! Markup-mode wire contract.
//!
//! A server answering in markup mode embeds a hidden "pagination info box"
//! in the returned document. The box is found by its class; the three
//! fields inside it by their ids, each carrying a decimal integer in its
//! `value` attribute.

use std::fmt;

/// Class marking the pagination info box
pub const INFO_BOX_CLASS: &str = "paginationInfoBox";

/// One of the three hidden fields of the info box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    PageNumber,
    PageSize,
    TotalRow,
}

impl InfoField {
    pub const ALL: [InfoField; 3] = [
        InfoField::PageNumber,
        InfoField::PageSize,
        InfoField::TotalRow,
    ];

    /// Element id of the hidden field
    pub fn element_id(self) -> &'static str {
        match self {
            InfoField::PageNumber => "bPagePageNumber",
            InfoField::PageSize => "bPagePageSize",
            InfoField::TotalRow => "bPageTotalRow",
        }
    }
}

impl fmt::Display for InfoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InfoField::PageNumber => "page number",
            InfoField::PageSize => "page size",
            InfoField::TotalRow => "total row",
        };
        f.write_str(name)
    }
}

/// Render a conforming info box for a server-side page.
pub fn render_info_box(page_number: u32, page_size: u32, total_row: u64) -> String {
    let values = [u64::from(page_number), u64::from(page_size), total_row];
    let fields: String = InfoField::ALL
        .iter()
        .zip(values)
        .map(|(field, value)| {
            format!(
                r#"<input type="hidden" id="{}" value="{}"/>"#,
                field.element_id(),
                value
            )
        })
        .collect();
    format!(r#"<div class="{INFO_BOX_CLASS}" style="display:none">{fields}</div>"#)
}
