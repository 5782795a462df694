//! Reading the pagination info box out of a markup-mode response.

use contracts::shared::pagination::{InfoField, INFO_BOX_CLASS};
use scraper::{ElementRef, Html};

use super::error::ExtractionError;

/// Authoritative pagination values reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedPageInfo {
    pub page_number: i64,
    pub page_size: i64,
    pub total_row: i64,
}

/// Find the first info box in `markup` and read its three hidden fields.
pub fn extract_page_info(markup: &str) -> Result<ExtractedPageInfo, ExtractionError> {
    let fragment = Html::parse_fragment(markup);
    let info_box = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|class| class == INFO_BOX_CLASS))
        .ok_or(ExtractionError::MissingInfoBox)?;

    Ok(ExtractedPageInfo {
        page_number: read_field(info_box, InfoField::PageNumber)?,
        page_size: read_field(info_box, InfoField::PageSize)?,
        total_row: read_field(info_box, InfoField::TotalRow)?,
    })
}

fn read_field(info_box: ElementRef<'_>, field: InfoField) -> Result<i64, ExtractionError> {
    let value = info_box
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().id() == Some(field.element_id()))
        .and_then(|el| el.value().attr("value"))
        .ok_or(ExtractionError::MissingField { field })?;

    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ExtractionError::NotNumeric {
            field,
            value: value.to_string(),
        })
}
