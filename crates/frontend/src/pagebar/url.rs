//! Query construction for navigation mode and async requests.

use contracts::shared::pagination::{PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM};

use super::config::Params;

/// Destination for a full-page navigation, or `None` without a base URL.
///
/// Extra parameters are appended raw, in provider order.
pub fn navigation_url(base: &str, page_number: u32, page_size: u32, extra: &Params) -> Option<String> {
    if base.is_empty() {
        return None;
    }
    let mut url = format!(
        "{base}?1=1&{PAGE_NUMBER_PARAM}={page_number}&{PAGE_SIZE_PARAM}={page_size}"
    );
    for (key, value) in extra {
        url.push('&');
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
    Some(url)
}

/// `{pageNumber, pageSize}` followed by the provider's parameters.
///
/// A provider key equal to one of the pagination keys replaces its value
/// in place.
pub fn request_params(page_number: u32, page_size: u32, extra: Params) -> Params {
    let mut params = Params::with_capacity(extra.len() + 2);
    params.insert(PAGE_NUMBER_PARAM.to_string(), page_number.to_string());
    params.insert(PAGE_SIZE_PARAM.to_string(), page_size.to_string());
    params.extend(extra);
    params
}
