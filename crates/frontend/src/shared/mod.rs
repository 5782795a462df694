pub mod api_utils;
pub mod components;
pub mod page_bar;

pub use page_bar::{initialize, MountedPageBar};
