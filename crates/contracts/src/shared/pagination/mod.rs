pub mod info_box;
pub mod page_result;

pub use info_box::*;
pub use page_result::*;
