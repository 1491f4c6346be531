//! Custom functions the app implements.
//!
//! Both are registered without automatic acknowledgement; the callbacks ack
//! once they're done.

pub mod filters;
pub mod search;

pub use filters::filters_callback;
pub use search::search_callback;

pub const SEARCH_FUNCTION: &str = "search";
pub const FILTERS_FUNCTION: &str = "filters";
