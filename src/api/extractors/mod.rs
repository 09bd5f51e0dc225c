//! Custom extractors.

mod json;
mod path_id;

pub use json::ApiJson;
pub use path_id::parse_id;
