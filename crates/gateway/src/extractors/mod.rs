//! Request extractors.

mod path_params;
mod validated_json;

pub use path_params::{parse_date, parse_id};
pub use validated_json::ValidatedJson;
