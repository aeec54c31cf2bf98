pub mod doh_json;

pub use doh_json::{parse_answer, DohJsonResolver, DNS_JSON_CONTENT_TYPE};
