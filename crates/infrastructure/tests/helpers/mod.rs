pub mod http_stub;

pub use http_stub::*;
