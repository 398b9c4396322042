//! HTTP response domain types

mod body;
mod spec;

pub use body::ResponseBody;
pub use spec::TransportResponse;
