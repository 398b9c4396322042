//! HTTP request domain types

mod body;
mod method;
mod spec;

pub use body::{FilePart, FormField, MultipartForm, Payload, RequestBody};
pub use method::HttpMethod;
pub use spec::TransportRequest;
