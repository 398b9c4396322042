//! Request building helpers shared by the HTTP adapters.

mod endpoint;
mod form;

pub use endpoint::endpoint_url;
pub use form::{FormBuildError, build_form};
