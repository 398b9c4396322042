//! Authentication mode resolution.

mod resolver;

pub use resolver::{Credentials, ResolvedAuth};
