//! Application use cases (business logic orchestration).

mod run_catalogue;

pub use run_catalogue::{RunCatalogue, RunContext, apply_auth_hints};
