//! OmniCheck - OmniChat API conformance checker
//!
//! Command-line front end: argument parsing, the run report and its text
//! and JSON renderings. The binary in `main.rs` wires these to the
//! application layer.

pub mod cli;
pub mod render;
pub mod report;

pub use cli::{Cli, OutputFormat};
pub use render::TextReport;
pub use report::RunReport;
