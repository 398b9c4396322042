//! Result classification and aggregation

mod category;
mod summary;

pub use category::{CATEGORY_RULES, Category, CategoryRule, classify, classify_with};
pub use summary::{
    Aggregate, CategoryStats, Coverage, Guidance, RunSummary, Verdict, aggregate,
    has_non_auth_failures, next_steps,
};
