//! Static trigger catalog.
//!
//! Maps each trigger category to an ordered list of case-insensitive regex
//! rules and a single guidance tooltip. The catalog is plain data; the
//! scanner walks it generically.

mod category;
mod patterns;
mod tooltips;

pub use category::{ParseCategoryError, Severity, TriggerCategory};
pub use patterns::{all_patterns, patterns_for, PatternRule};
pub use tooltips::{tooltip, Tooltip};
