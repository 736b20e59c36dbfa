//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod compare;
pub mod countdown;
pub mod models;
pub mod source;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_analyze_args};
pub use compare::{execute_compare, validate_compare_args};
pub use countdown::{execute_countdown, validate_countdown_args};
pub use models::{AnalyzeArgs, ApiSettings, CompareArgs, CountdownArgs};
pub use utils::{display_schema, display_version, validate_report_file};
