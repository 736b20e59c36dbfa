//! Report assembly and output.
//!
//! This module handles:
//! - Building dashboard and comparison reports from aggregates
//! - Writing and reading report JSON files
//! - Plain-text summaries for the terminal

pub mod json;
pub mod report;
pub mod summary;

// Re-export main functions
pub use json::{
    read_comparison, read_json, read_report, validate_output_path, write_comparison, write_report,
};
pub use report::{
    build_comparison, build_report, ComparisonReport, DashboardReport, DifficultyBucket,
    HistogramSummary, RatingSummary, ReportInput,
};
pub use summary::{format_delta, heatmap_level, render_comparison, render_heatmap, render_summary};
