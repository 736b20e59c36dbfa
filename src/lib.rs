//! Contest Pulse
//!
//! Analytics core for a competitive-programming dashboard: rating
//! history, activity streaks, submission histograms and peer
//! comparisons.
//!
//! This crate provides the core implementation for the
//! `contest-pulse` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! contest-pulse analyze --handle tourist --summary
//! contest-pulse compare --handle tourist --peer Petr --table
//! ```
//!
//! Every aggregator takes the reference time as an argument, so the same
//! inputs always produce the same report.

pub mod aggregator;
pub mod api;
pub mod commands;
pub mod output;
pub mod parser;
pub mod session;
pub mod utils;
