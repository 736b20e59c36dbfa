//! Countdown command implementation.
//!
//! Ticks a countdown to the next contest through a `DashboardSession`,
//! printing one line per tick.

use super::models::CountdownArgs;
use super::source::LazyClient;
use crate::session::DashboardSession;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::sync::mpsc;

/// Execute the countdown command
///
/// **Public** - main entry point called from main.rs
pub fn execute_countdown(args: CountdownArgs) -> Result<()> {
    let start_time = match args.start {
        Some(start) => start,
        None => next_contest_start(&mut LazyClient::new(args.api.clone()))?,
    };

    let (line_tx, line_rx) = mpsc::channel::<String>();
    let mut session = DashboardSession::new("");
    session.start_countdown(
        start_time,
        || Utc::now().timestamp(),
        move |line| {
            // receiver gone means the command is shutting down
            let _ = line_tx.send(line);
        },
    );

    let mut printed = 0u32;
    // the channel closes when the countdown ends on its own
    while let Ok(line) = line_rx.recv() {
        println!("{}", line);
        printed += 1;
        if args.ticks.is_some_and(|limit| printed >= limit) {
            break;
        }
    }

    session.stop_all();
    Ok(())
}

/// Start time of the soonest upcoming contest
///
/// **Private** - internal helper for execute_countdown
fn next_contest_start(api: &mut LazyClient) -> Result<i64> {
    let contests = api
        .get()?
        .upcoming_contests()
        .context("Failed to fetch contest list")?;

    let next = contests.first().context("No upcoming contests")?;
    let name = next
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or("unnamed contest");
    let start = next
        .get("startTimeSeconds")
        .and_then(|s| s.as_i64())
        .context("Upcoming contest has no start time")?;

    info!("Next contest: {} at {}", name, start);
    Ok(start)
}

/// Validate countdown arguments
pub fn validate_countdown_args(args: &CountdownArgs) -> Result<()> {
    if args.ticks == Some(0) {
        anyhow::bail!("ticks must be greater than 0");
    }
    if args.start.is_none() {
        super::analyze::validate_api_url(&args.api.base_url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_for_started_contest_returns() {
        let args = CountdownArgs {
            start: Some(0),
            ..Default::default()
        };
        assert!(execute_countdown(args).is_ok());
    }

    #[test]
    fn test_zero_ticks_rejected() {
        let args = CountdownArgs {
            start: Some(0),
            ticks: Some(0),
            ..Default::default()
        };
        assert!(validate_countdown_args(&args).is_err());
    }
}
