//! Countdown text for the next contest.

/// Render the countdown for `remaining_secs` until the contest starts
pub fn format_countdown(remaining_secs: i64) -> String {
    if remaining_secs <= 0 {
        return "Contest Started!".to_string();
    }

    let hours = remaining_secs / 3600;
    let minutes = (remaining_secs % 3600) / 60;
    let seconds = remaining_secs % 60;

    format!(
        "Next Contest In: {:02}:{:02}:{:02}",
        hours, minutes, seconds
    )
}
