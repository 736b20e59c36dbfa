//! Plain-text rendering of reports for the terminal.

use super::report::{ComparisonReport, DashboardReport};
use crate::aggregator::Activity;
use chrono::{Datelike, Utc, Weekday};
use std::fmt::Write;

/// Glyph per heatmap intensity level, 0 through 4
const LEVEL_GLYPHS: [char; 5] = ['.', '░', '▒', '▓', '█'];

/// Signed delta with an explicit "+" for zero and gains
pub fn format_delta(delta: i64) -> String {
    if delta >= 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

/// Heatmap intensity for a day's accepted count, 0 through 4
pub fn heatmap_level(count: u32) -> u8 {
    if count == 0 {
        0
    } else {
        count.div_ceil(2).min(4) as u8
    }
}

/// One row per weekday, one column per week, oldest on the left
pub fn render_heatmap(activity: &Activity) -> String {
    let mut rows: Vec<String> = vec![String::new(); 7];

    if let Some(first) = activity.heatmap.keys().next() {
        // pad the first column so rows line up by weekday
        let lead = first.weekday().num_days_from_monday() as usize;
        for row in rows.iter_mut().take(lead) {
            row.push(' ');
        }
    }

    for (date, count) in &activity.heatmap {
        let row = date.weekday().num_days_from_monday() as usize;
        rows[row].push(LEVEL_GLYPHS[heatmap_level(*count) as usize]);
    }

    let labels = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    labels
        .iter()
        .zip(rows)
        .map(|(day, row)| format!("{} {}", day, row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full dashboard summary
pub fn render_summary(report: &DashboardReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "DASHBOARD: {}", report.handle);
    let _ = writeln!(out, "{}", rule);

    if let Some(profile) = &report.profile {
        let _ = writeln!(
            out,
            "Rank:          {} (Max: {})",
            profile.rank.as_deref().unwrap_or("Unrated"),
            profile.max_rank.as_deref().unwrap_or("N/A")
        );
    }

    let rating = &report.rating;
    let _ = writeln!(
        out,
        "Rating:        {} (Max: {})",
        rating.current.map_or("N/A".to_string(), |r| r.to_string()),
        rating.max.map_or("N/A".to_string(), |r| r.to_string())
    );
    let _ = writeln!(out, "Contests:      {}", rating.contests);
    let _ = writeln!(out, "Weekly delta:  {}", format_delta(rating.weekly_delta));

    let streak = report.activity.streak;
    let _ = writeln!(out, "Streak:        {} (Max: {})", streak.current, streak.longest);

    let weekly = &report.histograms.weekly;
    let _ = writeln!(out, "Solved (7d):   {}", weekly.solved);
    let _ = writeln!(
        out,
        "Top tag (7d):  {}",
        weekly.top_tag.as_deref().unwrap_or("N/A")
    );

    let _ = writeln!(out, "\nTop tags:");
    for entry in &report.histograms.top_tags {
        let _ = writeln!(out, "  {:<28} {:>6}", entry.key, entry.count);
    }

    let _ = writeln!(out, "\nLanguages:");
    for entry in &report.histograms.languages {
        let _ = writeln!(out, "  {:<28} {:>6}", entry.key, entry.count);
    }

    let _ = writeln!(out, "\nDifficulty:");
    for bucket in &report.histograms.difficulty {
        let _ = writeln!(out, "  {:<28} {:>6}", bucket.rating, bucket.count);
    }

    let _ = writeln!(out, "\nActivity:");
    let _ = writeln!(out, "{}", render_heatmap(&report.activity));

    if report.skipped_records > 0 {
        let _ = writeln!(out, "\n({} malformed records skipped)", report.skipped_records);
    }
    let _ = write!(out, "{}", rule);

    out
}

/// Side-by-side table of a comparison
pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>10}",
        "date", report.handle, report.peer
    );

    let series = &report.series;
    let dates = series.label_dates(&Utc);
    for (i, ts) in series.labels.iter().enumerate() {
        let date = dates[i].map_or_else(|| ts.to_string(), |d| d.to_string());
        let _ = writeln!(
            out,
            "{:<12} {:>10} {:>10}",
            date,
            cell(series.series_a[i]),
            cell(series.series_b[i])
        );
    }

    out
}

fn cell(value: Option<i32>) -> String {
    value.map_or("-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Streak;
    use chrono::NaiveDate;

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(0), "+0");
        assert_eq!(format_delta(42), "+42");
        assert_eq!(format_delta(-17), "-17");
    }

    #[test]
    fn test_heatmap_level() {
        assert_eq!(heatmap_level(0), 0);
        assert_eq!(heatmap_level(1), 1);
        assert_eq!(heatmap_level(2), 1);
        assert_eq!(heatmap_level(3), 2);
        assert_eq!(heatmap_level(8), 4);
        assert_eq!(heatmap_level(50), 4);
    }

    #[test]
    fn test_render_heatmap_rows() {
        // 2024-01-01 is a Monday
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let heatmap = (0..8u64)
            .map(|i| (start + chrono::Days::new(i), i as u32))
            .collect();
        let activity = Activity {
            streak: Streak::default(),
            heatmap,
        };

        let rendered = render_heatmap(&activity);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Mon .█");
        assert_eq!(lines[6], "Sun ▓");
    }
}
