use std::fmt::Write;

use serde::Serialize;

use crate::data::filter::SummaryStats;
use crate::data::model::{PlayerRecord, COLUMNS};

/// Placeholder shown instead of a chart or table for an empty view.
pub const NO_DATA_MESSAGE: &str = "No data to display.";

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

/// The four headline metrics. Averages and percentages read `"0"` for an
/// empty view.
pub fn metric_cards(stats: &SummaryStats) -> [MetricCard; 4] {
    let empty = stats.count == 0;
    let fixed = |value: f64, decimals: usize| {
        if empty {
            "0".to_string()
        } else {
            format!("{value:.decimals$}")
        }
    };

    [
        MetricCard {
            label: "Total Players",
            value: stats.count.to_string(),
        },
        MetricCard {
            label: "Avg. Injury Risk (%)",
            value: fixed(stats.mean_injury_risk, 2),
        },
        MetricCard {
            label: "% Cleared for Play",
            value: fixed(stats.pct_cleared, 1),
        },
        MetricCard {
            label: "% Compliance Rate",
            value: fixed(stats.pct_compliant, 1),
        },
    ]
}

// ---------------------------------------------------------------------------
// Plain-text table
// ---------------------------------------------------------------------------

fn cells(record: &PlayerRecord) -> [String; 7] {
    [
        record.player_name.clone(),
        record.position.clone(),
        record.injury_risk.to_string(),
        record.recovery_score.to_string(),
        record.training_load.to_string(),
        record.cleared_for_play.to_string(),
        record.compliance_status.to_string(),
    ]
}

/// Fixed-width table of the seven columns, one line per row, with a leading
/// row index.
pub fn render_table<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let body: Vec<[String; 7]> = rows.into_iter().map(cells).collect();
    if body.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut widths = COLUMNS.map(str::len);
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let index_width = (body.len() - 1).to_string().len();

    let mut out = String::new();
    let _ = write!(out, "{:index_width$}", "");
    for (name, w) in COLUMNS.iter().zip(widths) {
        let _ = write!(out, "  {name:<w$}");
    }
    out.push('\n');
    for (i, row) in body.iter().enumerate() {
        let _ = write!(out, "{i:>index_width$}");
        for (cell, w) in row.iter().zip(widths) {
            let _ = write!(out, "  {cell:<w$}");
        }
        out.push('\n');
    }
    out
}
