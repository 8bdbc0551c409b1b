use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::filter::FilteredView;
use super::model::{ComplianceStatus, PlayerRecord};

/// Row count of the "top injury risk" chart.
pub const DEFAULT_TOP_N: usize = 10;

/// Suggested file name for the CSV download.
pub const EXPORT_FILE_NAME: &str = "filtered_players.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("writing CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("flushing CSV buffer")]
    Flush(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Rows by descending injury risk. Ties keep their view order.
pub fn sorted_by_injury_risk_desc(view: &FilteredView) -> Vec<&PlayerRecord> {
    let mut rows: Vec<&PlayerRecord> = view.rows.iter().collect();
    // `sort_by` is stable; numerically equal risks (0.0 and -0.0 included)
    // compare Equal. NaN never survives loading.
    rows.sort_by(|a, b| {
        b.injury_risk
            .partial_cmp(&a.injury_risk)
            .unwrap_or(Ordering::Equal)
    });
    rows
}

/// The `n` highest-risk rows, or all of them when fewer exist.
pub fn top_n_by_injury_risk(view: &FilteredView, n: usize) -> Vec<&PlayerRecord> {
    let mut rows = sorted_by_injury_risk_desc(view);
    rows.truncate(n);
    rows
}

// ---------------------------------------------------------------------------
// Long format for grouped bar charts
// ---------------------------------------------------------------------------

/// Numeric columns that can be compared side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonField {
    TrainingLoad,
    RecoveryScore,
}

impl ComparisonField {
    /// Default comparison: training load next to recovery score.
    pub const DEFAULT: [ComparisonField; 2] =
        [ComparisonField::TrainingLoad, ComparisonField::RecoveryScore];

    pub fn name(self) -> &'static str {
        match self {
            ComparisonField::TrainingLoad => "training_load",
            ComparisonField::RecoveryScore => "recovery_score",
        }
    }

    fn value(self, record: &PlayerRecord) -> f64 {
        match self {
            ComparisonField::TrainingLoad => record.training_load,
            ComparisonField::RecoveryScore => record.recovery_score,
        }
    }
}

impl fmt::Display for ComparisonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One (player, field, value) cell of the long table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeltedValue<'a> {
    pub player_name: &'a str,
    pub field: ComparisonField,
    pub value: f64,
}

/// Reshape each row into one record per field: row order first, then the
/// order of `fields` within each row.
pub fn melt_for_comparison<'a>(
    view: &'a FilteredView,
    fields: &[ComparisonField],
) -> Vec<MeltedValue<'a>> {
    view.rows
        .iter()
        .flat_map(|record| {
            fields.iter().map(move |&field| MeltedValue {
                player_name: &record.player_name,
                field,
                value: field.value(record),
            })
        })
        .collect()
}

/// Pie chart slices: count per compliance status, in order of first
/// appearance. Statuses that do not occur are left out.
pub fn compliance_distribution(view: &FilteredView) -> Vec<(ComplianceStatus, usize)> {
    let mut slices: Vec<(ComplianceStatus, usize)> = Vec::new();
    for record in &view.rows {
        match slices.iter_mut().find(|(status, _)| *status == record.compliance_status) {
            Some((_, count)) => *count += 1,
            None => slices.push((record.compliance_status, 1)),
        }
    }
    slices
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Render rows as UTF-8 CSV with the seven-column header.
///
/// The header is written even when there are no rows.
pub fn serialize_csv<'a, I>(rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(super::model::COLUMNS)?;
    for record in rows {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.into_error()))
}
