use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{ComplianceStatus, Dataset, PlayerRecord};

/// Selector label meaning "no position filter".
pub const ALL_POSITIONS: &str = "All";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("position '{position}' does not occur in the dataset")]
pub struct InvalidFilterError {
    pub position: String,
}

// ---------------------------------------------------------------------------
// FilterSpec – the filter choices of one interaction
// ---------------------------------------------------------------------------

/// Position selector: everything, or exactly one position value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PositionFilter {
    #[default]
    All,
    Only(String),
}

impl PositionFilter {
    fn matches(&self, record: &PlayerRecord) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Only(position) => record.position == *position,
        }
    }
}

impl From<&str> for PositionFilter {
    fn from(label: &str) -> Self {
        if label == ALL_POSITIONS {
            PositionFilter::All
        } else {
            PositionFilter::Only(label.to_string())
        }
    }
}

impl From<String> for PositionFilter {
    fn from(label: String) -> Self {
        if label == ALL_POSITIONS {
            PositionFilter::All
        } else {
            PositionFilter::Only(label)
        }
    }
}

impl From<PositionFilter> for String {
    fn from(filter: PositionFilter) -> Self {
        match filter {
            PositionFilter::All => ALL_POSITIONS.to_string(),
            PositionFilter::Only(position) => position,
        }
    }
}

impl FromStr for PositionFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PositionFilter::from(s))
    }
}

impl fmt::Display for PositionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionFilter::All => f.pad(ALL_POSITIONS),
            PositionFilter::Only(position) => f.pad(position),
        }
    }
}

/// Active filters. The default has every filter switched off.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub position: PositionFilter,
    /// Keep only players with injury risk above 70.
    pub min_injury_risk_only: bool,
    /// Keep only `Non-Compliant` players.
    pub non_compliant_only: bool,
}

// ---------------------------------------------------------------------------
// FilteredView – surviving rows plus summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean_injury_risk: f64,
    /// Percentage (0–100) of rows cleared for play.
    pub pct_cleared: f64,
    /// Percentage (0–100) of compliant rows.
    pub pct_compliant: f64,
}

impl SummaryStats {
    /// All statistics are 0 for an empty slice.
    pub fn from_rows(rows: &[PlayerRecord]) -> Self {
        if rows.is_empty() {
            return SummaryStats::default();
        }
        let n = rows.len() as f64;
        let risk_sum: f64 = rows.iter().map(|r| r.injury_risk).sum();
        let cleared = rows.iter().filter(|r| r.is_cleared()).count() as f64;
        let compliant = rows.iter().filter(|r| r.is_compliant()).count() as f64;

        SummaryStats {
            count: rows.len(),
            mean_injury_risk: risk_sum / n,
            pct_cleared: 100.0 * cleared / n,
            pct_compliant: 100.0 * compliant / n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilteredView {
    /// Surviving rows in dataset order.
    pub rows: Vec<PlayerRecord>,
    pub stats: SummaryStats,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Apply every active predicate of `spec` to `dataset`.
///
/// Stages run in a fixed order: position, injury risk, compliance. Each is a
/// stable retain, so surviving rows keep their dataset order. A position that
/// does not occur in the dataset yields an empty view rather than an error;
/// use [`apply_checked`] to reject it instead.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> FilteredView {
    let mut rows: Vec<PlayerRecord> = dataset.records().to_vec();

    if let PositionFilter::Only(position) = &spec.position {
        if !dataset.has_position(position) {
            log::warn!("position filter '{position}' matches no players");
        }
        rows.retain(|r| spec.position.matches(r));
        log::debug!("position == {position}: {} rows", rows.len());
    }

    if spec.min_injury_risk_only {
        rows.retain(PlayerRecord::is_high_risk);
        log::debug!("injury_risk > 70: {} rows", rows.len());
    }

    if spec.non_compliant_only {
        rows.retain(|r| r.compliance_status == ComplianceStatus::NonCompliant);
        log::debug!("non-compliant only: {} rows", rows.len());
    }

    let stats = SummaryStats::from_rows(&rows);
    FilteredView { rows, stats }
}

/// Reject a position selector that names no position in the dataset.
pub fn validate(dataset: &Dataset, spec: &FilterSpec) -> Result<(), InvalidFilterError> {
    match &spec.position {
        PositionFilter::Only(position) if !dataset.has_position(position) => {
            Err(InvalidFilterError {
                position: position.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// [`validate`] then [`apply`].
pub fn apply_checked(dataset: &Dataset, spec: &FilterSpec) -> Result<FilteredView, InvalidFilterError> {
    validate(dataset, spec)?;
    Ok(apply(dataset, spec))
}

/// Selector contents: `All` followed by the sorted distinct positions.
pub fn position_options(dataset: &Dataset) -> Vec<String> {
    std::iter::once(ALL_POSITIONS.to_string())
        .chain(dataset.positions().iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::player;
    use crate::data::model::Clearance;

    fn two_players() -> Dataset {
        Dataset::from_records(vec![
            player("A", "GK", 80.0, Clearance::No, ComplianceStatus::NonCompliant),
            player("B", "FWD", 40.0, Clearance::Yes, ComplianceStatus::Compliant),
        ])
    }

    fn squad() -> Dataset {
        Dataset::from_records(vec![
            player("P1", "MID", 75.0, Clearance::Yes, ComplianceStatus::NonCompliant),
            player("P2", "DEF", 90.0, Clearance::No, ComplianceStatus::NonCompliant),
            player("P3", "MID", 20.0, Clearance::Yes, ComplianceStatus::Compliant),
            player("P4", "MID", 71.0, Clearance::No, ComplianceStatus::Compliant),
            player("P5", "MID", 99.0, Clearance::Yes, ComplianceStatus::NonCompliant),
        ])
    }

    fn names(view: &FilteredView) -> Vec<&str> {
        view.rows.iter().map(|r| r.player_name.as_str()).collect()
    }

    #[test]
    fn high_risk_filter_on_two_players() {
        let spec = FilterSpec {
            min_injury_risk_only: true,
            ..FilterSpec::default()
        };
        let view = apply(&two_players(), &spec);
        assert_eq!(names(&view), vec!["A"]);
        assert_eq!(
            view.stats,
            SummaryStats {
                count: 1,
                mean_injury_risk: 80.0,
                pct_cleared: 0.0,
                pct_compliant: 0.0,
            }
        );
    }

    #[test]
    fn no_filters_keeps_everything_in_order() {
        let ds = squad();
        let view = apply(&ds, &FilterSpec::default());
        assert_eq!(view.rows, ds.records());
        assert_eq!(view.stats.count, 5);
        assert_eq!(view.stats.pct_cleared, 60.0);
        assert_eq!(view.stats.pct_compliant, 40.0);
    }

    #[test]
    fn all_predicates_combine_as_conjunction() {
        let spec = FilterSpec {
            position: PositionFilter::from("MID"),
            min_injury_risk_only: true,
            non_compliant_only: true,
        };
        let view = apply(&squad(), &spec);
        assert_eq!(names(&view), vec!["P1", "P5"]);
        assert_eq!(view.stats.mean_injury_risk, 87.0);
        assert_eq!(view.stats.pct_cleared, 100.0);
    }

    #[test]
    fn unknown_position_is_empty_not_error() {
        let spec = FilterSpec {
            position: PositionFilter::from("GK"),
            ..FilterSpec::default()
        };
        let view = apply(&squad(), &spec);
        assert!(view.is_empty());
        assert_eq!(view.stats, SummaryStats::default());
    }

    #[test]
    fn checked_apply_rejects_unknown_position() {
        let spec = FilterSpec {
            position: PositionFilter::from("GK"),
            ..FilterSpec::default()
        };
        let err = apply_checked(&squad(), &spec).unwrap_err();
        assert_eq!(err.position, "GK");
        assert!(apply_checked(&squad(), &FilterSpec::default()).is_ok());
    }

    #[test]
    fn empty_dataset_has_zero_stats() {
        let spec = FilterSpec {
            position: PositionFilter::from("MID"),
            min_injury_risk_only: true,
            non_compliant_only: false,
        };
        let view = apply(&Dataset::default(), &spec);
        assert!(view.is_empty());
        assert_eq!(view.stats.count, 0);
        assert_eq!(view.stats.mean_injury_risk, 0.0);
    }

    #[test]
    fn position_selector_parses_sentinel() {
        assert_eq!("All".parse::<PositionFilter>().unwrap(), PositionFilter::All);
        assert_eq!(PositionFilter::from("DEF"), PositionFilter::Only("DEF".into()));
        assert_eq!(PositionFilter::All.to_string(), "All");
    }

    #[test]
    fn spec_deserializes_from_json() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"position":"DEF","non_compliant_only":true}"#).unwrap();
        assert_eq!(spec.position, PositionFilter::Only("DEF".into()));
        assert!(!spec.min_injury_risk_only);
        assert!(spec.non_compliant_only);
    }

    #[test]
    fn options_start_with_all() {
        assert_eq!(position_options(&squad()), vec!["All", "DEF", "MID"]);
    }
}
