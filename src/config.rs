use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{FilterSpec, PositionFilter};
use crate::data::views::{DEFAULT_TOP_N, EXPORT_FILE_NAME};
use crate::state::ExportOrder;

/// Data file read when neither `--data` nor `FOOTBALL_HEALTH_DATA` is given.
pub const DEFAULT_DATA_FILE: &str = "football_health_dashboard_data.csv";

#[derive(Parser, Debug, Clone)]
#[command(name = "football-health-dashboard")]
#[command(about = "Filter football player health metrics and report summary statistics")]
pub struct DashboardArgs {
    /// Player health CSV file
    #[arg(short, long, env = "FOOTBALL_HEALTH_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Position to show, or "All"
    #[arg(short, long, default_value = "All")]
    pub position: String,

    /// Show only players with injury risk above 70%
    #[arg(long)]
    pub high_risk: bool,

    /// Show only non-compliant players
    #[arg(long)]
    pub non_compliant: bool,

    /// Fail on a position that does not occur in the data
    #[arg(long)]
    pub strict_position: bool,

    /// Number of players in the top injury risk list
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Write the current view as CSV (default file: filtered_players.csv)
    #[arg(short, long, num_args = 0..=1, default_missing_value = EXPORT_FILE_NAME)]
    pub export: Option<PathBuf>,

    /// Export rows sorted by injury risk instead of dataset order
    #[arg(long, requires = "export")]
    pub export_sorted: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl DashboardArgs {
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            position: PositionFilter::from(self.position.as_str()),
            min_injury_risk_only: self.high_risk,
            non_compliant_only: self.non_compliant,
        }
    }

    pub fn export_order(&self) -> ExportOrder {
        if self.export_sorted {
            ExportOrder::InjuryRiskDesc
        } else {
            ExportOrder::Filtered
        }
    }
}
