use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names of the dataset, in canonical (export) order.
pub const COLUMNS: [&str; 7] = [
    "player_name",
    "position",
    "injury_risk",
    "recovery_score",
    "training_load",
    "cleared_for_play",
    "compliance_status",
];

/// Rows strictly above this injury risk count as high risk.
pub const HIGH_INJURY_RISK_THRESHOLD: f64 = 70.0;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Medical clearance, stored as `Yes` / `No` in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clearance {
    Yes,
    No,
}

impl Clearance {
    pub fn as_str(self) -> &'static str {
        match self {
            Clearance::Yes => "Yes",
            Clearance::No => "No",
        }
    }
}

impl fmt::Display for Clearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Regulatory / medical compliance of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PlayerRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A single player row. Field names match the CSV header exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_name: String,
    pub position: String,
    /// Percentage, 0–100.
    pub injury_risk: f64,
    pub recovery_score: f64,
    pub training_load: f64,
    pub cleared_for_play: Clearance,
    pub compliance_status: ComplianceStatus,
}

impl PlayerRecord {
    pub fn is_high_risk(&self) -> bool {
        self.injury_risk > HIGH_INJURY_RISK_THRESHOLD
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared_for_play == Clearance::Yes
    }

    pub fn is_compliant(&self) -> bool {
        self.compliance_status == ComplianceStatus::Compliant
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset, in source-file order, with a position index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    records: Vec<PlayerRecord>,
    positions: BTreeSet<String>,
}

impl Dataset {
    /// Build the position index from the loaded records.
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        let positions = records.iter().map(|r| r.position.clone()).collect();
        Dataset { records, positions }
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    /// Sorted set of distinct positions.
    pub fn positions(&self) -> &BTreeSet<String> {
        &self.positions
    }

    pub fn has_position(&self, position: &str) -> bool {
        self.positions.contains(position)
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
