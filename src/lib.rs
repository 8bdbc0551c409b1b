//! Football health dashboard
//!
//! Loads a table of player health metrics (injury risk, recovery score,
//! training load, clearance and compliance) and produces filtered views with
//! summary statistics for a presentation layer.
//!
//! This library provides:
//! - `data`: dataset loading, the filter pipeline and derived views
//! - `state`: one interaction context (filter choices → current view)
//! - `report`: metric cards and a plain-text table
//! - `config`: command line / environment options
//!
//! Binaries:
//! - `football-health-dashboard`: filter, report and export from the terminal
//! - `generate_sample`: write a deterministic sample dataset

pub mod config;
pub mod data;
pub mod report;
pub mod state;

pub use data::filter::{apply, FilterSpec, FilteredView, PositionFilter, SummaryStats};
pub use data::loader::{DataLoadError, DatasetStore};
pub use data::model::{Clearance, ComplianceStatus, Dataset, PlayerRecord};
