use std::sync::Arc;

use crate::data::filter::{self, FilterSpec, FilteredView, InvalidFilterError, PositionFilter};
use crate::data::model::Dataset;
use crate::data::views::{self, ExportError};

// ---------------------------------------------------------------------------
// Interaction state
// ---------------------------------------------------------------------------

/// Row order used for the CSV download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportOrder {
    /// Dataset order of the filtered rows.
    #[default]
    Filtered,
    /// Same order as the player table.
    InjuryRiskDesc,
}

/// One interaction context: the shared dataset, the current filter choices and
/// the view computed from them. Every change recomputes the whole view.
#[derive(Debug)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub spec: FilterSpec,
    pub view: FilteredView,
    /// Reject positions absent from the dataset instead of showing nothing.
    pub strict_positions: bool,
    /// Status / error message for the presentation layer.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let spec = FilterSpec::default();
        let view = filter::apply(&dataset, &spec);
        Self {
            dataset,
            spec,
            view,
            strict_positions: false,
            status_message: None,
        }
    }

    pub fn with_strict_positions(mut self, strict: bool) -> Self {
        self.strict_positions = strict;
        self
    }

    /// Replace the whole filter spec and recompute the view.
    ///
    /// In strict mode an unknown position leaves the previous spec and view in
    /// place.
    pub fn set_spec(&mut self, spec: FilterSpec) -> Result<(), InvalidFilterError> {
        if self.strict_positions {
            if let Err(e) = filter::validate(&self.dataset, &spec) {
                log::warn!("rejected filter: {e}");
                self.status_message = Some(format!("Error: {e}"));
                return Err(e);
            }
        }
        self.spec = spec;
        self.refilter();
        Ok(())
    }

    pub fn set_position(&mut self, position: PositionFilter) -> Result<(), InvalidFilterError> {
        let spec = FilterSpec {
            position,
            ..self.spec.clone()
        };
        self.set_spec(spec)
    }

    pub fn set_min_injury_risk_only(&mut self, on: bool) {
        self.spec.min_injury_risk_only = on;
        self.refilter();
    }

    pub fn set_non_compliant_only(&mut self, on: bool) {
        self.spec.non_compliant_only = on;
        self.refilter();
    }

    /// Recompute `view` from the dataset and the current spec. A successful
    /// recompute clears any earlier status message.
    pub fn refilter(&mut self) {
        self.view = filter::apply(&self.dataset, &self.spec);
        self.status_message = None;
        log::debug!(
            "{} of {} players visible",
            self.view.len(),
            self.dataset.len()
        );
    }

    pub fn position_options(&self) -> Vec<String> {
        filter::position_options(&self.dataset)
    }

    /// CSV bytes of the current view.
    pub fn export_csv(&self, order: ExportOrder) -> Result<Vec<u8>, ExportError> {
        match order {
            ExportOrder::Filtered => views::serialize_csv(&self.view.rows),
            ExportOrder::InjuryRiskDesc => {
                views::serialize_csv(views::sorted_by_injury_risk_desc(&self.view))
            }
        }
    }
}
