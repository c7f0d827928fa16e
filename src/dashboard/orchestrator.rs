//! Decides which panels to build for a page load or a filter change.

use time::OffsetDateTime;

use crate::{
    Error,
    dashboard::{
        builders::{Panel, build_panel},
        filters::{FilterChange, FilterState},
        visuals::VisualId,
    },
    dataset::{Dataset, Departments},
};

/// The result of building one visual.
#[derive(Debug)]
pub(super) struct PanelOutcome {
    pub visual: VisualId,
    pub panel: Result<Panel, Error>,
}

/// Everything needed to render the full dashboard page.
#[derive(Debug)]
pub(super) struct DashboardView {
    pub version: Option<String>,
    pub loaded_at: OffsetDateTime,
    pub filters: FilterState,
    /// The department dropdown options.
    pub departments: Result<Vec<String>, Error>,
    pub panels: Vec<PanelOutcome>,
}

fn build_outcome(visual: VisualId, dataset: &Dataset, filters: &FilterState) -> PanelOutcome {
    let panel = build_panel(visual, dataset, filters).inspect_err(|error| {
        tracing::warn!("Could not build the {} visual: {error}", visual.title())
    });

    PanelOutcome { visual, panel }
}

/// Build every visual for a full page load.
///
/// Each visual is built independently, so a bad dataset section only turns
/// the visuals that read it into error cards.
pub(super) fn build_dashboard(dataset: &Dataset, filters: &FilterState) -> DashboardView {
    let departments = dataset
        .section::<Departments>()
        .map(|departments| departments.0)
        .inspect_err(|error| tracing::warn!("Could not build the department filter: {error}"));

    let panels = VisualId::ALL
        .into_iter()
        .map(|visual| build_outcome(visual, dataset, filters))
        .collect();

    DashboardView {
        version: dataset.version().map(str::to_owned),
        loaded_at: dataset.loaded_at(),
        filters: filters.clone(),
        departments,
        panels,
    }
}

/// Rebuild only the visuals invalidated by `change`.
pub(super) fn refresh(
    dataset: &Dataset,
    filters: &FilterState,
    change: FilterChange,
) -> Vec<PanelOutcome> {
    let visuals = change.invalidated_visuals();
    tracing::debug!("Refreshing {visuals:?} after a {change:?} change");

    visuals
        .iter()
        .map(|&visual| build_outcome(visual, dataset, filters))
        .collect()
}
