//! Dashboard HTTP handlers.
//!
//! The page handler loads a fresh copy of the dataset on every visit and
//! keeps it as the snapshot that later filter refreshes build from.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxTriggerName;

use crate::{
    AppState, Error,
    app_state::DatasetSnapshot,
    dashboard::{
        filters::{FilterChange, FilterState},
        orchestrator::{build_dashboard, refresh},
        render::{dashboard_view, period_toggle_view, refreshed_panels_view},
    },
    dataset::{DataSource, Dataset, load_dataset},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Where the dataset is loaded from.
    pub data_source: DataSource,
    /// The client used for HTTP data sources.
    pub http_client: reqwest::Client,
    /// The dataset loaded by the latest page load.
    pub snapshot: DatasetSnapshot,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
            http_client: state.http_client.clone(),
            snapshot: state.snapshot.clone(),
        }
    }
}

fn store_snapshot(snapshot: &DatasetSnapshot, dataset: Arc<Dataset>) -> Result<(), Error> {
    let mut guard = snapshot
        .write()
        .inspect_err(|error| tracing::error!("could not acquire the dataset lock: {error}"))
        .map_err(|_| Error::DatasetLockError)?;

    *guard = Some(dataset);

    Ok(())
}

fn read_snapshot(snapshot: &DatasetSnapshot) -> Result<Option<Arc<Dataset>>, Error> {
    let guard = snapshot
        .read()
        .inspect_err(|error| tracing::error!("could not acquire the dataset lock: {error}"))
        .map_err(|_| Error::DatasetLockError)?;

    Ok(guard.clone())
}

/// The latest snapshot, or a freshly loaded dataset if no page has been
/// loaded since the server started.
async fn current_dataset(state: &DashboardState) -> Result<Arc<Dataset>, Error> {
    if let Some(dataset) = read_snapshot(&state.snapshot)? {
        return Ok(dataset);
    }

    tracing::debug!("No dataset snapshot yet, loading one for a filter refresh");
    let dataset = Arc::new(load_dataset(&state.data_source, &state.http_client).await?);
    store_snapshot(&state.snapshot, dataset.clone())?;

    Ok(dataset)
}

/// Display the full dashboard for the filters in the query string.
///
/// The dataset is loaded again on every page load. If it cannot be loaded,
/// the dataset-unavailable page is shown instead of the dashboard.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(filters): Query<FilterState>,
) -> Result<Response, Error> {
    let dataset = Arc::new(load_dataset(&state.data_source, &state.http_client).await?);
    store_snapshot(&state.snapshot, dataset.clone())?;

    let view = build_dashboard(&dataset, &filters);

    Ok(dashboard_view(&view).into_response())
}

/// Re-render the parts of the dashboard affected by a filter control.
///
/// The control is identified by the `HX-Trigger-Name` header:
/// - department: the project panel, rebuilt for the selected department.
/// - period: the period toggle group, with the new active button.
/// - range: nothing, answered with `204 No Content`.
pub async fn get_filter_refresh(
    State(state): State<DashboardState>,
    HxTriggerName(trigger_name): HxTriggerName,
    Query(filters): Query<FilterState>,
) -> Response {
    let change = FilterChange::from_trigger_name(trigger_name.as_deref());

    match change {
        FilterChange::Range => StatusCode::NO_CONTENT.into_response(),
        FilterChange::Period => period_toggle_view(filters.period).into_response(),
        FilterChange::Department => match current_dataset(&state).await {
            Ok(dataset) => {
                refreshed_panels_view(&refresh(&dataset, &filters, change)).into_response()
            }
            Err(error) => error.into_alert_response(),
        },
    }
}
