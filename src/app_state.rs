//! Implements a struct that holds the state of the dashboard server.

use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use crate::{
    Error,
    dataset::{DataLoadError, DataSource, Dataset},
};

/// The most recently loaded dataset, shared between requests.
pub type DatasetSnapshot = Arc<RwLock<Option<Arc<Dataset>>>>;

/// The state of the dashboard server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where the dataset is loaded from on every page load.
    pub data_source: DataSource,

    /// The client used to fetch HTTP data sources.
    pub http_client: reqwest::Client,

    /// The dataset loaded by the latest page load. Filter refreshes build
    /// from this snapshot instead of fetching the dataset again.
    pub snapshot: DatasetSnapshot,
}

impl AppState {
    /// Create a new [AppState] that loads the dataset from `data_source`.
    ///
    /// Dataset requests that take longer than `request_timeout` fail.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(data_source: DataSource, request_timeout: Duration) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(DataLoadError::Request)?;

        Ok(Self {
            data_source,
            http_client,
            snapshot: Arc::new(RwLock::new(None)),
        })
    }
}
