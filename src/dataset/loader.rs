//! Fetches the dataset document from a URL or a local file.

use std::{
    fmt::{self, Display},
    path::PathBuf,
    time::Instant,
};

use reqwest::{
    StatusCode, Url,
    header::{CACHE_CONTROL, PRAGMA},
};

use crate::dataset::Dataset;

/// Where the dataset document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Fetch the document over HTTP(S), bypassing any caches.
    Http(Url),
    /// Read the document from the local filesystem.
    File(PathBuf),
}

impl Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The dataset could not be loaded.
///
/// Every failure to produce a [Dataset] from a [DataSource] ends up here, with
/// the underlying cause attached as the error source.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The request could not be sent or the response body could not be read.
    #[error("could not fetch the dataset: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("fetching {url} returned {status}")]
    Status {
        /// The URL that was requested.
        url: Url,
        /// The status code of the response.
        status: StatusCode,
    },

    /// The dataset file could not be read.
    #[error("could not read the dataset file {}: {source}", path.display())]
    Io {
        /// The path of the dataset file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("the dataset is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document is valid JSON but its root is not an object.
    #[error("the dataset must be a JSON object")]
    NotAnObject,
}

/// Load a fresh copy of the dataset from `source`.
///
/// HTTP sources are fetched with caching disabled so that replacing the file
/// on the server takes effect on the next page load.
///
/// # Errors
/// Returns a [DataLoadError] if the document cannot be fetched, read or parsed.
pub async fn load_dataset(
    source: &DataSource,
    client: &reqwest::Client,
) -> Result<Dataset, DataLoadError> {
    let start = Instant::now();

    let bytes = match source {
        DataSource::Http(url) => fetch(url, client).await?,
        DataSource::File(path) => tokio::fs::read(path)
            .await
            .map_err(|source| DataLoadError::Io {
                path: path.clone(),
                source,
            })?,
    };

    let dataset = Dataset::from_json(&bytes)?;

    tracing::info!(
        "Loaded dataset {:?} from {source} with {} sections in {}ms",
        dataset.version().unwrap_or("(unversioned)"),
        dataset.section_count(),
        start.elapsed().as_millis()
    );

    Ok(dataset)
}

async fn fetch(url: &Url, client: &reqwest::Client) -> Result<Vec<u8>, DataLoadError> {
    let response = client
        .get(url.clone())
        .header(CACHE_CONTROL, "no-cache, no-store")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .map_err(DataLoadError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataLoadError::Status {
            url: url.clone(),
            status,
        });
    }

    let body = response.bytes().await.map_err(DataLoadError::Request)?;

    Ok(body.to_vec())
}
