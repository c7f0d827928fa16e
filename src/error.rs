//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, dataset::DataLoadError, error_page::ErrorPage};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dataset could not be fetched or parsed.
    ///
    /// No part of the dashboard can be built without the dataset, so this
    /// error is shown as a persistent banner in place of the dashboard.
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    /// The dataset does not contain a section that a visual needs.
    #[error("the dataset has no \"{0}\" section")]
    MissingSection(&'static str),

    /// A dataset section could not be decoded into its expected shape.
    #[error("the \"{section}\" section is malformed: {source}")]
    MalformedSection {
        /// The dataset key of the section.
        section: &'static str,
        /// Why decoding failed.
        #[source]
        source: serde_json::Error,
    },

    /// A dataset section decoded but breaks one of its invariants, e.g. more
    /// projects completed than initiated.
    #[error("the \"{section}\" section is invalid: {reason}")]
    InvalidSection {
        /// The dataset key of the section.
        section: &'static str,
        /// The broken invariant.
        reason: String,
    },

    /// Could not acquire the lock on the shared dataset snapshot.
    #[error("could not acquire the dataset lock")]
    DatasetLockError,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => ErrorPage::not_found().into_response(),
            Error::DataLoad(error) => {
                tracing::error!("Could not load the dataset: {error}");
                ErrorPage::dataset_unavailable().into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::internal_server_error().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::DataLoad(error) => {
                tracing::error!("Could not load the dataset: {error}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Alert::Error {
                        message: "Dashboard data unavailable".to_owned(),
                        details: "The dashboard data could not be loaded. \
                            Refresh the page to try again."
                            .to_owned(),
                    },
                )
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, dataset::DataLoadError, test_utils::parse_html_document};

    #[tokio::test]
    async fn load_failure_renders_unavailable_page() {
        let response = Error::DataLoad(DataLoadError::NotAnObject).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Dashboard data unavailable"), "got {text}");
    }

    #[tokio::test]
    async fn not_found_renders_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_errors_render_500() {
        let response = Error::DatasetLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn alert_response_hides_internal_details() {
        let response = Error::MissingSection("projectData").into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = crate::test_utils::parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Something went wrong"), "got {text}");
        assert!(!text.contains("projectData"), "got {text}");
    }
}
