//! Full-page error responses: 404, the internal server error page and the
//! banner shown when the dataset cannot be loaded.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full HTML page explaining what went wrong and how the user can fix it.
#[derive(Debug, Clone, Copy)]
pub struct ErrorPage<'a> {
    pub status: StatusCode,
    pub title: &'a str,
    pub description: &'a str,
    pub fix: &'a str,
}

impl ErrorPage<'_> {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "Not Found",
            description: "Something's missing.",
            fix: "Sorry, we can't find that page. You'll find lots to explore on the dashboard.",
        }
    }

    pub fn internal_server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Internal Server Error",
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }

    /// The persistent banner shown in place of the dashboard when the
    /// dataset could not be loaded.
    pub fn dataset_unavailable() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            title: "Dashboard Unavailable",
            description: "Dashboard data unavailable",
            fix: "The dashboard data could not be loaded. \
                Refresh the page to try again, or check the server logs.",
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(
            error_view(
                self.title,
                self.status.as_str(),
                self.description,
                self.fix,
            )
            .into_string(),
        )
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        (self.status, self.into_html()).into_response()
    }
}

pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}

pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::internal_server_error().into_response()
}
