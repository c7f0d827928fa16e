//! The URIs of the dashboard's routes.

/// The root route, which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The full dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The htmx endpoint that re-renders the panels affected by a filter change.
pub const DASHBOARD_FILTERS: &str = "/dashboard/filters";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";
