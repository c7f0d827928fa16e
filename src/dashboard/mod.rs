//! Dashboard module
//!
//! Builds the AI-adoption dashboard from the loaded dataset: one panel per
//! visual, grouped into page sections, with htmx filter controls that
//! re-render only the panels a filter change affects.

mod aggregation;
mod builders;
mod charts;
mod filters;
mod handlers;
mod orchestrator;
mod render;
mod visuals;

pub use handlers::{get_dashboard_page, get_filter_refresh};
