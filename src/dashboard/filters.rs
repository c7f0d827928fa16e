//! The dashboard filter controls and how a change to one of them is handled.
//!
//! The browser owns the filter state and sends it with every request as query
//! parameters, so the server never has to remember what a user selected.

use serde::Deserialize;

use crate::{dashboard::visuals::VisualId, dataset::ProjectRecord};

/// The query value that selects every department.
pub const ALL_DEPARTMENTS: &str = "ALL";

/// The reporting period granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Period {
    #[serde(rename = "M")]
    Month,
    #[default]
    #[serde(rename = "Q")]
    Quarter,
    #[serde(rename = "Y")]
    Year,
}

impl Period {
    /// Every period in toggle order.
    pub const ALL: [Period; 3] = [Period::Month, Period::Quarter, Period::Year];

    pub fn query_value(self) -> &'static str {
        match self {
            Period::Month => "M",
            Period::Quarter => "Q",
            Period::Year => "Y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Month => "Monthly",
            Period::Quarter => "Quarterly",
            Period::Year => "Yearly",
        }
    }
}

/// How far back the dashboard looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Range {
    #[default]
    #[serde(rename = "LAST_4Q")]
    LastFourQuarters,
    #[serde(rename = "LAST_8Q")]
    LastEightQuarters,
    #[serde(rename = "YTD")]
    YearToDate,
}

impl Range {
    /// Every range in dropdown order.
    pub const ALL: [Range; 3] = [
        Range::LastFourQuarters,
        Range::LastEightQuarters,
        Range::YearToDate,
    ];

    pub fn query_value(self) -> &'static str {
        match self {
            Range::LastFourQuarters => "LAST_4Q",
            Range::LastEightQuarters => "LAST_8Q",
            Range::YearToDate => "YTD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Range::LastFourQuarters => "Last 4 quarters",
            Range::LastEightQuarters => "Last 8 quarters",
            Range::YearToDate => "Year to date",
        }
    }
}

/// Which department the project funnel shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum DepartmentFilter {
    #[default]
    All,
    Named(String),
}

impl DepartmentFilter {
    pub fn query_value(&self) -> &str {
        match self {
            DepartmentFilter::All => ALL_DEPARTMENTS,
            DepartmentFilter::Named(name) => name,
        }
    }

    /// Whether `department` is the currently selected option.
    pub fn selects(&self, department: &str) -> bool {
        self.query_value() == department
    }
}

impl From<String> for DepartmentFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_DEPARTMENTS {
            DepartmentFilter::All
        } else {
            DepartmentFilter::Named(value)
        }
    }
}

/// The full set of filter selections, decoded from the query string.
///
/// Missing parameters take their defaults, so a bare `/dashboard` shows the
/// quarterly view of every department over the last four quarters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub department: DepartmentFilter,
    #[serde(default)]
    pub range: Range,
}

/// The names of the filter controls, used as query keys and htmx trigger names.
pub mod control {
    pub const PERIOD: &str = "period";
    pub const DEPARTMENT: &str = "department";
    pub const RANGE: &str = "range";
}

/// The filter control a user just changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    Period,
    Department,
    Range,
}

impl FilterChange {
    /// Identify the change from the name of the control that triggered the
    /// request.
    ///
    /// Requests without a recognised trigger name are treated as a department
    /// change, the only change that rebuilds anything.
    pub fn from_trigger_name(name: Option<&str>) -> Self {
        match name {
            Some(control::PERIOD) => FilterChange::Period,
            Some(control::RANGE) => FilterChange::Range,
            _ => FilterChange::Department,
        }
    }

    /// The visuals whose content depends on the changed control.
    ///
    /// Period and range are accepted and echoed back to the client but no
    /// visual reads them, so they invalidate nothing.
    pub fn invalidated_visuals(self) -> &'static [VisualId] {
        match self {
            FilterChange::Department => &[VisualId::ProjectFunnel],
            FilterChange::Period | FilterChange::Range => &[],
        }
    }
}

/// The project records shown for a department filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSelection<'a> {
    pub records: Vec<&'a ProjectRecord>,
    /// The department label shown next to the panel title.
    pub label: String,
    /// Set when the requested department has no project record and the
    /// selection fell back to every department.
    pub unmatched: Option<String>,
}

/// Pick the project records for `filter`.
///
/// A named department selects the record with exactly that name. If there is
/// none, every record is shown instead and the miss is reported in
/// [ProjectSelection::unmatched].
pub fn select_projects<'a>(
    projects: &'a [ProjectRecord],
    filter: &DepartmentFilter,
) -> ProjectSelection<'a> {
    let all = |unmatched| ProjectSelection {
        records: projects.iter().collect(),
        label: "All".to_owned(),
        unmatched,
    };

    match filter {
        DepartmentFilter::All => all(None),
        DepartmentFilter::Named(name) => {
            match projects.iter().find(|project| &project.dept == name) {
                Some(project) => ProjectSelection {
                    records: vec![project],
                    label: name.clone(),
                    unmatched: None,
                },
                None => {
                    tracing::warn!(
                        "No project data for department {name:?}, showing all departments"
                    );
                    all(Some(name.clone()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        dashboard::visuals::VisualId,
        dataset::ProjectRecord,
    };

    use super::{DepartmentFilter, FilterChange, FilterState, Period, Range, select_projects};

    fn projects() -> Vec<ProjectRecord> {
        vec![
            ProjectRecord {
                dept: "CS".to_owned(),
                initiated: 10,
                completed: 4,
            },
            ProjectRecord {
                dept: "ME".to_owned(),
                initiated: 5,
                completed: 5,
            },
        ]
    }

    #[test]
    fn all_departments_selects_every_record() {
        let projects = projects();

        let selection = select_projects(&projects, &DepartmentFilter::All);

        assert_eq!(selection.records.len(), 2);
        assert_eq!(selection.label, "All");
        assert_eq!(selection.unmatched, None);
    }

    #[test]
    fn named_department_selects_its_record() {
        let projects = projects();

        let selection = select_projects(&projects, &DepartmentFilter::Named("ME".to_owned()));

        assert_eq!(selection.records, vec![&projects[1]]);
        assert_eq!(
            (selection.records[0].initiated, selection.records[0].completed),
            (5, 5)
        );
        assert_eq!(selection.label, "ME");
    }

    #[test]
    fn department_match_is_exact() {
        let projects = projects();

        let selection = select_projects(&projects, &DepartmentFilter::Named("cs".to_owned()));

        assert_eq!(selection.records.len(), 2);
        assert_eq!(selection.unmatched.as_deref(), Some("cs"));
    }

    #[test]
    fn unknown_department_falls_back_to_all() {
        let projects = projects();

        let selection = select_projects(&projects, &DepartmentFilter::Named("Art".to_owned()));

        assert_eq!(selection.records.len(), 2);
        assert_eq!(selection.label, "All");
        assert_eq!(selection.unmatched.as_deref(), Some("Art"));
    }

    #[test]
    fn empty_query_uses_defaults() {
        let filters: FilterState = serde_html_form::from_str("").unwrap();

        assert_eq!(filters, FilterState::default());
        assert_eq!(filters.period, Period::Quarter);
        assert_eq!(filters.department, DepartmentFilter::All);
        assert_eq!(filters.range, Range::LastFourQuarters);
    }

    #[test]
    fn parses_every_filter() {
        let filters: FilterState =
            serde_html_form::from_str("period=Y&department=Engineering&range=YTD").unwrap();

        assert_eq!(
            filters,
            FilterState {
                period: Period::Year,
                department: DepartmentFilter::Named("Engineering".to_owned()),
                range: Range::YearToDate,
            }
        );
    }

    #[test]
    fn all_keyword_means_every_department() {
        let filters: FilterState = serde_html_form::from_str("department=ALL").unwrap();

        assert_eq!(filters.department, DepartmentFilter::All);
        assert_eq!(filters.department.query_value(), "ALL");
    }

    #[test]
    fn rejects_unknown_period() {
        let result: Result<FilterState, _> = serde_html_form::from_str("period=W");

        assert!(result.is_err());
    }

    #[test]
    fn trigger_name_identifies_change() {
        assert_eq!(
            FilterChange::from_trigger_name(Some("period")),
            FilterChange::Period
        );
        assert_eq!(
            FilterChange::from_trigger_name(Some("range")),
            FilterChange::Range
        );
        assert_eq!(
            FilterChange::from_trigger_name(Some("department")),
            FilterChange::Department
        );
        assert_eq!(
            FilterChange::from_trigger_name(None),
            FilterChange::Department
        );
    }

    #[test]
    fn only_department_invalidates_a_visual() {
        assert_eq!(
            FilterChange::Department.invalidated_visuals(),
            &[VisualId::ProjectFunnel]
        );
        assert!(FilterChange::Period.invalidated_visuals().is_empty());
        assert!(FilterChange::Range.invalidated_visuals().is_empty());
    }
}
