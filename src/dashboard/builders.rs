//! View builders: one function per visual, mapping the dataset and filters to a [Panel].
//!
//! Builders only read from the dataset and never render markup, so the same
//! inputs always produce the same panel.

use crate::{
    Error,
    dashboard::{
        aggregation::{
            RiskTier, active_projects, completion_rate, efficiency_width, gauge_tier,
            governance_progress, heat_color, percentage, risk_tier, savings_by_category,
            sparkline_path, sum, total_cost_saved, total_hours_saved, year_over_year_growth,
        },
        charts::{
            DashboardChart, benchmark_chart, course_integration_chart, ethics_reviews_chart,
            faculty_gauge_chart, governance_gauge_chart, process_savings_chart,
            project_funnel_chart, publications_chart, research_grants_chart, roi_trend_chart,
            security_incidents_chart, student_engagement_chart, training_chart,
        },
        filters::{FilterState, select_projects},
        visuals::VisualId,
    },
    dataset::{
        Benchmark, CollaborationMatrix, Curriculum, Dataset, Departments, Direction,
        EthicsReviews, FacultyAdoption, Governance, ProcessStatus, Processes, Projects,
        Publications, ResearchGrants, RiskIndicators, RoiTrend, Section, SecurityIncidents,
        ServiceImprovements, StrategicAlignment, StudentEngagement, TrainingParticipation,
    },
    html::{format_count, format_millions_of_dollars, format_thousands_of_dollars},
};

/// The declarative content of one dashboard panel.
#[derive(Debug)]
pub(super) struct Panel {
    pub visual: VisualId,
    /// Shown next to the title, e.g. the selected department.
    pub subtitle: Option<String>,
    pub chart: Option<DashboardChart>,
    pub body: PanelBody,
    pub caption: Option<String>,
    /// A warning about how the panel was built, e.g. a filter that matched nothing.
    pub notice: Option<String>,
}

impl Panel {
    fn new(visual: VisualId) -> Self {
        Self {
            visual,
            subtitle: None,
            chart: None,
            body: PanelBody::Empty,
            caption: None,
            notice: None,
        }
    }

    fn chart(mut self, chart: charming::Chart) -> Self {
        self.chart = Some(DashboardChart::new(self.visual.chart_dom_id(), chart));
        self
    }

    fn body(mut self, body: PanelBody) -> Self {
        self.body = body;
        self
    }

    fn caption(mut self, caption: String) -> Self {
        self.caption = Some(caption);
        self
    }
}

/// The non-chart content of a panel.
#[derive(Debug)]
pub(super) enum PanelBody {
    Empty,
    Kpis(Vec<KpiCard>),
    Projects(Vec<ProjectRow>),
    Breakdown(Vec<BreakdownItem>),
    Heatmap(Heatmap),
    Processes(Vec<ProcessItem>),
    Services(Vec<ServiceItem>),
    Risks(Vec<RiskItem>),
    Scorecard(Vec<ScorecardRow>),
}

/// A headline figure. Each card is built on its own so one bad section only
/// blanks the cards that read it.
#[derive(Debug)]
pub(super) struct KpiCard {
    pub id: &'static str,
    pub title: &'static str,
    pub figure: Result<KpiFigure, Error>,
}

#[derive(Debug, PartialEq)]
pub(super) struct KpiFigure {
    pub value: String,
    pub detail: String,
}

#[derive(Debug, PartialEq)]
pub(super) struct ProjectRow {
    pub department: String,
    pub initiated: u32,
    pub completed: u32,
    pub completion: i64,
}

/// A labelled value in a list, e.g. users per tool.
#[derive(Debug, PartialEq)]
pub(super) struct BreakdownItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, PartialEq)]
pub(super) struct Heatmap {
    pub departments: Vec<String>,
    /// Row-major cells, one per department pair.
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, PartialEq)]
pub(super) struct HeatmapCell {
    /// Empty when there were no collaborations.
    pub text: String,
    pub color: String,
    pub title: String,
}

#[derive(Debug, PartialEq)]
pub(super) struct ProcessItem {
    pub name: String,
    pub status: String,
    pub status_class: &'static str,
    pub hours: String,
    pub cost: String,
    /// Width of the efficiency bar as a percentage.
    pub efficiency: f64,
}

#[derive(Debug, PartialEq)]
pub(super) struct ServiceItem {
    pub metric: String,
    pub value: String,
    pub improved: bool,
}

#[derive(Debug, PartialEq)]
pub(super) struct RiskItem {
    pub area: String,
    pub score: String,
    pub tier: RiskTier,
}

#[derive(Debug, PartialEq)]
pub(super) struct ScorecardRow {
    pub goal: String,
    pub metric: String,
    pub value: String,
    pub status: String,
    pub status_class: &'static str,
    /// SVG path of the trend, if there are enough points to draw one.
    pub sparkline: Option<String>,
}

/// Build the panel for `visual`.
///
/// # Errors
/// Returns an error if a dataset section the visual needs is missing,
/// malformed or breaks an invariant.
pub(super) fn build_panel(
    visual: VisualId,
    dataset: &Dataset,
    filters: &FilterState,
) -> Result<Panel, Error> {
    match visual {
        VisualId::Kpis => Ok(kpi_panel(dataset)),
        VisualId::ProjectFunnel => project_funnel_panel(dataset, filters),
        VisualId::FacultyAdoption => faculty_adoption_panel(dataset),
        VisualId::StudentEngagement => student_engagement_panel(dataset),
        VisualId::TrainingParticipation => training_panel(dataset),
        VisualId::CourseIntegration => course_integration_panel(dataset),
        VisualId::ResearchGrants => research_grants_panel(dataset),
        VisualId::Publications => publications_panel(dataset),
        VisualId::CollaborationHeatmap => collaboration_panel(dataset),
        VisualId::ProcessSavings => process_savings_panel(dataset),
        VisualId::ProcessList => process_list_panel(dataset),
        VisualId::ServiceImprovements => service_improvements_panel(dataset),
        VisualId::GovernanceProgress => governance_panel(dataset),
        VisualId::EthicsReviews => ethics_reviews_panel(dataset),
        VisualId::SecurityIncidents => security_incidents_panel(dataset),
        VisualId::RiskIndicators => risk_indicators_panel(dataset),
        VisualId::StrategicAlignment => scorecard_panel(dataset),
        VisualId::Benchmark => benchmark_panel(dataset),
        VisualId::RoiTrend => roi_trend_panel(dataset),
    }
}

fn kpi_card<S: Section>(
    dataset: &Dataset,
    id: &'static str,
    title: &'static str,
    figure: impl FnOnce(S) -> Result<KpiFigure, Error>,
) -> KpiCard {
    let figure = dataset
        .section::<S>()
        .and_then(figure)
        .inspect_err(|error| tracing::warn!("Could not build the {title} card: {error}"));

    KpiCard { id, title, figure }
}

fn kpi_panel(dataset: &Dataset) -> Panel {
    let cards = vec![
        kpi_card(dataset, "kpi-projects", "Active AI Projects", |projects: Projects| {
            Ok(KpiFigure {
                value: format_count(active_projects(&projects.0) as f64),
                detail: format!("Completion: {}%", completion_rate(&projects.0)),
            })
        }),
        kpi_card(dataset, "kpi-faculty", "Faculty Adoption", |faculty: FacultyAdoption| {
            Ok(KpiFigure {
                value: format!(
                    "{}%",
                    percentage(
                        f64::from(faculty.active_faculty),
                        f64::from(faculty.total_faculty)
                    )
                ),
                detail: format!("Active users: {}", format_count(f64::from(faculty.active_faculty))),
            })
        }),
        kpi_card(
            dataset,
            "kpi-students",
            "Student Engagement",
            |students: StudentEngagement| {
                Ok(KpiFigure {
                    value: format!(
                        "{}%",
                        percentage(
                            f64::from(students.engaged_students),
                            f64::from(students.total_students)
                        )
                    ),
                    detail: format!(
                        "Participants: {}",
                        format_count(f64::from(students.engaged_students))
                    ),
                })
            },
        ),
        kpi_card(dataset, "kpi-courses", "AI-Integrated Courses", |courses: Curriculum| {
            Ok(KpiFigure {
                value: format!(
                    "{}%",
                    percentage(f64::from(courses.ai_courses), f64::from(courses.total_courses))
                ),
                detail: format!("Courses: {}", format_count(f64::from(courses.ai_courses))),
            })
        }),
        kpi_card(dataset, "kpi-time-saved", "Time Saved", |processes: Processes| {
            Ok(KpiFigure {
                value: format!("{} hrs", format_count(total_hours_saved(&processes.0))),
                detail: format!(
                    "Cost saved: {}",
                    format_thousands_of_dollars(total_cost_saved(&processes.0))
                ),
            })
        }),
        kpi_card(dataset, "kpi-roi", "Return on Investment", |roi: RoiTrend| {
            let (roi_pct, value_created) = latest_roi(&roi)?;

            Ok(KpiFigure {
                value: format!("{roi_pct}%"),
                detail: format!(
                    "Value created: {}",
                    format_millions_of_dollars(value_created)
                ),
            })
        }),
    ];

    Panel::new(VisualId::Kpis).body(PanelBody::Kpis(cards))
}

fn latest_roi(roi: &RoiTrend) -> Result<(f64, f64), Error> {
    roi.latest().ok_or_else(|| Error::InvalidSection {
        section: RoiTrend::KEY,
        reason: "the ROI trend has no data points".to_owned(),
    })
}

fn project_funnel_panel(dataset: &Dataset, filters: &FilterState) -> Result<Panel, Error> {
    let projects = dataset.section::<Projects>()?;
    let selection = select_projects(&projects.0, &filters.department);

    let rows = selection
        .records
        .iter()
        .map(|record| ProjectRow {
            department: record.dept.clone(),
            initiated: record.initiated,
            completed: record.completed,
            completion: percentage(f64::from(record.completed), f64::from(record.initiated)),
        })
        .collect();

    let mut panel = Panel::new(VisualId::ProjectFunnel)
        .chart(project_funnel_chart(&selection.records))
        .body(PanelBody::Projects(rows));
    panel.subtitle = Some(selection.label);
    panel.notice = selection
        .unmatched
        .map(|name| format!("No project data for \"{name}\", showing all departments."));

    Ok(panel)
}

fn faculty_adoption_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let faculty = dataset.section::<FacultyAdoption>()?;
    let percent = percentage(
        f64::from(faculty.active_faculty),
        f64::from(faculty.total_faculty),
    );

    let tools = faculty
        .distribution
        .iter()
        .map(|usage| BreakdownItem {
            label: usage.tool.clone(),
            value: format_count(f64::from(usage.users)),
        })
        .collect();

    Ok(Panel::new(VisualId::FacultyAdoption)
        .chart(faculty_gauge_chart(percent))
        .body(PanelBody::Breakdown(tools))
        .caption(format!(
            "{} of {} faculty actively use AI tools.",
            format_count(f64::from(faculty.active_faculty)),
            format_count(f64::from(faculty.total_faculty))
        )))
}

fn student_engagement_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let students = dataset.section::<StudentEngagement>()?;

    Ok(Panel::new(VisualId::StudentEngagement).chart(student_engagement_chart(&students)))
}

fn training_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let training = dataset.section::<TrainingParticipation>()?;

    Ok(Panel::new(VisualId::TrainingParticipation).chart(training_chart(&training)))
}

fn course_integration_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let curriculum = dataset.section::<Curriculum>()?;
    let growth = year_over_year_growth(curriculum.ai_courses, curriculum.prev_year);
    let sign = if growth.percent >= 0 { "+" } else { "" };

    Ok(Panel::new(VisualId::CourseIntegration)
        .chart(course_integration_chart(&curriculum))
        .caption(format!(
            "{sign}{}% YoY growth in AI-integrated courses (Δ {}).",
            growth.percent, growth.delta
        )))
}

fn research_grants_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let research = dataset.section::<ResearchGrants>()?;

    Ok(Panel::new(VisualId::ResearchGrants).chart(research_grants_chart(&research)))
}

fn publications_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let publications = dataset.section::<Publications>()?;

    Ok(Panel::new(VisualId::Publications).chart(publications_chart(&publications)))
}

/// The heatmap is indexed by roster position, so it needs both sections and
/// they must agree on the number of departments.
fn collaboration_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let departments = dataset.section::<Departments>()?.0;
    let matrix = dataset.section::<CollaborationMatrix>()?.0;

    if matrix.len() != departments.len() {
        return Err(Error::InvalidSection {
            section: CollaborationMatrix::KEY,
            reason: format!(
                "the matrix has {} rows but there are {} departments",
                matrix.len(),
                departments.len()
            ),
        });
    }

    let max = matrix.iter().flatten().copied().max().unwrap_or(0);

    let cells = matrix
        .iter()
        .enumerate()
        .flat_map(|(row, values)| {
            let departments = &departments;
            values.iter().enumerate().map(move |(column, &value)| {
                let intensity = if max == 0 {
                    0.0
                } else {
                    f64::from(value) / f64::from(max)
                };

                HeatmapCell {
                    text: if value == 0 {
                        String::new()
                    } else {
                        value.to_string()
                    },
                    color: heat_color(intensity),
                    title: format!("{} ↔ {}: {value}", departments[row], departments[column]),
                }
            })
        })
        .collect();

    Ok(Panel::new(VisualId::CollaborationHeatmap).body(PanelBody::Heatmap(Heatmap {
        departments,
        cells,
    })))
}

fn process_savings_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let processes = dataset.section::<Processes>()?;
    let savings = savings_by_category(&processes.0);

    Ok(Panel::new(VisualId::ProcessSavings)
        .chart(process_savings_chart(&savings))
        .caption(format!(
            "{} hours and {} saved across all processes.",
            format_count(total_hours_saved(&processes.0)),
            format_thousands_of_dollars(total_cost_saved(&processes.0))
        )))
}

fn status_class(status: &ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Automated(_) => "status-badge status-auto",
        ProcessStatus::Pilot(_) => "status-badge status-pilot",
        ProcessStatus::Planned(_) => "status-badge status-plan",
        ProcessStatus::Other(_) => "status-badge",
    }
}

fn process_list_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let processes = dataset.section::<Processes>()?;

    let items = processes
        .0
        .iter()
        .map(|process| ProcessItem {
            name: process.name.clone(),
            status: process.status.label().to_owned(),
            status_class: status_class(&process.status),
            hours: format!("{} hrs", format_count(process.hours_saved)),
            cost: format_thousands_of_dollars(process.cost_saved),
            efficiency: efficiency_width(process.hours_saved),
        })
        .collect();

    Ok(Panel::new(VisualId::ProcessList).body(PanelBody::Processes(items)))
}

fn service_improvements_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let services = dataset.section::<ServiceImprovements>()?;

    let items = services
        .0
        .iter()
        .map(|service| ServiceItem {
            metric: service.metric.clone(),
            value: service.value.to_string(),
            improved: service.direction == Direction::Improved,
        })
        .collect();

    Ok(Panel::new(VisualId::ServiceImprovements).body(PanelBody::Services(items)))
}

fn governance_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let governance = dataset.section::<Governance>()?;
    let percent = governance_progress(&governance);

    let milestones = vec![
        BreakdownItem {
            label: "Policies".to_owned(),
            value: format!("{} / {}", governance.policies, governance.policies_target),
        },
        BreakdownItem {
            label: "Audits".to_owned(),
            value: format!(
                "{} / {}",
                governance.audits_completed, governance.audits_planned
            ),
        },
    ];

    Ok(Panel::new(VisualId::GovernanceProgress)
        .chart(governance_gauge_chart(percent, gauge_tier(percent)))
        .body(PanelBody::Breakdown(milestones))
        .caption(format!("{percent}% of governance milestones completed")))
}

fn ethics_reviews_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let reviews = dataset.section::<EthicsReviews>()?;
    let outcomes = reviews.outcomes();
    let total = sum(&outcomes, |(_, count)| f64::from(*count));

    let items = outcomes
        .iter()
        .map(|(label, count)| BreakdownItem {
            label: (*label).to_owned(),
            value: format!("{count} ({}%)", percentage(f64::from(*count), total)),
        })
        .collect();

    Ok(Panel::new(VisualId::EthicsReviews)
        .chart(ethics_reviews_chart(&reviews))
        .body(PanelBody::Breakdown(items)))
}

fn security_incidents_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let incidents = dataset.section::<SecurityIncidents>()?;
    let total = sum(&incidents.incidents, |count| *count);

    Ok(Panel::new(VisualId::SecurityIncidents)
        .chart(security_incidents_chart(&incidents))
        .caption(format!(
            "{} incidents reported over the period.",
            format_count(total)
        )))
}

fn risk_indicators_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let risks = dataset.section::<RiskIndicators>()?;

    let items = risks
        .0
        .iter()
        .map(|risk| RiskItem {
            area: risk.area.clone(),
            score: format_count(risk.score),
            tier: risk_tier(risk.score),
        })
        .collect();

    Ok(Panel::new(VisualId::RiskIndicators).body(PanelBody::Risks(items)))
}

fn scorecard_status_class(status: &str) -> &'static str {
    let status = status.to_lowercase();

    if status.contains("risk") || status.contains("behind") {
        "status-badge status-risk"
    } else if status.contains("ahead") {
        "status-badge status-auto"
    } else {
        "status-badge status-pilot"
    }
}

fn scorecard_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let alignment = dataset.section::<StrategicAlignment>()?;

    let rows = alignment
        .0
        .iter()
        .map(|row| ScorecardRow {
            goal: row.goal.clone(),
            metric: row.metric.clone(),
            value: row.value.to_string(),
            status: row.status.clone(),
            status_class: scorecard_status_class(&row.status),
            sparkline: sparkline_path(&row.trend),
        })
        .collect();

    Ok(Panel::new(VisualId::StrategicAlignment).body(PanelBody::Scorecard(rows)))
}

fn benchmark_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let benchmark = dataset.section::<Benchmark>()?;

    Ok(Panel::new(VisualId::Benchmark).chart(benchmark_chart(&benchmark)))
}

fn roi_trend_panel(dataset: &Dataset) -> Result<Panel, Error> {
    let roi = dataset.section::<RoiTrend>()?;
    let (_, value_created) = latest_roi(&roi)?;

    Ok(Panel::new(VisualId::RoiTrend)
        .chart(roi_trend_chart(&roi))
        .caption(format!(
            "Cumulative modeled value: {} (excludes intangible benefits).",
            format_millions_of_dollars(value_created)
        )))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        Error,
        dashboard::{
            aggregation::RiskTier,
            filters::{DepartmentFilter, FilterState},
            visuals::VisualId,
        },
        dataset::test_data::{dataset_with, sample_dataset, sample_dataset_without},
        html::format_count,
    };

    use super::{KpiFigure, Panel, PanelBody, build_panel};

    fn build(visual: VisualId) -> Panel {
        build_panel(visual, &sample_dataset(), &FilterState::default())
            .unwrap_or_else(|error| panic!("could not build {visual:?}: {error}"))
    }

    #[test]
    fn every_visual_builds_from_sample_data() {
        let dataset = sample_dataset();

        for visual in VisualId::ALL {
            let panel = build_panel(visual, &dataset, &FilterState::default());

            assert!(panel.is_ok(), "{visual:?} failed: {:?}", panel.err());
        }
    }

    #[test]
    fn kpi_figures_match_sample_data() {
        let PanelBody::Kpis(cards) = build(VisualId::Kpis).body else {
            panic!("want KPI cards");
        };

        let figures: Vec<&KpiFigure> = cards
            .iter()
            .map(|card| card.figure.as_ref().unwrap())
            .collect();

        assert_eq!(figures[0].value, "35");
        assert_eq!(figures[0].detail, "Completion: 58%");
        assert_eq!(figures[1].value, "57%");
        assert_eq!(figures[1].detail, "Active users: 806");
        assert_eq!(figures[2].value, "63%");
        assert_eq!(figures[3].value, "13%");
        assert_eq!(figures[4].value, "1,710 hrs");
        assert_eq!(figures[4].detail, "Cost saved: $73.7k");
        assert_eq!(figures[5].value, "112%");
        assert_eq!(figures[5].detail, "Value created: $2.4M");
    }

    #[test]
    fn kpi_cards_fail_independently() {
        let dataset = sample_dataset_without("processes");

        let panel = build_panel(VisualId::Kpis, &dataset, &FilterState::default()).unwrap();
        let PanelBody::Kpis(cards) = panel.body else {
            panic!("want KPI cards");
        };

        let failed: Vec<&str> = cards
            .iter()
            .filter(|card| card.figure.is_err())
            .map(|card| card.id)
            .collect();
        assert_eq!(failed, vec!["kpi-time-saved"]);
    }

    #[test]
    fn active_projects_card_handles_large_counts() {
        let dataset = dataset_with(
            "projects",
            Some(json!([
                { "dept": "Computing", "initiated": 4_000_000_000u32, "completed": 0 },
                { "dept": "Engineering", "initiated": 4_000_000_000u32, "completed": 0 }
            ])),
        );

        let panel = build_panel(VisualId::Kpis, &dataset, &FilterState::default()).unwrap();
        let PanelBody::Kpis(cards) = panel.body else {
            panic!("want KPI cards");
        };

        let figure = cards[0].figure.as_ref().unwrap();
        assert_eq!(figure.value, format_count(8_000_000_000.0));
        assert_eq!(figure.detail, "Completion: 0%");
    }

    #[test]
    fn governance_panel_handles_large_targets() {
        let dataset = dataset_with(
            "governance",
            Some(json!({
                "policies": 4_000_000_000u32,
                "policiesTarget": 4_000_000_000u32,
                "auditsCompleted": 0,
                "auditsPlanned": 1_000_000_000u32
            })),
        );

        let panel =
            build_panel(VisualId::GovernanceProgress, &dataset, &FilterState::default()).unwrap();

        assert_eq!(
            panel.caption.as_deref(),
            Some("80% of governance milestones completed")
        );
    }

    #[test]
    fn processes_with_unknown_category_still_build() {
        let dataset = dataset_with(
            "processes",
            Some(json!([
                { "name": "Grant triage", "status": "Automated", "hoursSaved": 100, "costSaved": 5000, "category": "Research" },
                { "name": "Library Chatbot", "status": "Pilot", "hoursSaved": 50, "costSaved": 2000 }
            ])),
        );

        for visual in [VisualId::Kpis, VisualId::ProcessList, VisualId::ProcessSavings] {
            let result = build_panel(visual, &dataset, &FilterState::default());

            assert!(result.is_ok(), "{visual:?} failed: {:?}", result.err());
        }
    }

    #[test]
    fn project_panel_follows_department_filter() {
        let filters = FilterState {
            department: DepartmentFilter::Named("Engineering".to_owned()),
            ..Default::default()
        };

        let panel = build_panel(VisualId::ProjectFunnel, &sample_dataset(), &filters).unwrap();

        assert_eq!(panel.subtitle.as_deref(), Some("Engineering"));
        assert_eq!(panel.notice, None);
        let PanelBody::Projects(rows) = panel.body else {
            panic!("want project rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].initiated, rows[0].completed), (18, 11));
    }

    #[test]
    fn unknown_department_shows_all_with_notice() {
        let filters = FilterState {
            department: DepartmentFilter::Named("Astrology".to_owned()),
            ..Default::default()
        };

        let panel = build_panel(VisualId::ProjectFunnel, &sample_dataset(), &filters).unwrap();

        assert_eq!(panel.subtitle.as_deref(), Some("All"));
        assert!(panel.notice.unwrap().contains("Astrology"));
        let PanelBody::Projects(rows) = panel.body else {
            panic!("want project rows");
        };
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn course_caption_reports_growth() {
        let panel = build(VisualId::CourseIntegration);

        assert_eq!(
            panel.caption.as_deref(),
            Some("+35% YoY growth in AI-integrated courses (Δ 107).")
        );
    }

    #[test]
    fn governance_caption_reports_progress() {
        let panel = build(VisualId::GovernanceProgress);

        assert_eq!(
            panel.caption.as_deref(),
            Some("77% of governance milestones completed")
        );
        assert!(panel.chart.unwrap().options.contains("#E6B800"));
    }

    #[test]
    fn roi_caption_uses_latest_value() {
        let panel = build(VisualId::RoiTrend);

        assert_eq!(
            panel.caption.as_deref(),
            Some("Cumulative modeled value: $2.4M (excludes intangible benefits).")
        );
    }

    #[test]
    fn ethics_breakdown_shows_share_of_reviews() {
        let PanelBody::Breakdown(items) = build(VisualId::EthicsReviews).body else {
            panic!("want breakdown");
        };

        let values: Vec<&str> = items.iter().map(|item| item.value.as_str()).collect();
        assert_eq!(values, vec!["42 (74%)", "9 (16%)", "6 (11%)"]);
    }

    #[test]
    fn heatmap_has_a_cell_per_pair() {
        let PanelBody::Heatmap(heatmap) = build(VisualId::CollaborationHeatmap).body else {
            panic!("want heatmap");
        };

        assert_eq!(heatmap.cells.len(), 36);
        assert_eq!(heatmap.cells[0].text, "");
        assert_eq!(heatmap.cells[1].text, "14");
        assert_eq!(heatmap.cells[1].title, "Computing ↔ Engineering: 14");
        assert_eq!(heatmap.cells[1].color, "rgb(82,45,128)");
    }

    #[test]
    fn heatmap_needs_a_row_per_department() {
        let dataset = dataset_with("collabMatrix", Some(json!([[0, 1], [1, 0]])));

        let result = build_panel(
            VisualId::CollaborationHeatmap,
            &dataset,
            &FilterState::default(),
        );

        assert!(matches!(
            result,
            Err(Error::InvalidSection {
                section: "collabMatrix",
                ..
            })
        ));
    }

    #[test]
    fn processes_show_status_and_efficiency() {
        let PanelBody::Processes(items) = build(VisualId::ProcessList).body else {
            panic!("want processes");
        };

        assert_eq!(items.len(), 6);
        assert_eq!(items[0].status_class, "status-badge status-auto");
        assert_eq!(items[0].hours, "420 hrs");
        assert_eq!(items[0].cost, "$18.9k");
        assert_eq!(items[2].efficiency, 100.0);
        assert_eq!(items[4].status_class, "status-badge status-plan");
        assert_eq!(items[4].efficiency, 0.0);
    }

    #[test]
    fn services_are_marked_improved_or_declined() {
        let PanelBody::Services(items) = build(VisualId::ServiceImprovements).body else {
            panic!("want services");
        };

        let improved: Vec<bool> = items.iter().map(|item| item.improved).collect();
        assert_eq!(improved, vec![true, true, false]);
    }

    #[test]
    fn risks_are_tiered() {
        let PanelBody::Risks(items) = build(VisualId::RiskIndicators).body else {
            panic!("want risks");
        };

        let tiers: Vec<RiskTier> = items.iter().map(|item| item.tier).collect();
        assert_eq!(
            tiers,
            vec![RiskTier::Medium, RiskTier::High, RiskTier::Medium, RiskTier::Low]
        );
    }

    #[test]
    fn scorecard_rows_have_sparklines() {
        let PanelBody::Scorecard(rows) = build(VisualId::StrategicAlignment).body else {
            panic!("want scorecard");
        };

        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.sparkline.is_some()));
        assert_eq!(rows[3].status_class, "status-badge status-risk");
    }

    #[test]
    fn missing_section_fails_only_its_visual() {
        let dataset = sample_dataset_without("riskIndicators");

        for visual in VisualId::ALL {
            let result = build_panel(visual, &dataset, &FilterState::default());

            if visual == VisualId::RiskIndicators {
                assert!(matches!(result, Err(Error::MissingSection("riskIndicators"))));
            } else {
                assert!(result.is_ok(), "{visual:?} failed: {:?}", result.err());
            }
        }
    }
}
