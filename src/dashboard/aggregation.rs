//! Pure helpers that turn dataset records into the numbers shown on the dashboard.
//!
//! Nothing in here touches the dataset directly so every function can be
//! tested with plain values.

use crate::dataset::{Governance, ProcessCategory, ProcessRecord, ProjectRecord};

/// Width of a scorecard sparkline in SVG user units.
pub(super) const SPARKLINE_WIDTH: f64 = 60.0;
/// Height of a scorecard sparkline in SVG user units.
pub(super) const SPARKLINE_HEIGHT: f64 = 24.0;

/// Hours saved at which a process efficiency bar is drawn at full width.
const EFFICIENCY_FULL_SCALE_HOURS: f64 = 500.0;

/// Heatmap colour for an intensity of zero.
const HEAT_COLD: [f64; 3] = [211.0, 216.0, 255.0];
/// Heatmap colour for the largest value in the matrix.
const HEAT_HOT: [f64; 3] = [82.0, 45.0, 128.0];

/// `part` as a whole-number percentage of `total`.
///
/// A zero total yields 0 rather than dividing by zero. Halves round away from
/// zero.
pub fn percentage(part: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }

    (part / total * 100.0).round() as i64
}

/// Sum the values picked out of `records` by `selector`.
pub fn sum<T>(records: &[T], selector: impl Fn(&T) -> f64) -> f64 {
    records.iter().map(selector).sum()
}

/// How worrying a risk score is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    /// The CSS class of the coloured dot shown next to the score.
    pub fn dot_class(self) -> &'static str {
        match self {
            RiskTier::Low => "risk-dot risk-green",
            RiskTier::Medium => "risk-dot risk-yellow",
            RiskTier::High => "risk-dot risk-red",
        }
    }
}

/// Classify a 0-100 risk score: below 40 is low, below 65 is medium.
pub fn risk_tier(score: f64) -> RiskTier {
    if score < 40.0 {
        RiskTier::Low
    } else if score < 65.0 {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// How close a gauge is to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeTier {
    Good,
    Warning,
    Critical,
}

impl GaugeTier {
    /// The fill colour of the gauge arc.
    pub fn color(self) -> &'static str {
        match self {
            GaugeTier::Good => "#2E8B57",
            GaugeTier::Warning => "#E6B800",
            GaugeTier::Critical => "#D64545",
        }
    }
}

/// Classify a gauge percentage: 80 and up is good, 55 and up is a warning.
pub fn gauge_tier(percent: i64) -> GaugeTier {
    if percent >= 80 {
        GaugeTier::Good
    } else if percent >= 55 {
        GaugeTier::Warning
    } else {
        GaugeTier::Critical
    }
}

pub fn total_hours_saved(processes: &[ProcessRecord]) -> f64 {
    sum(processes, |process| process.hours_saved)
}

pub fn total_cost_saved(processes: &[ProcessRecord]) -> f64 {
    sum(processes, |process| process.cost_saved)
}

/// Projects that have been initiated but not yet completed.
pub fn active_projects(projects: &[ProjectRecord]) -> u64 {
    projects
        .iter()
        .map(|project| u64::from(project.initiated.saturating_sub(project.completed)))
        .sum()
}

/// Completed projects as a percentage of initiated projects.
pub fn completion_rate(projects: &[ProjectRecord]) -> i64 {
    percentage(
        sum(projects, |project| f64::from(project.completed)),
        sum(projects, |project| f64::from(project.initiated)),
    )
}

/// Change between this year and last year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth {
    pub delta: i64,
    pub percent: i64,
}

pub fn year_over_year_growth(current: u32, previous: u32) -> Growth {
    let delta = i64::from(current) - i64::from(previous);

    Growth {
        delta,
        percent: percentage(delta as f64, f64::from(previous)),
    }
}

/// Completed governance milestones (policies and audits) as a percentage of
/// the targets.
pub fn governance_progress(governance: &Governance) -> i64 {
    percentage(
        f64::from(governance.policies) + f64::from(governance.audits_completed),
        f64::from(governance.policies_target) + f64::from(governance.audits_planned),
    )
}

/// The CSS colour of a heatmap cell with `intensity` in `0.0..=1.0`.
pub fn heat_color(intensity: f64) -> String {
    let t = intensity.clamp(0.0, 1.0);
    let [r, g, b]: [f64; 3] =
        std::array::from_fn(|i| (HEAT_COLD[i] + (HEAT_HOT[i] - HEAT_COLD[i]) * t).round());

    format!("rgb({r},{g},{b})")
}

/// An SVG path drawing `values` as a line inside a
/// [SPARKLINE_WIDTH]x[SPARKLINE_HEIGHT] box.
///
/// The lowest value touches the bottom margin and the highest the top margin.
/// A flat series is drawn along the bottom. Returns `None` for fewer than two
/// points since there is no line to draw.
pub fn sparkline_path(values: &[f64]) -> Option<String> {
    if values.len() < 2 {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let step = SPARKLINE_WIDTH / (values.len() - 1) as f64;

    let path = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let command = if i == 0 { 'M' } else { 'L' };
            let x = i as f64 * step;
            let y = SPARKLINE_HEIGHT - ((value - min) / range) * (SPARKLINE_HEIGHT - 4.0) - 2.0;
            format!("{command}{x},{y}")
        })
        .collect();

    Some(path)
}

/// Width of a process efficiency bar as a percentage of its track.
pub fn efficiency_width(hours_saved: f64) -> f64 {
    (hours_saved / EFFICIENCY_FULL_SCALE_HOURS).min(1.0) * 100.0
}

/// Total savings of the processes in one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySavings {
    pub category: ProcessCategory,
    pub hours_saved: f64,
    pub cost_saved: f64,
}

/// Sum process savings per [ProcessCategory], in display order.
///
/// Every bucket is present, with zeros when no process falls in it. Processes
/// that match no bucket are left out.
pub fn savings_by_category(processes: &[ProcessRecord]) -> Vec<CategorySavings> {
    ProcessCategory::ALL
        .into_iter()
        .map(|category| {
            let members: Vec<&ProcessRecord> = processes
                .iter()
                .filter(|process| process.bucket() == Some(category))
                .collect();

            CategorySavings {
                category,
                hours_saved: members.iter().map(|process| process.hours_saved).sum(),
                cost_saved: members.iter().map(|process| process.cost_saved).sum(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::dataset::{Governance, ProcessCategory, ProcessRecord, ProcessStatus, ProjectRecord};

    use super::*;

    fn project(dept: &str, initiated: u32, completed: u32) -> ProjectRecord {
        ProjectRecord {
            dept: dept.to_owned(),
            initiated,
            completed,
        }
    }

    fn process(name: &str, hours_saved: f64, cost_saved: f64) -> ProcessRecord {
        ProcessRecord {
            name: name.to_owned(),
            status: ProcessStatus::from("Automated".to_owned()),
            hours_saved,
            cost_saved,
            category: None,
        }
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage(0.0, 0.0), 0);
        assert_eq!(percentage(5.0, 0.0), 0);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(2.0, 3.0), 67);
        assert_eq!(percentage(1.0, 8.0), 13);
        assert_eq!(percentage(806.0, 1420.0), 57);
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let empty: [f64; 0] = [];

        assert_eq!(sum(&empty, |value| *value), 0.0);
    }

    #[test]
    fn sum_adds_selected_field() {
        let processes = [process("A", 10.0, 0.0), process("B", 25.0, 0.0)];

        assert_eq!(sum(&processes, |process| process.hours_saved), 35.0);
        assert_eq!(total_hours_saved(&processes), 35.0);
    }

    #[test]
    fn risk_tier_boundaries() {
        assert_eq!(risk_tier(0.0), RiskTier::Low);
        assert_eq!(risk_tier(39.0), RiskTier::Low);
        assert_eq!(risk_tier(40.0), RiskTier::Medium);
        assert_eq!(risk_tier(64.0), RiskTier::Medium);
        assert_eq!(risk_tier(65.0), RiskTier::High);
        assert_eq!(risk_tier(100.0), RiskTier::High);
    }

    #[test]
    fn gauge_tier_boundaries() {
        assert_eq!(gauge_tier(100), GaugeTier::Good);
        assert_eq!(gauge_tier(80), GaugeTier::Good);
        assert_eq!(gauge_tier(79), GaugeTier::Warning);
        assert_eq!(gauge_tier(55), GaugeTier::Warning);
        assert_eq!(gauge_tier(54), GaugeTier::Critical);
        assert_eq!(gauge_tier(54).color(), "#D64545");
    }

    #[test]
    fn active_projects_counts_unfinished_work() {
        let projects = [project("CS", 10, 4), project("ME", 5, 5)];

        assert_eq!(active_projects(&projects), 6);
        assert_eq!(completion_rate(&projects), 60);
    }

    #[test]
    fn active_projects_does_not_overflow() {
        let projects = [project("CS", u32::MAX, 0), project("ME", u32::MAX, 0)];

        assert_eq!(active_projects(&projects), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn completion_rate_without_projects_is_zero() {
        assert_eq!(completion_rate(&[]), 0);
    }

    #[test]
    fn year_over_year_growth_reports_delta_and_percent() {
        assert_eq!(
            year_over_year_growth(412, 305),
            Growth {
                delta: 107,
                percent: 35
            }
        );
        assert_eq!(
            year_over_year_growth(80, 100),
            Growth {
                delta: -20,
                percent: -20
            }
        );
        assert_eq!(year_over_year_growth(3, 0).percent, 0);
    }

    #[test]
    fn governance_progress_combines_policies_and_audits() {
        let governance = Governance {
            policies: 7,
            policies_target: 9,
            audits_completed: 3,
            audits_planned: 4,
        };

        assert_eq!(governance_progress(&governance), 77);
    }

    #[test]
    fn governance_progress_does_not_overflow() {
        let governance = Governance {
            policies: u32::MAX,
            policies_target: u32::MAX,
            audits_completed: u32::MAX,
            audits_planned: u32::MAX,
        };

        assert_eq!(governance_progress(&governance), 100);
    }

    #[test]
    fn heat_color_interpolates_between_endpoints() {
        assert_eq!(heat_color(0.0), "rgb(211,216,255)");
        assert_eq!(heat_color(1.0), "rgb(82,45,128)");
        assert_eq!(heat_color(0.5), "rgb(147,131,192)");
        assert_eq!(heat_color(2.0), heat_color(1.0));
    }

    #[test]
    fn sparkline_spans_the_box() {
        assert_eq!(
            sparkline_path(&[1.0, 2.0, 3.0]).as_deref(),
            Some("M0,22L30,12L60,2")
        );
    }

    #[test]
    fn flat_sparkline_sits_on_the_bottom() {
        assert_eq!(
            sparkline_path(&[5.0, 5.0]).as_deref(),
            Some("M0,22L60,22")
        );
    }

    #[test]
    fn sparkline_needs_two_points() {
        assert_eq!(sparkline_path(&[]), None);
        assert_eq!(sparkline_path(&[4.0]), None);
    }

    #[test]
    fn efficiency_width_is_capped() {
        assert_eq!(efficiency_width(0.0), 0.0);
        assert_eq!(efficiency_width(250.0), 50.0);
        assert_eq!(efficiency_width(900.0), 100.0);
    }

    #[test]
    fn savings_are_summed_per_category() {
        let processes = [
            process("Admissions triage", 10.0, 400.0),
            process("Admissions chatbot", 5.0, 100.0),
            process("Parking permits", 99.0, 99.0),
            process("Library search", 2.0, 50.0),
        ];

        let savings = savings_by_category(&processes);

        assert_eq!(savings.len(), ProcessCategory::ALL.len());
        assert_eq!(savings[0].category, ProcessCategory::Admissions);
        assert_eq!(savings[0].hours_saved, 15.0);
        assert_eq!(savings[0].cost_saved, 500.0);
        assert_eq!(savings[3].category, ProcessCategory::Library);
        assert_eq!(savings[3].hours_saved, 2.0);
        assert_eq!(savings[4].hours_saved, 0.0);
    }
}
