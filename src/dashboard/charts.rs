//! ECharts configuration for the chart-based visuals.
//!
//! Each function maps a typed dataset section to a [Chart]. The chart is
//! serialized to JSON and initialized in the browser by [charts_script] on
//! page load, or by [chart_init_script] when a panel is swapped in by htmx.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, RadarCoordinate, Title},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, Emphasis,
        EmphasisFocus, JsFunction, Label, Tooltip, Trigger,
    },
    series::{Line, Pie, Radar, bar},
};
use maud::PreEscaped;

use crate::{
    dashboard::aggregation::{CategorySavings, GaugeTier},
    dataset::{
        Benchmark, Curriculum, EthicsReviews, ProjectRecord, Publications, ResearchGrants,
        RoiTrend, SecurityIncidents, StudentEngagement, TrainingParticipation,
    },
    html::HeadElement,
};

const ORANGE: &str = "#F66733";
const PURPLE: &str = "#522D80";
const TEAL: &str = "#109DC0";
const TRACK: &str = "#E5E7EB";
const GREEN: &str = "#2E8B57";
const YELLOW: &str = "#E6B800";

/// A chart with its HTML container ID and ECharts configuration.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardChart {
    /// The HTML element ID of the chart container (kebab-case)
    pub id: String,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl DashboardChart {
    pub fn new(id: String, chart: Chart) -> Self {
        Self {
            id,
            // The options are inlined into a script element.
            options: chart.to_string().replace("</", "<\\/"),
        }
    }
}

fn init_chart_js(chart: &DashboardChart) -> String {
    format!(
        r#"(function() {{
            const chartDom = document.getElementById("{id}");
            if (!chartDom) return;
            const chartId = chartDom.id;

            // A swapped panel replaces the element its chart was drawn in.
            const registry = window.dashboardCharts = window.dashboardCharts || {{}};
            if (registry[chartId]) {{
                registry[chartId]();
            }}

            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            const resize = () => chart.resize();
            window.addEventListener('resize', resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();

            registry[chartId] = () => {{
                window.removeEventListener('resize', resize);
                darkModeMediaQuery.removeEventListener('change', updateTheme);
                chart.dispose();
            }};
        }})();"#,
        id = chart.id,
        options = chart.options
    )
}

/// JavaScript that initializes every chart once the page has loaded.
pub(super) fn charts_script<'a>(
    charts: impl IntoIterator<Item = &'a DashboardChart>,
) -> HeadElement {
    let script_content = charts
        .into_iter()
        .map(init_chart_js)
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// JavaScript that initializes a single chart immediately, for panels swapped
/// in after the page has loaded.
pub(super) fn chart_init_script(chart: &DashboardChart) -> PreEscaped<String> {
    PreEscaped(init_chart_js(chart))
}

fn grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top(40)
        .contain_label(true)
}

fn axis_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

fn category_axis(labels: Vec<String>) -> Axis {
    Axis::new().type_(AxisType::Category).data(labels)
}

fn value_axis(name: &str) -> Axis {
    Axis::new().type_(AxisType::Value).name(name)
}

fn suffix_formatter(suffix: &str) -> JsFunction {
    JsFunction::new_with_args("value", &format!("return value + '{suffix}';"))
}

fn colors(palette: &[&str]) -> Vec<Color> {
    palette.iter().map(|color| Color::from(*color)).collect()
}

/// A ring showing `percent` of 100 filled in `color`, with the percentage in
/// the middle.
fn radial_gauge(name: &str, percent: i64, color: &str) -> Chart {
    let filled = percent.clamp(0, 100) as f64;

    Chart::new()
        .title(
            Title::new()
                .text(format!("{percent}%"))
                .left("center")
                .top("center"),
        )
        .color(colors(&[color, TRACK]))
        .series(
            Pie::new()
                .name(name)
                .radius(vec!["65%", "85%"])
                .label(Label::new().show(false))
                .data(vec![(filled, name), (100.0 - filled, "Remaining")]),
        )
}

fn doughnut(name: &str, palette: &[&str], data: Vec<(f64, &str)>) -> Chart {
    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .color(colors(palette))
        .series(
            Pie::new()
                .name(name)
                .radius(vec!["50%", "75%"])
                .label(Label::new().show(false))
                .data(data),
        )
}

pub(super) fn project_funnel_chart(records: &[&ProjectRecord]) -> Chart {
    let labels = records.iter().map(|record| record.dept.clone()).collect();
    let initiated: Vec<f64> = records.iter().map(|r| f64::from(r.initiated)).collect();
    let completed: Vec<f64> = records.iter().map(|r| f64::from(r.completed)).collect();

    Chart::new()
        .tooltip(axis_tooltip())
        .legend(Legend::new())
        .grid(grid())
        .color(colors(&[PURPLE, ORANGE]))
        .x_axis(category_axis(labels))
        .y_axis(value_axis("Projects"))
        .series(bar::Bar::new().name("Initiated").data(initiated))
        .series(bar::Bar::new().name("Completed").data(completed))
}

pub(super) fn faculty_gauge_chart(percent: i64) -> Chart {
    radial_gauge("Active faculty", percent, ORANGE)
}

pub(super) fn student_engagement_chart(engagement: &StudentEngagement) -> Chart {
    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(grid())
        .color(colors(&[PURPLE]))
        .x_axis(category_axis(engagement.labels.clone()))
        .y_axis(
            value_axis("Engaged")
                .axis_label(AxisLabel::new().formatter(suffix_formatter("%"))),
        )
        .series(
            Line::new()
                .name("Engaged students")
                .smooth(true)
                .area_style(AreaStyle::new())
                .data(engagement.values.clone()),
        )
}

pub(super) fn training_chart(training: &TrainingParticipation) -> Chart {
    let series = [
        ("Workshops", &training.workshops),
        ("Certifications", &training.certifications),
        ("Seminars", &training.seminars),
    ];

    let mut chart = Chart::new()
        .tooltip(axis_tooltip())
        .legend(Legend::new())
        .grid(grid())
        .color(colors(&[ORANGE, PURPLE, TEAL]))
        .x_axis(category_axis(training.labels.clone()))
        .y_axis(value_axis("Participants"));

    for (name, data) in series {
        chart = chart.series(
            bar::Bar::new()
                .name(name)
                .stack("Participation")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data.clone()),
        );
    }

    chart
}

pub(super) fn course_integration_chart(curriculum: &Curriculum) -> Chart {
    let ai_courses = f64::from(curriculum.ai_courses);
    let other_courses = f64::from(curriculum.total_courses - curriculum.ai_courses);

    doughnut(
        "Courses",
        &[ORANGE, TRACK],
        vec![(ai_courses, "AI-integrated"), (other_courses, "Other")],
    )
}

/// Grant amounts as bars on the left axis and grant counts as a line on the right.
pub(super) fn research_grants_chart(research: &ResearchGrants) -> Chart {
    Chart::new()
        .tooltip(axis_tooltip())
        .legend(Legend::new())
        .grid(grid())
        .color(colors(&[PURPLE, ORANGE]))
        .x_axis(category_axis(research.labels.clone()))
        .y_axis(
            value_axis("Amount")
                .axis_label(AxisLabel::new().formatter(currency_millions_formatter())),
        )
        .y_axis(value_axis("Grants"))
        .series(
            bar::Bar::new()
                .name("Grant amount ($M)")
                .data(research.grant_amounts.clone()),
        )
        .series(
            Line::new()
                .name("Grant count")
                .y_axis_index(1)
                .data(research.grant_counts.clone()),
        )
}

fn currency_millions_formatter() -> JsFunction {
    JsFunction::new_with_args("value", "return '$' + value + 'M';")
}

pub(super) fn publications_chart(publications: &Publications) -> Chart {
    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new())
        .grid(grid())
        .color(colors(&[PURPLE, ORANGE]))
        .x_axis(category_axis(publications.labels.clone()))
        .y_axis(value_axis("Publications"))
        .y_axis(value_axis("Citations"))
        .series(
            Line::new()
                .name("Publications")
                .data(publications.pubs.clone()),
        )
        .series(
            Line::new()
                .name("Citations")
                .y_axis_index(1)
                .data(publications.citations.clone()),
        )
}

/// Hours saved on the left axis and cost saved, in thousands of dollars, on
/// the right.
pub(super) fn process_savings_chart(savings: &[CategorySavings]) -> Chart {
    let labels = savings
        .iter()
        .map(|bucket| bucket.category.label().to_owned())
        .collect();
    let hours: Vec<f64> = savings.iter().map(|bucket| bucket.hours_saved).collect();
    let cost: Vec<f64> = savings
        .iter()
        .map(|bucket| (bucket.cost_saved / 1000.0 * 10.0).round() / 10.0)
        .collect();

    Chart::new()
        .tooltip(axis_tooltip())
        .legend(Legend::new())
        .grid(grid())
        .color(colors(&[PURPLE, ORANGE]))
        .x_axis(category_axis(labels))
        .y_axis(value_axis("Hours"))
        .y_axis(
            value_axis("Cost")
                .axis_label(AxisLabel::new().formatter(suffix_formatter("k"))),
        )
        .series(bar::Bar::new().name("Hours saved").data(hours))
        .series(
            bar::Bar::new()
                .name("Cost saved ($K)")
                .y_axis_index(1)
                .data(cost),
        )
}

pub(super) fn governance_gauge_chart(percent: i64, tier: GaugeTier) -> Chart {
    radial_gauge("Milestones completed", percent, tier.color())
}

pub(super) fn ethics_reviews_chart(reviews: &EthicsReviews) -> Chart {
    let data = reviews
        .outcomes()
        .into_iter()
        .map(|(label, count)| (f64::from(count), label))
        .collect();

    doughnut("Reviews", &[GREEN, YELLOW, ORANGE], data)
}

pub(super) fn security_incidents_chart(incidents: &SecurityIncidents) -> Chart {
    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(grid())
        .color(colors(&[ORANGE]))
        .x_axis(category_axis(incidents.labels.clone()))
        .y_axis(value_axis("Incidents"))
        .series(
            Line::new()
                .name("Incidents")
                .data(incidents.incidents.clone()),
        )
}

/// The institution against the peer average on each axis, scored out of 100.
pub(super) fn benchmark_chart(benchmark: &Benchmark) -> Chart {
    let institution_name = benchmark.institution_name.as_deref().unwrap_or("Institution");
    let indicators = benchmark
        .axes
        .iter()
        .map(|axis| (axis.as_str(), 0, 100))
        .collect::<Vec<_>>();

    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .color(colors(&[ORANGE, PURPLE]))
        .radar(RadarCoordinate::new().indicator(indicators))
        .series(Radar::new().name("Benchmark").data(vec![
            (benchmark.institution.clone(), institution_name),
            (benchmark.peers.clone(), "Peer Avg"),
        ]))
}

/// ROI percentage on the left axis and cumulative value created on the right.
pub(super) fn roi_trend_chart(roi: &RoiTrend) -> Chart {
    Chart::new()
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new())
        .grid(grid())
        .color(colors(&[ORANGE, PURPLE]))
        .x_axis(category_axis(roi.labels.clone()))
        .y_axis(
            value_axis("ROI")
                .axis_label(AxisLabel::new().formatter(suffix_formatter("%"))),
        )
        .y_axis(
            value_axis("Value")
                .axis_label(AxisLabel::new().formatter(currency_millions_formatter())),
        )
        .series(Line::new().name("ROI %").data(roi.roi_pct.clone()))
        .series(
            Line::new()
                .name("Value created ($M)")
                .y_axis_index(1)
                .area_style(AreaStyle::new())
                .data(roi.value_created.clone()),
        )
}

#[cfg(test)]
mod tests {
    use charming::Chart;

    use crate::{
        dashboard::aggregation::{GaugeTier, savings_by_category},
        dataset::{Benchmark, Processes, ProjectRecord, RoiTrend, test_data::sample_dataset},
    };

    use super::{
        DashboardChart, benchmark_chart, chart_init_script, charts_script,
        governance_gauge_chart, process_savings_chart, project_funnel_chart, roi_trend_chart,
    };

    fn options(chart: Chart) -> serde_json::Value {
        serde_json::from_str(&chart.to_string()).expect("chart options should be valid JSON")
    }

    /// The first x axis, whether it was serialized on its own or in a list.
    fn x_axis(options: &serde_json::Value) -> &serde_json::Value {
        match &options["xAxis"] {
            serde_json::Value::Array(axes) => &axes[0],
            axis => axis,
        }
    }

    #[test]
    fn project_chart_has_a_bar_per_status() {
        let cs = ProjectRecord {
            dept: "CS".to_owned(),
            initiated: 10,
            completed: 4,
        };

        let options = options(project_funnel_chart(&[&cs]));

        assert_eq!(x_axis(&options)["data"][0], "CS");
        assert_eq!(options["series"][0]["name"], "Initiated");
        assert_eq!(options["series"][0]["data"][0], 10.0);
        assert_eq!(options["series"][1]["name"], "Completed");
        assert_eq!(options["series"][1]["data"][0], 4.0);
    }

    #[test]
    fn savings_chart_shows_cost_in_thousands_on_second_axis() {
        let processes = sample_dataset().section::<Processes>().unwrap();

        // The axis formatter is raw JavaScript, so the options are not JSON.
        let json = process_savings_chart(&savings_by_category(&processes.0)).to_string();

        assert!(json.contains("\"Financial Aid\""), "got {json}");
        assert!(json.contains("\"yAxisIndex\""), "got {json}");
        assert!(json.contains("18.9"), "got {json}");
    }

    #[test]
    fn gauge_is_coloured_by_tier() {
        let json = governance_gauge_chart(77, GaugeTier::Warning).to_string();

        assert!(json.contains("#E6B800"), "got {json}");
        assert!(json.contains("77%"), "got {json}");
    }

    #[test]
    fn benchmark_compares_institution_with_peers() {
        let benchmark = Benchmark {
            axes: vec!["Research".to_owned(), "Teaching".to_owned()],
            institution: vec![80.0, 70.0],
            peers: vec![60.0, 65.0],
            institution_name: None,
        };

        let json = benchmark_chart(&benchmark).to_string();

        assert!(json.contains("Institution"), "got {json}");
        assert!(json.contains("Peer Avg"), "got {json}");
        assert!(json.contains("Research"), "got {json}");
    }

    #[test]
    fn roi_value_uses_second_axis() {
        let roi = RoiTrend {
            labels: vec!["FY24".to_owned(), "FY25".to_owned()],
            roi_pct: vec![80.0, 112.0],
            value_created: vec![1.1, 2.4],
        };

        let json = roi_trend_chart(&roi).to_string();

        assert!(json.contains("\"Value created ($M)\""), "got {json}");
        assert!(json.contains("\"yAxisIndex\""), "got {json}");
        assert!(json.contains("return '$' + value + 'M';"), "got {json}");
    }

    #[test]
    fn script_initializes_every_chart_after_load() {
        let charts = [
            DashboardChart {
                id: "a-chart".to_owned(),
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "b-chart".to_owned(),
                options: "{}".to_owned(),
            },
        ];

        let crate::html::HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("want inline script");
        };

        assert!(script.0.starts_with("document.addEventListener('DOMContentLoaded'"));
        assert!(script.0.contains("getElementById(\"a-chart\")"));
        assert!(script.0.contains("getElementById(\"b-chart\")"));
    }

    #[test]
    fn swapped_chart_replaces_the_previous_instance() {
        let chart = DashboardChart {
            id: "projects-chart".to_owned(),
            options: "{}".to_owned(),
        };

        let script = chart_init_script(&chart).0;

        let cleanup = script
            .find("registry[chartId]();")
            .expect("previous chart should be cleaned up");
        let init = script
            .find("echarts.init(chartDom)")
            .expect("chart should be initialized");
        assert!(cleanup < init);
        assert!(script.contains("window.removeEventListener('resize', resize)"));
        assert!(script.contains("removeEventListener('change', updateTheme)"));
        assert!(script.contains("chart.dispose()"));
    }

    #[test]
    fn options_cannot_close_the_script_element() {
        let chart = Chart::new().title(charming::component::Title::new().text("</script>"));

        let chart = DashboardChart::new("x-chart".to_owned(), chart);

        assert!(!chart.options.contains("</script>"));
    }
}
