//! Renders dashboard panels, the filter controls and the full page as HTML.
//!
//! Every panel is rendered as one element with the visual's DOM id, so a
//! refresh replaces the previous output of that panel entirely.

use maud::{Markup, html};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    dashboard::{
        builders::{
            BreakdownItem, Heatmap, KpiCard, Panel, PanelBody, ProcessItem, ProjectRow,
            RiskItem, ScorecardRow, ServiceItem,
        },
        charts::{DashboardChart, chart_init_script, charts_script},
        filters::{ALL_DEPARTMENTS, DepartmentFilter, FilterState, Period, Range, control},
        orchestrator::{DashboardView, PanelOutcome},
        visuals::{PageSection, VisualId},
    },
    endpoints,
    html::{
        CAPTION_STYLE, CARD_STYLE, CARD_TITLE_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE,
        FORM_SELECT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TOGGLE_BUTTON_ACTIVE_STYLE, TOGGLE_BUTTON_STYLE,
        base,
    },
};

/// The id of the element that shows while a filter refresh is in flight.
const LOADING_INDICATOR_ID: &str = "loading-indicator";
const PERIOD_TOGGLE_ID: &str = "period-toggle";
const DEPARTMENT_SELECT_ID: &str = "department-select";
const RANGE_SELECT_ID: &str = "range-select";

const LOADED_AT_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// Whether a panel is part of the initial page or swapped in later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Placement {
    /// Charts are initialized by the page's load script.
    Page,
    /// Charts are initialized by a script inside the panel.
    Swap,
}

/// Render one panel, or an error card in its place if it failed to build.
pub(super) fn panel_view(outcome: &PanelOutcome, placement: Placement) -> Markup {
    match &outcome.panel {
        Ok(panel) => built_panel_view(panel, placement),
        Err(_) => error_card(outcome.visual),
    }
}

fn panel_class(visual: VisualId) -> String {
    match visual {
        VisualId::Kpis | VisualId::StrategicAlignment | VisualId::CollaborationHeatmap => {
            format!("{CARD_STYLE} xl:col-span-2")
        }
        _ => CARD_STYLE.to_owned(),
    }
}

fn built_panel_view(panel: &Panel, placement: Placement) -> Markup {
    let visual = panel.visual;

    html! {
        div id=(visual.dom_id()) class=(panel_class(visual)) data-visual=(visual.dom_id())
        {
            h3 class=(CARD_TITLE_STYLE)
            {
                (visual.title())

                @if let Some(subtitle) = &panel.subtitle {
                    " "
                    span class="panel-subtitle text-gray-500 dark:text-gray-400" { "(" (subtitle) ")" }
                }
            }

            @if let Some(notice) = &panel.notice {
                p class="panel-notice text-sm text-yellow-700 dark:text-yellow-400 mb-2" role="status"
                {
                    (notice)
                }
            }

            @if let Some(chart) = &panel.chart {
                div id=(chart.id) class="chart min-h-[300px] rounded" {}

                @if placement == Placement::Swap {
                    script { (chart_init_script(chart)) }
                }
            }

            (body_view(&panel.body))

            @if let Some(caption) = &panel.caption {
                p class={"panel-caption mt-2 " (CAPTION_STYLE)} { (caption) }
            }
        }
    }
}

/// Shown in place of a visual whose data could not be used.
fn error_card(visual: VisualId) -> Markup {
    html! {
        div
            id=(visual.dom_id())
            class={(panel_class(visual)) " panel-error"}
            data-visual=(visual.dom_id())
            role="alert"
        {
            h3 class=(CARD_TITLE_STYLE) { (visual.title()) }

            p class="text-red-700 dark:text-red-400 font-medium" { "Data unavailable" }
            p class=(CAPTION_STYLE) { "This section of the dataset could not be read." }
        }
    }
}

fn body_view(body: &PanelBody) -> Markup {
    match body {
        PanelBody::Empty => html! {},
        PanelBody::Kpis(cards) => kpi_cards_view(cards),
        PanelBody::Projects(rows) => project_table_view(rows),
        PanelBody::Breakdown(items) => breakdown_view(items),
        PanelBody::Heatmap(heatmap) => heatmap_view(heatmap),
        PanelBody::Processes(items) => process_list_view(items),
        PanelBody::Services(items) => service_list_view(items),
        PanelBody::Risks(items) => risk_list_view(items),
        PanelBody::Scorecard(rows) => scorecard_view(rows),
    }
}

fn kpi_cards_view(cards: &[KpiCard]) -> Markup {
    html! {
        div class="grid grid-cols-2 md:grid-cols-3 xl:grid-cols-6 gap-4"
        {
            @for card in cards {
                div id=(card.id) class="kpi-card rounded border border-gray-200 dark:border-gray-700 p-3"
                {
                    div class=(CAPTION_STYLE) { (card.title) }

                    @match &card.figure {
                        Ok(figure) => {
                            div class="kpi-value text-2xl font-bold" { (figure.value) }
                            div class={"kpi-detail " (CAPTION_STYLE)} { (figure.detail) }
                        }
                        Err(_) => {
                            div class="kpi-value text-2xl font-bold text-gray-400" { "—" }
                            div class="kpi-detail text-sm text-red-700 dark:text-red-400" { "Data unavailable" }
                        }
                    }
                }
            }
        }
    }
}

fn project_table_view(rows: &[ProjectRow]) -> Markup {
    html! {
        table class="w-full mt-2 text-sm text-left"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Department" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Initiated" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Completed" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Completion" }
                }
            }

            tbody
            {
                @for row in rows {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (row.department) }
                        td class=(TABLE_CELL_STYLE) { (row.initiated) }
                        td class=(TABLE_CELL_STYLE) { (row.completed) }
                        td class=(TABLE_CELL_STYLE) { (row.completion) "%" }
                    }
                }
            }
        }
    }
}

fn breakdown_view(items: &[BreakdownItem]) -> Markup {
    html! {
        ul class="breakdown mt-2 space-y-1 text-sm"
        {
            @for item in items {
                li class="flex justify-between"
                {
                    span { (item.label) }
                    span class="font-medium" { (item.value) }
                }
            }
        }
    }
}

fn heatmap_view(heatmap: &Heatmap) -> Markup {
    let columns = heatmap.departments.len();
    let grid_style = format!("grid-template-columns: auto repeat({columns}, minmax(2.5rem, 1fr));");

    html! {
        div class="heatmap" style=(grid_style)
        {
            div class="heat-label" {}
            @for department in &heatmap.departments {
                div class="heat-label heat-column-label" { (department) }
            }

            @for (row, department) in heatmap.departments.iter().enumerate() {
                div class="heat-label heat-row-label" { (department) }

                @for cell in heatmap.cells.iter().skip(row * columns).take(columns) {
                    div class="heat-cell" style={"background-color: " (cell.color)} title=(cell.title)
                    {
                        (cell.text)
                    }
                }
            }
        }
    }
}

fn process_list_view(items: &[ProcessItem]) -> Markup {
    html! {
        ul class="process-list divide-y divide-gray-200 dark:divide-gray-700"
        {
            @for item in items {
                li class="py-2"
                {
                    div class="flex items-center justify-between gap-2"
                    {
                        span class="font-medium" { (item.name) }
                        span class=(item.status_class) { (item.status) }
                    }

                    div class={"flex justify-between " (CAPTION_STYLE)}
                    {
                        span { (item.hours) }
                        span { (item.cost) }
                    }

                    div class="efficiency-track" aria-hidden="true"
                    {
                        div class="efficiency-bar" style=(format!("width: {:.0}%", item.efficiency)) {}
                    }
                }
            }
        }
    }
}

fn service_list_view(items: &[ServiceItem]) -> Markup {
    html! {
        ul class="service-list space-y-1 text-sm"
        {
            @for item in items {
                li class="flex justify-between"
                {
                    span { (item.metric) }

                    @if item.improved {
                        span class="service-improved font-semibold text-green-700 dark:text-green-400" { (item.value) }
                    } @else {
                        span class="service-declined font-semibold text-red-700 dark:text-red-400" { (item.value) }
                    }
                }
            }
        }
    }
}

fn risk_list_view(items: &[RiskItem]) -> Markup {
    html! {
        ul class="risk-list space-y-1 text-sm"
        {
            @for item in items {
                li class="flex items-center gap-2"
                {
                    span class=(item.tier.dot_class()) title=(item.tier.label()) {}
                    span class="flex-1" { (item.area) }
                    span class="font-medium" { (item.score) }
                }
            }
        }
    }
}

fn sparkline_view(path: &str) -> Markup {
    html! {
        svg
            class="sparkline"
            width="60"
            height="24"
            viewBox="0 0 60 24"
            aria-hidden="true"
        {
            path d=(path) fill="none" stroke="currentColor" stroke-width="1.5" {}
        }
    }
}

fn scorecard_view(rows: &[ScorecardRow]) -> Markup {
    html! {
        table class="w-full text-sm text-left"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Goal" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Metric" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Value" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Trend" }
                }
            }

            tbody
            {
                @for row in rows {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (row.goal) }
                        td class=(TABLE_CELL_STYLE) { (row.metric) }
                        td class=(TABLE_CELL_STYLE) { (row.value) }
                        td class=(TABLE_CELL_STYLE) { span class=(row.status_class) { (row.status) } }
                        td class=(TABLE_CELL_STYLE)
                        {
                            @if let Some(path) = &row.sparkline {
                                (sparkline_view(path))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The period buttons. Choosing a period re-renders this group with the new
/// active button and updates the hidden input read by the other controls.
pub(super) fn period_toggle_view(selected: Period) -> Markup {
    html! {
        div id=(PERIOD_TOGGLE_ID) class="inline-flex" role="group" aria-label="Period"
        {
            input type="hidden" name=(control::PERIOD) value=(selected.query_value());

            @for period in Period::ALL {
                button
                    type="button"
                    name=(control::PERIOD)
                    value=(period.query_value())
                    hx-get=(endpoints::DASHBOARD_FILTERS)
                    hx-target={"#" (PERIOD_TOGGLE_ID)}
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    aria-pressed=(if period == selected { "true" } else { "false" })
                    class=(if period == selected { TOGGLE_BUTTON_ACTIVE_STYLE } else { TOGGLE_BUTTON_STYLE })
                {
                    (period.label())
                }
            }
        }
    }
}

fn department_select_view(
    departments: &Result<Vec<String>, Error>,
    selected: &DepartmentFilter,
) -> Markup {
    let include = format!("#{PERIOD_TOGGLE_ID} input[name='period'], #{RANGE_SELECT_ID}");

    html! {
        div
        {
            label for=(DEPARTMENT_SELECT_ID) class=(FORM_LABEL_STYLE) { "Department" }

            select
                id=(DEPARTMENT_SELECT_ID)
                name=(control::DEPARTMENT)
                class=(FORM_SELECT_STYLE)
                hx-get=(endpoints::DASHBOARD_FILTERS)
                hx-trigger="change"
                hx-include=(include)
                hx-target={"#" (VisualId::ProjectFunnel.dom_id())}
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-indicator={"#" (LOADING_INDICATOR_ID)}
            {
                option value=(ALL_DEPARTMENTS) selected[*selected == DepartmentFilter::All]
                {
                    "All departments"
                }

                @if let Ok(departments) = departments {
                    @for department in departments {
                        option value=(department) selected[selected.selects(department)] { (department) }
                    }
                }
            }

            @if departments.is_err() {
                p class="text-xs text-red-700 dark:text-red-400 mt-1" { "Department list unavailable" }
            }
        }
    }
}

fn range_select_view(selected: Range) -> Markup {
    let include = format!("#{PERIOD_TOGGLE_ID} input[name='period'], #{DEPARTMENT_SELECT_ID}");

    html! {
        div
        {
            label for=(RANGE_SELECT_ID) class=(FORM_LABEL_STYLE) { "Range" }

            select
                id=(RANGE_SELECT_ID)
                name=(control::RANGE)
                class=(FORM_SELECT_STYLE)
                hx-get=(endpoints::DASHBOARD_FILTERS)
                hx-trigger="change"
                hx-include=(include)
                hx-swap="none"
                hx-target-error="#alert-container"
            {
                @for range in Range::ALL {
                    option value=(range.query_value()) selected[range == selected] { (range.label()) }
                }
            }
        }
    }
}

fn filters_view(filters: &FilterState, departments: &Result<Vec<String>, Error>) -> Markup {
    html! {
        form
            id="dashboard-filters"
            action=(endpoints::DASHBOARD_VIEW)
            method="get"
            class="w-full flex flex-wrap items-end gap-4 mb-6"
        {
            div
            {
                span class=(FORM_LABEL_STYLE) { "Period" }
                (period_toggle_view(filters.period))
            }

            (department_select_view(departments, &filters.department))
            (range_select_view(filters.range))

            span id=(LOADING_INDICATOR_ID) class={"htmx-indicator " (CAPTION_STYLE)} role="status"
            {
                "Updating…"
            }
        }
    }
}

fn format_loaded_at(loaded_at: OffsetDateTime) -> String {
    loaded_at
        .format(LOADED_AT_FORMAT)
        .inspect_err(|error| tracing::warn!("Could not format the load time: {error}"))
        .unwrap_or_default()
}

/// The panels swapped in after a filter change, each with its own chart script.
pub(super) fn refreshed_panels_view(outcomes: &[PanelOutcome]) -> Markup {
    html! {
        @for outcome in outcomes {
            (panel_view(outcome, Placement::Swap))
        }
    }
}

/// The full dashboard page.
pub(super) fn dashboard_view(view: &DashboardView) -> Markup {
    let charts: Vec<&DashboardChart> = view
        .panels
        .iter()
        .filter_map(|outcome| outcome.panel.as_ref().ok())
        .filter_map(|panel| panel.chart.as_ref())
        .collect();

    let content = html! {
        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            header class="w-full mb-4"
            {
                h1 class="text-2xl font-bold" { "AI Adoption Dashboard" }

                p id="dataset-version" class=(CAPTION_STYLE)
                {
                    "Dataset: " (view.version.as_deref().unwrap_or("unversioned"))
                }

                p id="loaded-at" class=(CAPTION_STYLE)
                {
                    "Loaded " (format_loaded_at(view.loaded_at))
                }
            }

            (filters_view(&view.filters, &view.departments))

            @for section in PageSection::ALL {
                section class="w-full mb-8" aria-label=(section.heading())
                {
                    h2 class="text-xl font-semibold mb-3" { (section.heading()) }

                    div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                    {
                        @for outcome in view.panels.iter().filter(|outcome| outcome.visual.section() == section) {
                            (panel_view(outcome, Placement::Page))
                        }
                    }
                }
            }
        }
    };

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
