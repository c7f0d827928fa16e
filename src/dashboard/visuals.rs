//! Every visual on the dashboard, with its stable DOM id, title and place on the page.

/// A group of related visuals shown under one heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSection {
    Overview,
    Adoption,
    Research,
    Operations,
    Governance,
    Strategy,
}

impl PageSection {
    /// Every section in page order.
    pub const ALL: [PageSection; 6] = [
        PageSection::Overview,
        PageSection::Adoption,
        PageSection::Research,
        PageSection::Operations,
        PageSection::Governance,
        PageSection::Strategy,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            PageSection::Overview => "Overview",
            PageSection::Adoption => "Adoption & Engagement",
            PageSection::Research => "Research & Collaboration",
            PageSection::Operations => "Operational Efficiency",
            PageSection::Governance => "Governance & Risk",
            PageSection::Strategy => "Strategic Alignment & ROI",
        }
    }
}

/// One visual on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualId {
    Kpis,
    ProjectFunnel,
    FacultyAdoption,
    StudentEngagement,
    TrainingParticipation,
    CourseIntegration,
    ResearchGrants,
    Publications,
    CollaborationHeatmap,
    ProcessSavings,
    ProcessList,
    ServiceImprovements,
    GovernanceProgress,
    EthicsReviews,
    SecurityIncidents,
    RiskIndicators,
    StrategicAlignment,
    Benchmark,
    RoiTrend,
}

impl VisualId {
    /// Every visual in page order.
    pub const ALL: [VisualId; 19] = [
        VisualId::Kpis,
        VisualId::ProjectFunnel,
        VisualId::FacultyAdoption,
        VisualId::StudentEngagement,
        VisualId::TrainingParticipation,
        VisualId::CourseIntegration,
        VisualId::ResearchGrants,
        VisualId::Publications,
        VisualId::CollaborationHeatmap,
        VisualId::ProcessSavings,
        VisualId::ProcessList,
        VisualId::ServiceImprovements,
        VisualId::GovernanceProgress,
        VisualId::EthicsReviews,
        VisualId::SecurityIncidents,
        VisualId::RiskIndicators,
        VisualId::StrategicAlignment,
        VisualId::Benchmark,
        VisualId::RoiTrend,
    ];

    /// The id of the element that wraps the visual's panel.
    ///
    /// Refreshing a visual replaces this element wholesale.
    pub fn dom_id(self) -> &'static str {
        match self {
            VisualId::Kpis => "kpi-panel",
            VisualId::ProjectFunnel => "projects-panel",
            VisualId::FacultyAdoption => "faculty-panel",
            VisualId::StudentEngagement => "students-panel",
            VisualId::TrainingParticipation => "training-panel",
            VisualId::CourseIntegration => "courses-panel",
            VisualId::ResearchGrants => "grants-panel",
            VisualId::Publications => "publications-panel",
            VisualId::CollaborationHeatmap => "collab-panel",
            VisualId::ProcessSavings => "savings-panel",
            VisualId::ProcessList => "process-panel",
            VisualId::ServiceImprovements => "services-panel",
            VisualId::GovernanceProgress => "governance-panel",
            VisualId::EthicsReviews => "ethics-panel",
            VisualId::SecurityIncidents => "security-panel",
            VisualId::RiskIndicators => "risk-panel",
            VisualId::StrategicAlignment => "scorecard-panel",
            VisualId::Benchmark => "benchmark-panel",
            VisualId::RoiTrend => "roi-panel",
        }
    }

    /// The id of the ECharts container inside the panel.
    pub fn chart_dom_id(self) -> String {
        format!("{}-chart", self.dom_id().trim_end_matches("-panel"))
    }

    pub fn title(self) -> &'static str {
        match self {
            VisualId::Kpis => "Key Indicators",
            VisualId::ProjectFunnel => "AI Projects",
            VisualId::FacultyAdoption => "Faculty Adoption",
            VisualId::StudentEngagement => "Student Engagement",
            VisualId::TrainingParticipation => "Training Participation",
            VisualId::CourseIntegration => "AI-Integrated Courses",
            VisualId::ResearchGrants => "Research Grants",
            VisualId::Publications => "Publications & Citations",
            VisualId::CollaborationHeatmap => "Cross-Department Collaboration",
            VisualId::ProcessSavings => "Savings by Process Area",
            VisualId::ProcessList => "Automated Processes",
            VisualId::ServiceImprovements => "Service Improvements",
            VisualId::GovernanceProgress => "Governance Milestones",
            VisualId::EthicsReviews => "Ethics Reviews",
            VisualId::SecurityIncidents => "Security Incidents",
            VisualId::RiskIndicators => "Risk Indicators",
            VisualId::StrategicAlignment => "Strategic Alignment Scorecard",
            VisualId::Benchmark => "Peer Benchmark",
            VisualId::RoiTrend => "Return on Investment",
        }
    }

    pub fn section(self) -> PageSection {
        match self {
            VisualId::Kpis | VisualId::ProjectFunnel => PageSection::Overview,
            VisualId::FacultyAdoption
            | VisualId::StudentEngagement
            | VisualId::TrainingParticipation
            | VisualId::CourseIntegration => PageSection::Adoption,
            VisualId::ResearchGrants
            | VisualId::Publications
            | VisualId::CollaborationHeatmap => PageSection::Research,
            VisualId::ProcessSavings | VisualId::ProcessList | VisualId::ServiceImprovements => {
                PageSection::Operations
            }
            VisualId::GovernanceProgress
            | VisualId::EthicsReviews
            | VisualId::SecurityIncidents
            | VisualId::RiskIndicators => PageSection::Governance,
            VisualId::StrategicAlignment | VisualId::Benchmark | VisualId::RoiTrend => {
                PageSection::Strategy
            }
        }
    }
}
