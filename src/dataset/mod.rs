//! The AI-adoption dataset and its typed sections.
//!
//! The dataset is a single JSON object loaded from a [DataSource]. It is kept
//! as raw, named sections and each section is decoded into its typed form
//! only when a view asks for it. A missing or malformed section therefore
//! only breaks the visuals that read it.

mod loader;

use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::Error;

pub use loader::{DataLoadError, DataSource, load_dataset};

/// The key of the optional, display-only dataset version string.
const VERSION_KEY: &str = "datasetVersion";

/// A loaded, read-only snapshot of the dashboard dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    version: Option<String>,
    sections: Map<String, Value>,
    loaded_at: OffsetDateTime,
}

impl Dataset {
    /// Parse a dataset from the raw bytes of a JSON document.
    ///
    /// # Errors
    /// Returns [DataLoadError::Parse] if the bytes are not valid JSON and
    /// [DataLoadError::NotAnObject] if the document root is not an object.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DataLoadError> {
        let document: Value = serde_json::from_slice(bytes).map_err(DataLoadError::Parse)?;

        let Value::Object(sections) = document else {
            return Err(DataLoadError::NotAnObject);
        };

        let version = match sections.get(VERSION_KEY) {
            Some(Value::String(version)) => Some(version.clone()),
            Some(other) => {
                tracing::warn!("ignoring non-string {VERSION_KEY}: {other}");
                None
            }
            None => None,
        };

        Ok(Self {
            version,
            sections,
            loaded_at: OffsetDateTime::now_utc(),
        })
    }

    /// The display-only version label of the dataset, if it has one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// When this snapshot was loaded.
    pub fn loaded_at(&self) -> OffsetDateTime {
        self.loaded_at
    }

    /// The number of top-level keys in the document.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Decode and validate the section `S`.
    ///
    /// # Errors
    /// - [Error::MissingSection] if the document has no `S::KEY` key.
    /// - [Error::MalformedSection] if the value does not decode into `S`.
    /// - [Error::InvalidSection] if the decoded value breaks an invariant.
    pub fn section<S: Section>(&self) -> Result<S, Error> {
        let raw = self
            .sections
            .get(S::KEY)
            .ok_or(Error::MissingSection(S::KEY))?;

        let section = S::deserialize(raw).map_err(|source| Error::MalformedSection {
            section: S::KEY,
            source,
        })?;

        section
            .validate()
            .map_err(|reason| Error::InvalidSection {
                section: S::KEY,
                reason,
            })?;

        Ok(section)
    }
}

/// A top-level section of the dataset document.
pub trait Section: DeserializeOwned {
    /// The JSON key the section is stored under.
    const KEY: &'static str;

    /// Check the invariants that decoding alone cannot express.
    ///
    /// The error is a human readable reason.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Fails with a reason if `series` does not have one value per label.
fn check_aligned<T>(series_name: &str, series: &[T], labels: usize) -> Result<(), String> {
    if series.len() == labels {
        Ok(())
    } else {
        Err(format!(
            "{series_name} has {} values but there are {labels} labels",
            series.len()
        ))
    }
}

/// A value shown verbatim, either a preformatted string or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Number(f64),
}

impl Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(text) => f.write_str(text),
            DisplayValue::Number(number) if number.fract() == 0.0 => write!(f, "{number:.0}"),
            DisplayValue::Number(number) => write!(f, "{number}"),
        }
    }
}

/// The ordered roster of departments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Departments(pub Vec<String>);

impl Section for Departments {
    const KEY: &'static str = "departments";

    fn validate(&self) -> Result<(), String> {
        if self.0.is_empty() {
            return Err("the department roster is empty".to_owned());
        }

        for (i, name) in self.0.iter().enumerate() {
            if self.0[..i].contains(name) {
                return Err(format!("the department \"{name}\" is listed more than once"));
            }
        }

        Ok(())
    }
}

/// One department's AI-project funnel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectRecord {
    pub dept: String,
    pub initiated: u32,
    pub completed: u32,
}

/// Every department's project funnel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Projects(pub Vec<ProjectRecord>);

impl Section for Projects {
    const KEY: &'static str = "projectData";

    fn validate(&self) -> Result<(), String> {
        match self.0.iter().find(|p| p.completed > p.initiated) {
            Some(project) => Err(format!(
                "{} completed {} projects but only initiated {}",
                project.dept, project.completed, project.initiated
            )),
            None => Ok(()),
        }
    }
}

/// Number of faculty using a particular AI tool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolUsage {
    pub tool: String,
    pub users: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyAdoption {
    pub total_faculty: u32,
    pub active_faculty: u32,
    #[serde(default)]
    pub distribution: Vec<ToolUsage>,
}

impl Section for FacultyAdoption {
    const KEY: &'static str = "facultyAdoption";

    fn validate(&self) -> Result<(), String> {
        if self.active_faculty > self.total_faculty {
            return Err(format!(
                "{} active faculty exceeds the total of {}",
                self.active_faculty, self.total_faculty
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEngagement {
    pub total_students: u32,
    pub engaged_students: u32,
    /// Month labels for the engagement series.
    #[serde(rename = "labelsM")]
    pub labels: Vec<String>,
    /// Percent of students engaged in each month.
    #[serde(rename = "valuesM")]
    pub values: Vec<f64>,
}

impl Section for StudentEngagement {
    const KEY: &'static str = "studentEngagement";

    fn validate(&self) -> Result<(), String> {
        if self.engaged_students > self.total_students {
            return Err(format!(
                "{} engaged students exceeds the total of {}",
                self.engaged_students, self.total_students
            ));
        }

        check_aligned("valuesM", &self.values, self.labels.len())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingParticipation {
    pub labels: Vec<String>,
    pub workshops: Vec<f64>,
    pub certifications: Vec<f64>,
    pub seminars: Vec<f64>,
}

impl Section for TrainingParticipation {
    const KEY: &'static str = "trainingParticipation";

    fn validate(&self) -> Result<(), String> {
        let labels = self.labels.len();
        check_aligned("workshops", &self.workshops, labels)?;
        check_aligned("certifications", &self.certifications, labels)?;
        check_aligned("seminars", &self.seminars, labels)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    pub total_courses: u32,
    pub ai_courses: u32,
    /// The number of AI-integrated courses in the previous year.
    pub prev_year: u32,
}

impl Section for Curriculum {
    const KEY: &'static str = "curriculum";

    fn validate(&self) -> Result<(), String> {
        if self.ai_courses > self.total_courses {
            return Err(format!(
                "{} AI-integrated courses exceeds the total of {}",
                self.ai_courses, self.total_courses
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchGrants {
    pub labels: Vec<String>,
    /// Grant amounts in millions of dollars.
    pub grant_amounts: Vec<f64>,
    pub grant_counts: Vec<f64>,
}

impl Section for ResearchGrants {
    const KEY: &'static str = "research";

    fn validate(&self) -> Result<(), String> {
        check_aligned("grantAmounts", &self.grant_amounts, self.labels.len())?;
        check_aligned("grantCounts", &self.grant_counts, self.labels.len())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Publications {
    pub labels: Vec<String>,
    pub pubs: Vec<f64>,
    pub citations: Vec<f64>,
}

impl Section for Publications {
    const KEY: &'static str = "publications";

    fn validate(&self) -> Result<(), String> {
        check_aligned("pubs", &self.pubs, self.labels.len())?;
        check_aligned("citations", &self.citations, self.labels.len())
    }
}

/// Counts of cross-department collaborations, indexed by department position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CollaborationMatrix(pub Vec<Vec<u32>>);

impl Section for CollaborationMatrix {
    const KEY: &'static str = "collabMatrix";

    fn validate(&self) -> Result<(), String> {
        let side = self.0.len();

        match self.0.iter().position(|row| row.len() != side) {
            Some(i) => Err(format!(
                "row {i} has {} columns but the matrix has {side} rows",
                self.0[i].len()
            )),
            None => Ok(()),
        }
    }
}

/// The automation stage of an operational process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ProcessStatus {
    Automated(String),
    Pilot(String),
    Planned(String),
    Other(String),
}

impl ProcessStatus {
    /// The status text as written in the dataset.
    pub fn label(&self) -> &str {
        match self {
            ProcessStatus::Automated(label)
            | ProcessStatus::Pilot(label)
            | ProcessStatus::Planned(label)
            | ProcessStatus::Other(label) => label,
        }
    }
}

impl From<String> for ProcessStatus {
    fn from(label: String) -> Self {
        let lowercase = label.to_lowercase();

        if lowercase.contains("auto") {
            ProcessStatus::Automated(label)
        } else if lowercase.contains("pilot") {
            ProcessStatus::Pilot(label)
        } else if lowercase.contains("plan") {
            ProcessStatus::Planned(label)
        } else {
            ProcessStatus::Other(label)
        }
    }
}

/// The fixed buckets that process savings are grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ProcessCategory {
    Admissions,
    Advising,
    Facilities,
    Library,
    #[serde(alias = "Human Resources")]
    HR,
    #[serde(alias = "Financial Aid")]
    FinancialAid,
}

impl ProcessCategory {
    /// All buckets in display order.
    pub const ALL: [ProcessCategory; 6] = [
        ProcessCategory::Admissions,
        ProcessCategory::Advising,
        ProcessCategory::Facilities,
        ProcessCategory::Library,
        ProcessCategory::HR,
        ProcessCategory::FinancialAid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProcessCategory::Admissions => "Admissions",
            ProcessCategory::Advising => "Advising",
            ProcessCategory::Facilities => "Facilities",
            ProcessCategory::Library => "Library",
            ProcessCategory::HR => "HR",
            ProcessCategory::FinancialAid => "Financial Aid",
        }
    }

    /// The keyword a legacy process name must contain to fall in this bucket.
    fn keyword(self) -> &'static str {
        self.label()
    }

    /// Infer the bucket from keywords in a process name, for datasets that
    /// predate the `category` field.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| name.contains(category.keyword()))
    }
}

/// One operational process and the savings automation brought it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub name: String,
    pub status: ProcessStatus,
    pub hours_saved: f64,
    pub cost_saved: f64,
    #[serde(default, deserialize_with = "known_category")]
    pub category: Option<ProcessCategory>,
}

/// Unrecognised categories are dropped so the record falls back to its name.
fn known_category<'de, D>(deserializer: D) -> Result<Option<ProcessCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.and_then(|value| ProcessCategory::deserialize(value).ok()))
}

impl ProcessRecord {
    /// The savings bucket, preferring the declared category over the name.
    pub fn bucket(&self) -> Option<ProcessCategory> {
        self.category
            .or_else(|| ProcessCategory::from_name(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Processes(pub Vec<ProcessRecord>);

impl Section for Processes {
    const KEY: &'static str = "processes";

    fn validate(&self) -> Result<(), String> {
        match self
            .0
            .iter()
            .find(|p| p.hours_saved < 0.0 || p.cost_saved < 0.0)
        {
            Some(process) => Err(format!("{} has negative savings", process.name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Improved,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceImprovement {
    pub metric: String,
    pub value: DisplayValue,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ServiceImprovements(pub Vec<ServiceImprovement>);

impl Section for ServiceImprovements {
    const KEY: &'static str = "serviceImprovements";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Governance {
    pub policies: u32,
    pub policies_target: u32,
    pub audits_completed: u32,
    pub audits_planned: u32,
}

impl Section for Governance {
    const KEY: &'static str = "governance";

    fn validate(&self) -> Result<(), String> {
        if self.policies_target == 0 && self.audits_planned == 0 {
            return Err("there are no governance milestones to complete".to_owned());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EthicsReviews {
    pub approved: u32,
    pub pending: u32,
    pub revisions: u32,
}

impl EthicsReviews {
    /// Review outcomes paired with their display labels.
    pub fn outcomes(&self) -> [(&'static str, u32); 3] {
        [
            ("Approved", self.approved),
            ("Pending", self.pending),
            ("Revisions", self.revisions),
        ]
    }
}

impl Section for EthicsReviews {
    const KEY: &'static str = "ethicsReviews";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SecurityIncidents {
    pub labels: Vec<String>,
    pub incidents: Vec<f64>,
}

impl Section for SecurityIncidents {
    const KEY: &'static str = "securityIncidents";

    fn validate(&self) -> Result<(), String> {
        check_aligned("incidents", &self.incidents, self.labels.len())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiskIndicator {
    pub area: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RiskIndicators(pub Vec<RiskIndicator>);

impl Section for RiskIndicators {
    const KEY: &'static str = "riskIndicators";

    fn validate(&self) -> Result<(), String> {
        match self
            .0
            .iter()
            .find(|r| !(0.0..=100.0).contains(&r.score))
        {
            Some(risk) => Err(format!(
                "the {} score {} is outside 0-100",
                risk.area, risk.score
            )),
            None => Ok(()),
        }
    }
}

/// One row of the strategic alignment scorecard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlignmentRow {
    pub goal: String,
    pub metric: String,
    pub value: DisplayValue,
    pub status: String,
    #[serde(default)]
    pub trend: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StrategicAlignment(pub Vec<AlignmentRow>);

impl Section for StrategicAlignment {
    const KEY: &'static str = "strategicAlignment";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub axes: Vec<String>,
    #[serde(alias = "clemson")]
    pub institution: Vec<f64>,
    pub peers: Vec<f64>,
    #[serde(default)]
    pub institution_name: Option<String>,
}

impl Section for Benchmark {
    const KEY: &'static str = "benchmark";

    fn validate(&self) -> Result<(), String> {
        check_aligned("institution", &self.institution, self.axes.len())?;
        check_aligned("peers", &self.peers, self.axes.len())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiTrend {
    pub labels: Vec<String>,
    pub roi_pct: Vec<f64>,
    /// Cumulative modeled value in millions of dollars.
    pub value_created: Vec<f64>,
}

impl RoiTrend {
    /// The most recent ROI percentage and value created.
    pub fn latest(&self) -> Option<(f64, f64)> {
        Some((*self.roi_pct.last()?, *self.value_created.last()?))
    }
}

impl Section for RoiTrend {
    const KEY: &'static str = "roiTrend";

    fn validate(&self) -> Result<(), String> {
        if self.labels.is_empty() {
            return Err("the ROI trend has no data points".to_owned());
        }

        check_aligned("roiPct", &self.roi_pct, self.labels.len())?;
        check_aligned("valueCreated", &self.value_created, self.labels.len())
    }
}

#[cfg(test)]
pub(crate) mod test_data {
    use super::Dataset;

    /// The sample dataset shipped with the repository.
    pub(crate) const SAMPLE_JSON: &str = include_str!("../../data/ai_dashboard_data.json");

    pub(crate) fn sample_dataset() -> Dataset {
        Dataset::from_json(SAMPLE_JSON.as_bytes()).expect("sample dataset should parse")
    }

    /// The sample dataset with `key` removed.
    pub(crate) fn sample_dataset_without(key: &str) -> Dataset {
        dataset_with(key, None)
    }

    /// The sample dataset with `key` replaced by `value`, or removed if `value` is `None`.
    pub(crate) fn dataset_with(key: &str, value: Option<serde_json::Value>) -> Dataset {
        let mut document: serde_json::Value =
            serde_json::from_str(SAMPLE_JSON).expect("sample dataset should parse");
        let object = document
            .as_object_mut()
            .expect("sample dataset should be an object");

        match value {
            Some(value) => {
                object.insert(key.to_owned(), value);
            }
            None => {
                object.remove(key);
            }
        }

        Dataset::from_json(document.to_string().as_bytes()).expect("dataset should parse")
    }
}
