use serde::{Deserialize, Deserializer, Serialize};

/// Visa classes the scoring rules specialize around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisaCategory {
    #[serde(rename = "B1/B2")]
    VisitorB1B2,
    #[serde(rename = "F1")]
    StudentF1,
    #[serde(rename = "H1B")]
    WorkerH1B,
    #[serde(rename = "EB5")]
    InvestorEb5,
    #[serde(rename = "O1")]
    ExtraordinaryO1,
}

impl VisaCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::VisitorB1B2,
            Self::StudentF1,
            Self::WorkerH1B,
            Self::InvestorEb5,
            Self::ExtraordinaryO1,
        ]
    }

    /// Category used whenever a profile names no recognizable visa.
    pub const fn fallback() -> Self {
        Self::VisitorB1B2
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::VisitorB1B2 => "B1/B2",
            Self::StudentF1 => "F1",
            Self::WorkerH1B => "H1B",
            Self::InvestorEb5 => "EB5",
            Self::ExtraordinaryO1 => "O1",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VisitorB1B2 => "Visitor (B1/B2)",
            Self::StudentF1 => "Student (F1)",
            Self::WorkerH1B => "Specialty Worker (H1B)",
            Self::InvestorEb5 => "Investor (EB5)",
            Self::ExtraordinaryO1 => "Extraordinary Ability (O1)",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim() {
            "B1/B2" => Some(Self::VisitorB1B2),
            "F1" => Some(Self::StudentF1),
            "H1B" => Some(Self::WorkerH1B),
            "EB5" => Some(Self::InvestorEb5),
            "O1" => Some(Self::ExtraordinaryO1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripPurpose {
    Tourism,
    Business,
    Study,
    Work,
    Invest,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StayDuration {
    Short,
    Medium,
    Long,
    Permanent,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    None,
    HighSchool,
    Bachelor,
    Master,
    Phd,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkExperience {
    None,
    Junior,
    Mid,
    Senior,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentCapacity {
    None,
    Small,
    Medium,
    Large,
    #[serde(other)]
    Other,
}

/// Answer codes captured by the eligibility quiz. Every field is optional;
/// unrecognized wire values collapse into the `Other` variants and simply
/// earn no bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    #[serde(default)]
    pub purpose: Option<TripPurpose>,
    #[serde(default)]
    pub duration: Option<StayDuration>,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub experience: Option<WorkExperience>,
    #[serde(default)]
    pub investment: Option<InvestmentCapacity>,
}

/// Applicant facts owned by the surrounding application; the engine only
/// reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub completed_quiz: bool,
    #[serde(default)]
    pub interviews_practiced: u32,
    #[serde(default, deserialize_with = "lenient_visa")]
    pub recommended_visa: Option<VisaCategory>,
    #[serde(default, deserialize_with = "lenient_visa")]
    pub selected_visa: Option<VisaCategory>,
    #[serde(default)]
    pub quiz_answers: Option<QuizAnswers>,
}

impl UserProfile {
    /// Category the assessment runs against: selection wins over
    /// recommendation, and an unset or unknown visa falls back silently.
    pub fn active_category(&self) -> VisaCategory {
        self.selected_visa
            .or(self.recommended_visa)
            .unwrap_or_else(VisaCategory::fallback)
    }

    pub(crate) fn has_name(&self) -> bool {
        has_text(&self.name)
    }

    pub(crate) fn has_email(&self) -> bool {
        has_text(&self.email)
    }

    pub(crate) fn has_visa_choice(&self) -> bool {
        self.selected_visa.is_some() || self.recommended_visa.is_some()
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.trim().is_empty())
}

/// Accepts any string for a visa field; unknown codes read as "not set"
/// rather than failing the whole payload.
fn lenient_visa<'de, D>(deserializer: D) -> Result<Option<VisaCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(VisaCategory::from_code))
}
