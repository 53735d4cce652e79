use super::domain::{
    EducationLevel, InvestmentCapacity, QuizAnswers, StayDuration, TripPurpose, UserProfile,
    VisaCategory, WorkExperience,
};
use serde::Serialize;

/// Stable identifiers for every scored dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorId {
    ProfileCompleteness,
    Preparation,
    DataConsistency,
    VisitorProfile,
    StudentProfile,
    ProfessionalProfile,
    InvestorProfile,
    ExtraordinaryProfile,
}

impl FactorId {
    pub const fn key(self) -> &'static str {
        match self {
            Self::ProfileCompleteness => "profile_completeness",
            Self::Preparation => "preparation",
            Self::DataConsistency => "data_consistency",
            Self::VisitorProfile => "visitor_profile",
            Self::StudentProfile => "student_profile",
            Self::ProfessionalProfile => "professional_profile",
            Self::InvestorProfile => "investor_profile",
            Self::ExtraordinaryProfile => "extraordinary_profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Profile,
    Documentation,
    Preparation,
    External,
}

/// One scored dimension of an assessment, rebuilt on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreFactor {
    pub id: FactorId,
    pub name: &'static str,
    pub description: &'static str,
    pub score: u8,
    pub weight: f32,
    pub impact: FactorImpact,
    pub category: FactorCategory,
}

/// Aggregation weights per factor. They are not required to sum to 1;
/// the aggregator divides by the sum of weights actually present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorWeights {
    pub profile_completeness: f32,
    pub preparation: f32,
    pub data_consistency: f32,
    pub visitor_profile: f32,
    pub student_profile: f32,
    pub professional_profile: f32,
    pub investor_profile: f32,
    pub extraordinary_profile: f32,
}

impl FactorWeights {
    pub const fn standard() -> Self {
        Self {
            profile_completeness: 0.15,
            preparation: 0.25,
            data_consistency: 0.20,
            visitor_profile: 0.30,
            student_profile: 0.35,
            professional_profile: 0.40,
            investor_profile: 0.45,
            extraordinary_profile: 0.45,
        }
    }

    fn visa_weight(&self, category: VisaCategory) -> f32 {
        match category {
            VisaCategory::VisitorB1B2 => self.visitor_profile,
            VisaCategory::StudentF1 => self.student_profile,
            VisaCategory::WorkerH1B => self.professional_profile,
            VisaCategory::InvestorEb5 => self.investor_profile,
            VisaCategory::ExtraordinaryO1 => self.extraordinary_profile,
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self::standard()
    }
}

const NO_ANSWERS_CONSISTENCY: u8 = 70;
const VISA_BASELINE: u16 = 50;

pub(crate) fn build(
    profile: &UserProfile,
    category: VisaCategory,
    weights: &FactorWeights,
) -> Vec<ScoreFactor> {
    vec![
        profile_completeness(profile, weights),
        preparation(profile, weights),
        data_consistency(profile.quiz_answers.as_ref(), weights),
        visa_profile(category, profile.quiz_answers.as_ref(), weights),
    ]
}

fn profile_completeness(profile: &UserProfile, weights: &FactorWeights) -> ScoreFactor {
    let mut earned: u16 = 0;
    let max_possible: u16 = 100;

    // Contact details: 20 points.
    if profile.has_name() {
        earned += 10;
    }
    if profile.has_email() {
        earned += 10;
    }

    // Quiz completion: 30 points.
    if profile.completed_quiz {
        earned += 30;
    }

    // A chosen or recommended visa: 20 points.
    if profile.has_visa_choice() {
        earned += 20;
    }

    // Interview practice: 30 points.
    if profile.interviews_practiced > 0 {
        earned += 20;
    }
    if profile.interviews_practiced >= 3 {
        earned += 10;
    }

    let score = ((earned as f32 / max_possible as f32) * 100.0).round() as u8;

    ScoreFactor {
        id: FactorId::ProfileCompleteness,
        name: "Profile Completeness",
        description: "How much of the applicant record has been filled in",
        score,
        weight: weights.profile_completeness,
        impact: threshold_impact(score, 70),
        category: FactorCategory::Profile,
    }
}

fn preparation(profile: &UserProfile, weights: &FactorWeights) -> ScoreFactor {
    let mut total: u16 = 0;

    if profile.completed_quiz {
        total += 40;
    }
    if profile.interviews_practiced > 0 {
        total += 20;
    }
    if profile.interviews_practiced >= 3 {
        total += 20;
    }
    if profile.interviews_practiced >= 5 {
        total += 20;
    }

    let score = total.min(100) as u8;

    ScoreFactor {
        id: FactorId::Preparation,
        name: "Preparation Level",
        description: "Quiz completion and mock interview practice volume",
        score,
        weight: weights.preparation,
        impact: threshold_impact(score, 60),
        category: FactorCategory::Preparation,
    }
}

fn data_consistency(answers: Option<&QuizAnswers>, weights: &FactorWeights) -> ScoreFactor {
    let score = match answers {
        None => NO_ANSWERS_CONSISTENCY,
        Some(answers) => {
            let mut penalty: i16 = 0;

            // Stated purpose contradicting other answers costs points.
            if answers.purpose == Some(TripPurpose::Study)
                && answers.education == Some(EducationLevel::Phd)
            {
                penalty += 10;
            }
            if answers.purpose == Some(TripPurpose::Work)
                && answers.experience == Some(WorkExperience::None)
            {
                penalty += 15;
            }
            if answers.purpose == Some(TripPurpose::Invest)
                && answers.investment == Some(InvestmentCapacity::None)
            {
                penalty += 20;
            }
            if answers.duration == Some(StayDuration::Permanent)
                && answers.purpose == Some(TripPurpose::Tourism)
            {
                penalty += 15;
            }

            (100_i16 - penalty).max(0) as u8
        }
    };

    ScoreFactor {
        id: FactorId::DataConsistency,
        name: "Data Consistency",
        description: "Agreement between the quiz answers on record",
        score,
        weight: weights.data_consistency,
        impact: threshold_impact(score, 80),
        category: FactorCategory::Documentation,
    }
}

fn visa_profile(
    category: VisaCategory,
    answers: Option<&QuizAnswers>,
    weights: &FactorWeights,
) -> ScoreFactor {
    let score = match answers {
        None => VISA_BASELINE as u8,
        Some(answers) => match category {
            VisaCategory::VisitorB1B2 => visitor_fit(answers),
            VisaCategory::StudentF1 => student_fit(answers),
            VisaCategory::WorkerH1B => professional_fit(answers),
            VisaCategory::InvestorEb5 => investor_fit(answers),
            VisaCategory::ExtraordinaryO1 => extraordinary_fit(answers),
        },
    };

    let (id, name, description) = visa_factor_meta(category);

    ScoreFactor {
        id,
        name,
        description,
        score,
        weight: weights.visa_weight(category),
        // Visa-fit factors are always tagged positive, unlike the other
        // factors whose impact follows a score threshold. Asymmetric, but
        // it mirrors the established product behavior.
        impact: FactorImpact::Positive,
        category: FactorCategory::External,
    }
}

const fn visa_factor_meta(category: VisaCategory) -> (FactorId, &'static str, &'static str) {
    match category {
        VisaCategory::VisitorB1B2 => (
            FactorId::VisitorProfile,
            "Visitor Profile Fit",
            "Alignment with a short-stay tourism or business visit",
        ),
        VisaCategory::StudentF1 => (
            FactorId::StudentProfile,
            "Student Profile Fit",
            "Alignment with an academic program of study",
        ),
        VisaCategory::WorkerH1B => (
            FactorId::ProfessionalProfile,
            "Professional Profile Fit",
            "Alignment with specialty-occupation employment",
        ),
        VisaCategory::InvestorEb5 => (
            FactorId::InvestorProfile,
            "Investor Profile Fit",
            "Alignment with an immigrant investment petition",
        ),
        VisaCategory::ExtraordinaryO1 => (
            FactorId::ExtraordinaryProfile,
            "Extraordinary Ability Fit",
            "Alignment with an extraordinary-ability petition",
        ),
    }
}

fn visitor_fit(answers: &QuizAnswers) -> u8 {
    let mut score = VISA_BASELINE;
    match answers.purpose {
        Some(TripPurpose::Tourism) => score += 30,
        Some(TripPurpose::Business) => score += 25,
        _ => {}
    }
    if answers.duration == Some(StayDuration::Short) {
        score += 20;
    }
    score.min(100) as u8
}

fn student_fit(answers: &QuizAnswers) -> u8 {
    let mut score = VISA_BASELINE;
    if answers.purpose == Some(TripPurpose::Study) {
        score += 30;
    }
    if matches!(
        answers.duration,
        Some(StayDuration::Medium) | Some(StayDuration::Long)
    ) {
        score += 15;
    }
    if matches!(
        answers.education,
        Some(EducationLevel::HighSchool) | Some(EducationLevel::Bachelor)
    ) {
        score += 15;
    }
    score.min(100) as u8
}

fn professional_fit(answers: &QuizAnswers) -> u8 {
    let mut score = VISA_BASELINE;
    if answers.purpose == Some(TripPurpose::Work) {
        score += 25;
    }
    if matches!(
        answers.duration,
        Some(StayDuration::Long) | Some(StayDuration::Permanent)
    ) {
        score += 15;
    }
    if matches!(
        answers.education,
        Some(EducationLevel::Bachelor) | Some(EducationLevel::Master) | Some(EducationLevel::Phd)
    ) {
        score += 20;
    }
    if matches!(
        answers.experience,
        Some(WorkExperience::Mid) | Some(WorkExperience::Senior)
    ) {
        score += 20;
    }
    score.min(100) as u8
}

fn investor_fit(answers: &QuizAnswers) -> u8 {
    let mut score = VISA_BASELINE;
    if answers.purpose == Some(TripPurpose::Invest) {
        score += 30;
    }
    if answers.duration == Some(StayDuration::Permanent) {
        score += 15;
    }
    match answers.investment {
        Some(InvestmentCapacity::Large) => score += 25,
        Some(InvestmentCapacity::Medium) => score += 15,
        _ => {}
    }
    score.min(100) as u8
}

fn extraordinary_fit(answers: &QuizAnswers) -> u8 {
    let mut score = VISA_BASELINE;
    if answers.purpose == Some(TripPurpose::Work) {
        score += 20;
    }
    match answers.education {
        Some(EducationLevel::Phd) => score += 25,
        Some(EducationLevel::Master) => score += 15,
        _ => {}
    }
    if answers.experience == Some(WorkExperience::Senior) {
        score += 25;
    }
    score.min(100) as u8
}

const fn threshold_impact(score: u8, positive_above: u8) -> FactorImpact {
    if score > positive_above {
        FactorImpact::Positive
    } else {
        FactorImpact::Negative
    }
}
