use super::domain::VisaCategory;
use super::factors::{FactorId, ScoreFactor};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
}

impl RecommendationPriority {
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationHorizon {
    Immediate,
    ShortTerm,
    LongTerm,
}

/// An actionable suggestion attached to an assessment. `estimated_impact`
/// is informational only and never feeds back into the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: &'static str,
    pub title: &'static str,
    pub description: String,
    pub priority: RecommendationPriority,
    pub category: RecommendationHorizon,
    pub estimated_impact: u8,
    pub actions: Vec<&'static str>,
}

const TEMPLATE_TRIGGER: u8 = 60;
const SPECIALIST_TRIGGER: u8 = 70;
const MAX_RECOMMENDATIONS: usize = 6;

pub(crate) fn generate(
    factors: &[ScoreFactor],
    overall_score: u8,
    category: VisaCategory,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for factor in factors {
        if factor.score < TEMPLATE_TRIGGER {
            if let Some(recommendation) = template_for(factor.id) {
                recommendations.push(recommendation);
            }
        }
    }

    recommendations.push(prepare_documents(category));
    if overall_score < SPECIALIST_TRIGGER {
        recommendations.push(consult_specialist());
    }

    recommendations.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then(b.estimated_impact.cmp(&a.estimated_impact))
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Targeted templates exist only for the three base factors. A low
/// visa-fit factor deliberately emits nothing here; the generic document
/// and specialist suggestions are expected to carry those cases.
fn template_for(id: FactorId) -> Option<Recommendation> {
    match id {
        FactorId::ProfileCompleteness => Some(Recommendation {
            id: "complete_profile",
            title: "Complete Your Profile",
            description: "Key applicant details are missing and weaken every downstream check."
                .to_string(),
            priority: RecommendationPriority::High,
            category: RecommendationHorizon::Immediate,
            estimated_impact: 15,
            actions: vec![
                "Add your full legal name and a reachable email address",
                "Finish the eligibility quiz",
                "Pick the visa category you intend to pursue",
            ],
        }),
        FactorId::Preparation => Some(Recommendation {
            id: "practice_interviews",
            title: "Increase Interview Training",
            description: "Applicants who rehearse consular questions perform measurably better."
                .to_string(),
            priority: RecommendationPriority::High,
            category: RecommendationHorizon::ShortTerm,
            estimated_impact: 20,
            actions: vec![
                "Run at least three mock interviews",
                "Review feedback after every session",
                "Rehearse answers about purpose, funding, and ties home",
            ],
        }),
        FactorId::DataConsistency => Some(Recommendation {
            id: "review_answers",
            title: "Resolve Conflicting Answers",
            description: "Some quiz answers contradict each other and would raise questions."
                .to_string(),
            priority: RecommendationPriority::Medium,
            category: RecommendationHorizon::Immediate,
            estimated_impact: 10,
            actions: vec![
                "Retake the quiz with your current plans in mind",
                "Make sure purpose, duration, and background agree",
            ],
        }),
        FactorId::VisitorProfile
        | FactorId::StudentProfile
        | FactorId::ProfessionalProfile
        | FactorId::InvestorProfile
        | FactorId::ExtraordinaryProfile => None,
    }
}

fn prepare_documents(category: VisaCategory) -> Recommendation {
    Recommendation {
        id: "prepare_documents",
        title: "Prepare Your Documentation",
        description: format!(
            "Assemble the evidence checklist for the {} category before filing.",
            category.label()
        ),
        priority: RecommendationPriority::High,
        category: RecommendationHorizon::Immediate,
        estimated_impact: 10,
        actions: vec![
            "Gather identity, financial, and sponsorship documents",
            "Check every document against the category checklist",
            "Order certified translations where needed",
        ],
    }
}

fn consult_specialist() -> Recommendation {
    Recommendation {
        id: "consult_specialist",
        title: "Consult an Immigration Specialist",
        description: "A professional review is advisable before committing to this application."
            .to_string(),
        priority: RecommendationPriority::Medium,
        category: RecommendationHorizon::ShortTerm,
        estimated_impact: 12,
        actions: vec![
            "Book a consultation with a licensed practitioner",
            "Bring this assessment and your document checklist",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::UserProfile;
    use crate::scoring::factors::{self, FactorWeights};

    fn factors_for(profile: &UserProfile) -> Vec<ScoreFactor> {
        factors::build(
            profile,
            profile.active_category(),
            &FactorWeights::standard(),
        )
    }

    #[test]
    fn strong_profile_gets_only_the_document_reminder() {
        let profile = UserProfile {
            name: Some("X".to_string()),
            email: Some("x@x.com".to_string()),
            completed_quiz: true,
            interviews_practiced: 5,
            ..UserProfile::default()
        };
        let generated = generate(&factors_for(&profile), 90, profile.active_category());
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].id, "prepare_documents");
    }

    #[test]
    fn empty_profile_generates_exactly_four_sorted_suggestions() {
        let profile = UserProfile::default();
        let generated = generate(&factors_for(&profile), 35, profile.active_category());

        let ids: Vec<&str> = generated.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                "practice_interviews",
                "complete_profile",
                "prepare_documents",
                "consult_specialist",
            ]
        );
    }

    #[test]
    fn document_reminder_names_the_active_category() {
        let generated = generate(&[], 90, VisaCategory::InvestorEb5);
        assert!(generated[0].description.contains("Investor (EB5)"));
    }

    #[test]
    fn list_is_bounded_and_priority_sorted() {
        let profile = UserProfile::default();
        let generated = generate(&factors_for(&profile), 10, profile.active_category());
        assert!(generated.len() <= 6);
        for pair in generated.windows(2) {
            assert!(pair[0].priority.rank() >= pair[1].priority.rank());
        }
    }
}
