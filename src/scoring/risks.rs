use super::domain::VisaCategory;
use super::factors::{FactorImpact, ScoreFactor};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    High,
    Medium,
    Low,
}

impl RiskSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// A warning surfaced alongside the assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    pub id: String,
    pub title: &'static str,
    pub description: &'static str,
    pub severity: RiskSeverity,
    /// Percent likelihood, 0-100.
    pub likelihood: u8,
    pub mitigations: Vec<&'static str>,
}

const RISK_TRIGGER: u8 = 40;
const GENERIC_LIKELIHOOD: u8 = 80;
const MAX_RISKS: usize = 4;

/// Generic low-factor risks come first, then the static category risks,
/// in insertion order; the combined list is cut at four entries.
pub(crate) fn identify(factors: &[ScoreFactor], category: VisaCategory) -> Vec<RiskFactor> {
    let mut risks = Vec::new();

    for factor in factors {
        if factor.score < RISK_TRIGGER && factor.impact == FactorImpact::Negative {
            risks.push(RiskFactor {
                id: format!("low_{}", factor.id.key()),
                title: factor.name,
                description: factor.description,
                severity: RiskSeverity::High,
                likelihood: GENERIC_LIKELIHOOD,
                mitigations: vec![
                    "Work through the matching recommendation before filing",
                    "Re-run the assessment after improving this area",
                ],
            });
        }
    }

    risks.extend(category_risks(category));
    risks.truncate(MAX_RISKS);
    risks
}

fn category_risks(category: VisaCategory) -> Vec<RiskFactor> {
    match category {
        VisaCategory::VisitorB1B2 => vec![RiskFactor {
            id: "overstay_scrutiny".to_string(),
            title: "Overstay Scrutiny",
            description: "Visitor applications draw extra attention to ties with the home country",
            severity: RiskSeverity::Medium,
            likelihood: 30,
            mitigations: vec![
                "Document employment, property, or family ties at home",
                "Book a return itinerary consistent with a short stay",
            ],
        }],
        VisaCategory::WorkerH1B => vec![RiskFactor {
            id: "lottery_selection".to_string(),
            title: "Lottery Selection",
            description: "Registration volume routinely exceeds the annual H1B cap",
            severity: RiskSeverity::High,
            likelihood: 70,
            mitigations: vec![
                "Have your employer register in every eligible window",
                "Keep a cap-exempt or alternative category as a fallback",
            ],
        }],
        VisaCategory::StudentF1 | VisaCategory::InvestorEb5 | VisaCategory::ExtraordinaryO1 => {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::UserProfile;
    use crate::scoring::factors::{self, FactorWeights};

    fn factors_for(profile: &UserProfile, category: VisaCategory) -> Vec<ScoreFactor> {
        factors::build(profile, category, &FactorWeights::standard())
    }

    #[test]
    fn empty_profile_surfaces_low_factor_and_overstay_risks() {
        let profile = UserProfile::default();
        let risks = identify(
            &factors_for(&profile, VisaCategory::VisitorB1B2),
            VisaCategory::VisitorB1B2,
        );

        let ids: Vec<&str> = risks.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "low_profile_completeness",
                "low_preparation",
                "overstay_scrutiny",
            ]
        );
        assert_eq!(risks[0].likelihood, 80);
        assert_eq!(risks[0].severity, RiskSeverity::High);
    }

    #[test]
    fn low_visa_fit_never_becomes_a_generic_risk() {
        // Visa-fit factors stay tagged positive, so even a baseline 50
        // (or lower) fit must not produce a generic risk entry.
        let profile = UserProfile {
            name: Some("X".to_string()),
            email: Some("x@x.com".to_string()),
            completed_quiz: true,
            interviews_practiced: 5,
            ..UserProfile::default()
        };
        let risks = identify(
            &factors_for(&profile, VisaCategory::InvestorEb5),
            VisaCategory::InvestorEb5,
        );
        assert!(risks.iter().all(|r| !r.id.starts_with("low_investor")));
    }

    #[test]
    fn h1b_always_carries_the_lottery_risk() {
        let profile = UserProfile {
            completed_quiz: true,
            interviews_practiced: 5,
            name: Some("X".to_string()),
            email: Some("x@x.com".to_string()),
            selected_visa: Some(VisaCategory::WorkerH1B),
            ..UserProfile::default()
        };
        let risks = identify(
            &factors_for(&profile, VisaCategory::WorkerH1B),
            VisaCategory::WorkerH1B,
        );
        assert!(risks.iter().any(|r| r.id == "lottery_selection"));
    }

    #[test]
    fn risk_list_is_bounded() {
        let profile = UserProfile::default();
        let risks = identify(
            &factors_for(&profile, VisaCategory::WorkerH1B),
            VisaCategory::WorkerH1B,
        );
        assert!(risks.len() <= 4);
    }
}
