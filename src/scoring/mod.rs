mod domain;
mod factors;
mod historical;
mod insights;
mod recommendations;
mod risks;

pub use domain::{
    EducationLevel, InvestmentCapacity, QuizAnswers, StayDuration, TripPurpose, UserProfile,
    VisaCategory, WorkExperience,
};
pub use factors::{FactorCategory, FactorId, FactorImpact, FactorWeights, ScoreFactor};
pub use historical::{
    CategoryBaseline, FixedSampler, HistoricalComparison, SimilarProfilesSampler, ThreadRngSampler,
};
pub use recommendations::{Recommendation, RecommendationHorizon, RecommendationPriority};
pub use risks::{RiskFactor, RiskSeverity};

use serde::Serialize;
use std::fmt;

/// Qualitative band for an overall score. Thresholds partition the whole
/// 0-100 range; checks run in descending order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Moderate,
    Low,
    Critical,
}

impl ScoreBand {
    pub const fn classify(score: u8) -> Self {
        if score >= 85 {
            Self::Excellent
        } else if score >= 70 {
            Self::Good
        } else if score >= 55 {
            Self::Moderate
        } else if score >= 40 {
            Self::Low
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::Critical => "Critical",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "green",
            Self::Good => "blue",
            Self::Moderate => "yellow",
            Self::Low => "orange",
            Self::Critical => "red",
        }
    }
}

/// Full assessment for one applicant profile, computed on demand and
/// never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictiveScore {
    pub overall_score: u8,
    pub category: ScoreBand,
    pub color: &'static str,
    pub factors: Vec<ScoreFactor>,
    pub recommendations: Vec<Recommendation>,
    pub risk_factors: Vec<RiskFactor>,
    pub historical_comparison: HistoricalComparison,
}

#[derive(Debug)]
pub enum ScoringError {
    /// The aggregator received no factors. Unreachable while the base
    /// factors are unconditional, but guarded rather than dividing by
    /// zero.
    EmptyFactors,
    ZeroWeightSum,
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::EmptyFactors => {
                write!(f, "invalid state: no factors available to aggregate")
            }
            ScoringError::ZeroWeightSum => {
                write!(f, "invalid state: factor weights sum to zero")
            }
        }
    }
}

impl std::error::Error for ScoringError {}

/// Stateless engine applying the weighted rubric to applicant profiles.
/// Cheap to build; safe to share across request handlers.
pub struct ScoringEngine {
    weights: FactorWeights,
    sampler: Box<dyn SimilarProfilesSampler>,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            weights: FactorWeights::standard(),
            sampler: Box::new(ThreadRngSampler),
        }
    }

    pub fn with_weights(mut self, weights: FactorWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_sampler(mut self, sampler: Box<dyn SimilarProfilesSampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Computes the full assessment for a profile. Missing optional data
    /// is handled through documented defaults; an unknown visa category
    /// falls back to the visitor category throughout.
    pub fn compute(&self, profile: &UserProfile) -> Result<PredictiveScore, ScoringError> {
        let category = profile.active_category();
        let factors = factors::build(profile, category, &self.weights);
        let overall_score = aggregate(&factors)?;
        let band = ScoreBand::classify(overall_score);

        let recommendations = recommendations::generate(&factors, overall_score, category);
        let risk_factors = risks::identify(&factors, category);
        let historical_comparison =
            historical::compare(overall_score, category, self.sampler.as_ref());

        Ok(PredictiveScore {
            overall_score,
            category: band,
            color: band.color(),
            factors,
            recommendations,
            risk_factors,
            historical_comparison,
        })
    }

    /// Short natural-language takeaways derived from a full assessment.
    pub fn insights(&self, profile: &UserProfile) -> Result<Vec<String>, ScoringError> {
        Ok(insights::summarize(&self.compute(profile)?))
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry point using the standard weights and RNG-backed
/// sampler.
pub fn compute_score(profile: &UserProfile) -> Result<PredictiveScore, ScoringError> {
    ScoringEngine::new().compute(profile)
}

/// Convenience counterpart of [`compute_score`] for the insight strings.
pub fn quick_insights(profile: &UserProfile) -> Result<Vec<String>, ScoringError> {
    ScoringEngine::new().insights(profile)
}

/// Weighted mean over the factors actually present. Weights are not
/// assumed to sum to 1, so the sum of weights is the divisor.
fn aggregate(factors: &[ScoreFactor]) -> Result<u8, ScoringError> {
    if factors.is_empty() {
        return Err(ScoringError::EmptyFactors);
    }

    let weight_sum: f32 = factors.iter().map(|factor| factor.weight).sum();
    if weight_sum <= 0.0 {
        return Err(ScoringError::ZeroWeightSum);
    }

    let weighted: f32 = factors
        .iter()
        .map(|factor| f32::from(factor.score.min(100)) * factor.weight)
        .sum();

    Ok((weighted / weight_sum).round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(score: u8, weight: f32) -> ScoreFactor {
        ScoreFactor {
            id: FactorId::Preparation,
            name: "Preparation Level",
            description: "test factor",
            score,
            weight,
            impact: FactorImpact::Neutral,
            category: FactorCategory::Preparation,
        }
    }

    #[test]
    fn aggregate_divides_by_the_weight_sum() {
        // (80*0.2 + 40*0.6) / 0.8 = 50.
        let factors = vec![factor(80, 0.2), factor(40, 0.6)];
        assert_eq!(aggregate(&factors).expect("aggregates"), 50);
    }

    #[test]
    fn aggregate_rejects_an_empty_factor_list() {
        assert!(matches!(aggregate(&[]), Err(ScoringError::EmptyFactors)));
    }

    #[test]
    fn aggregate_clamps_out_of_range_scores() {
        // Scores above 100 cannot be constructed from u8 inputs beyond
        // 100 itself, but the guard still bounds the result.
        let factors = vec![factor(100, 0.5)];
        assert_eq!(aggregate(&factors).expect("aggregates"), 100);
    }

    #[test]
    fn classify_has_no_gaps_or_overlaps_at_boundaries() {
        assert_eq!(ScoreBand::classify(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::classify(85), ScoreBand::Excellent);
        assert_eq!(ScoreBand::classify(84), ScoreBand::Good);
        assert_eq!(ScoreBand::classify(70), ScoreBand::Good);
        assert_eq!(ScoreBand::classify(69), ScoreBand::Moderate);
        assert_eq!(ScoreBand::classify(55), ScoreBand::Moderate);
        assert_eq!(ScoreBand::classify(54), ScoreBand::Low);
        assert_eq!(ScoreBand::classify(40), ScoreBand::Low);
        assert_eq!(ScoreBand::classify(39), ScoreBand::Critical);
        assert_eq!(ScoreBand::classify(0), ScoreBand::Critical);
    }

    #[test]
    fn every_band_maps_to_one_color() {
        assert_eq!(ScoreBand::Excellent.color(), "green");
        assert_eq!(ScoreBand::Good.color(), "blue");
        assert_eq!(ScoreBand::Moderate.color(), "yellow");
        assert_eq!(ScoreBand::Low.color(), "orange");
        assert_eq!(ScoreBand::Critical.color(), "red");
    }
}
