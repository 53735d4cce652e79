use super::domain::VisaCategory;
use rand::Rng;
use serde::Serialize;

/// Static reference point per visa category, used only for comparative
/// display alongside a computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryBaseline {
    pub average_score: u8,
    /// Historical approval percentage.
    pub success_rate: u8,
    pub average_time_to_approval: &'static str,
}

impl CategoryBaseline {
    pub const fn for_category(category: VisaCategory) -> Self {
        match category {
            VisaCategory::VisitorB1B2 => Self {
                average_score: 72,
                success_rate: 85,
                average_time_to_approval: "2-4 weeks",
            },
            VisaCategory::StudentF1 => Self {
                average_score: 75,
                success_rate: 78,
                average_time_to_approval: "4-8 weeks",
            },
            VisaCategory::WorkerH1B => Self {
                average_score: 78,
                success_rate: 35,
                average_time_to_approval: "6-12 months",
            },
            VisaCategory::InvestorEb5 => Self {
                average_score: 80,
                success_rate: 82,
                average_time_to_approval: "18-30 months",
            },
            VisaCategory::ExtraordinaryO1 => Self {
                average_score: 82,
                success_rate: 75,
                average_time_to_approval: "2-4 months",
            },
        }
    }
}

/// Comparison of a computed score against the category baseline. Every
/// field except `similar_profiles` is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalComparison {
    pub percentile: u8,
    pub similar_profiles: u32,
    pub success_rate: u8,
    pub time_to_approval: &'static str,
}

pub(crate) fn compare(
    score: u8,
    category: VisaCategory,
    sampler: &dyn SimilarProfilesSampler,
) -> HistoricalComparison {
    let baseline = CategoryBaseline::for_category(category);

    HistoricalComparison {
        percentile: percentile(score, baseline.average_score),
        similar_profiles: sampler.sample(),
        success_rate: baseline.success_rate,
        time_to_approval: baseline.average_time_to_approval,
    }
}

/// Scores above the baseline average land in the upper half, scaled by
/// the remaining headroom; scores at or below scale linearly into the
/// lower half.
pub(crate) fn percentile(score: u8, average: u8) -> u8 {
    let score = f32::from(score.min(100));
    let average = f32::from(average.min(99).max(1));

    let raw = if score > average {
        50.0 + (score - average) / (100.0 - average) * 50.0
    } else {
        score / average * 50.0
    };

    raw.round().clamp(0.0, 100.0) as u8
}

/// Source for the presentation-only "similar profiles" count. The
/// deterministic scoring core never touches it; tests pin it to a fixed
/// value.
pub trait SimilarProfilesSampler: Send + Sync {
    /// Returns a count in `[100, 600)`.
    fn sample(&self) -> u32;
}

/// Production sampler backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl SimilarProfilesSampler for ThreadRngSampler {
    fn sample(&self) -> u32 {
        rand::thread_rng().gen_range(100..600)
    }
}

/// Fixed sampler for deterministic tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler(pub u32);

impl SimilarProfilesSampler for FixedSampler {
    fn sample(&self) -> u32 {
        self.0
    }
}
