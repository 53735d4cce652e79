use super::PredictiveScore;

const LOW_FACTOR_CUTOFF: u8 = 60;
const HIGH_FACTOR_CUTOFF: u8 = 80;

/// Up to three short takeaways from a freshly computed assessment: an
/// overall tier message, the weakest factor under 60, and the strongest
/// factor at 80 or above.
pub(crate) fn summarize(assessment: &PredictiveScore) -> Vec<String> {
    let mut insights = Vec::with_capacity(3);

    insights.push(tier_message(assessment.overall_score).to_string());

    if let Some(factor) = assessment
        .factors
        .iter()
        .filter(|factor| factor.score < LOW_FACTOR_CUTOFF)
        .min_by_key(|factor| factor.score)
    {
        insights.push(format!(
            "{} is your weakest area at {} points; start there.",
            factor.name, factor.score
        ));
    }

    if let Some(factor) = assessment
        .factors
        .iter()
        .filter(|factor| factor.score >= HIGH_FACTOR_CUTOFF)
        .max_by_key(|factor| factor.score)
    {
        insights.push(format!(
            "{} is a standout strength at {} points.",
            factor.name, factor.score
        ));
    }

    insights
}

const fn tier_message(overall_score: u8) -> &'static str {
    if overall_score >= 80 {
        "Your profile is highly competitive; keep your documentation current."
    } else if overall_score >= 60 {
        "Your profile is on track, with clear room to strengthen weaker areas."
    } else {
        "Your profile needs significant work before an application is advisable."
    }
}
