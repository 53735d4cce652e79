use visa_advisor::scoring::{
    compute_score, quick_insights, EducationLevel, FactorId, FixedSampler, InvestmentCapacity,
    QuizAnswers, ScoreBand, ScoringEngine, StayDuration, TripPurpose, UserProfile, VisaCategory,
    WorkExperience,
};

fn pinned_engine() -> ScoringEngine {
    ScoringEngine::new().with_sampler(Box::new(FixedSampler(250)))
}

fn strong_h1b_profile() -> UserProfile {
    UserProfile {
        name: Some("X".to_string()),
        email: Some("x@x.com".to_string()),
        completed_quiz: true,
        interviews_practiced: 5,
        selected_visa: Some(VisaCategory::WorkerH1B),
        quiz_answers: Some(QuizAnswers {
            purpose: Some(TripPurpose::Work),
            duration: Some(StayDuration::Long),
            education: Some(EducationLevel::Master),
            experience: Some(WorkExperience::Senior),
            investment: Some(InvestmentCapacity::Small),
        }),
        ..UserProfile::default()
    }
}

fn profile_variants() -> Vec<UserProfile> {
    let mut variants = vec![UserProfile::default(), strong_h1b_profile()];

    for category in VisaCategory::ordered() {
        variants.push(UserProfile {
            selected_visa: Some(category),
            completed_quiz: true,
            quiz_answers: Some(QuizAnswers {
                purpose: Some(TripPurpose::Tourism),
                duration: Some(StayDuration::Permanent),
                education: Some(EducationLevel::None),
                experience: Some(WorkExperience::None),
                investment: Some(InvestmentCapacity::None),
            }),
            ..UserProfile::default()
        });
    }

    variants.push(UserProfile {
        name: Some("Only Name".to_string()),
        interviews_practiced: 2,
        recommended_visa: Some(VisaCategory::InvestorEb5),
        ..UserProfile::default()
    });

    variants
}

#[test]
fn overall_score_stays_in_range_for_varied_profiles() {
    for profile in profile_variants() {
        let assessment = compute_score(&profile).expect("assessment computes");
        assert!(assessment.overall_score <= 100, "profile {profile:?}");
    }
}

#[test]
fn outputs_stay_bounded_for_varied_profiles() {
    for profile in profile_variants() {
        let assessment = compute_score(&profile).expect("assessment computes");
        assert!(assessment.recommendations.len() <= 6);
        assert!(assessment.risk_factors.len() <= 4);
        for factor in &assessment.factors {
            assert!(factor.score <= 100);
            assert!(factor.weight > 0.0 && factor.weight <= 1.0);
        }
    }
}

#[test]
fn identical_input_is_deterministic_modulo_similar_profiles() {
    let profile = strong_h1b_profile();
    let engine = pinned_engine();

    let first = engine.compute(&profile).expect("first run computes");
    let second = engine.compute(&profile).expect("second run computes");

    // With the sampler pinned the entire output is equal; without it only
    // similar_profiles may differ.
    assert_eq!(first, second);

    let loose = compute_score(&profile).expect("unpinned run computes");
    assert_eq!(loose.overall_score, first.overall_score);
    assert_eq!(loose.category, first.category);
    assert_eq!(loose.factors, first.factors);
    assert_eq!(loose.recommendations, first.recommendations);
    assert_eq!(loose.risk_factors, first.risk_factors);
    assert_eq!(
        loose.historical_comparison.percentile,
        first.historical_comparison.percentile
    );
    assert_eq!(
        loose.historical_comparison.success_rate,
        first.historical_comparison.success_rate
    );
    assert_eq!(
        loose.historical_comparison.time_to_approval,
        first.historical_comparison.time_to_approval
    );
}

#[test]
fn preparation_factor_is_monotone_in_interview_practice() {
    let mut previous = 0;
    for practiced in 0..=5 {
        let profile = UserProfile {
            completed_quiz: true,
            interviews_practiced: practiced,
            ..UserProfile::default()
        };
        let assessment = compute_score(&profile).expect("assessment computes");
        let preparation = assessment
            .factors
            .iter()
            .find(|factor| factor.id == FactorId::Preparation)
            .expect("preparation factor present");
        assert!(
            preparation.score >= previous,
            "preparation dropped at {practiced} interviews"
        );
        previous = preparation.score;
    }
}

#[test]
fn missing_quiz_answers_fall_back_to_documented_defaults() {
    for category in VisaCategory::ordered() {
        let profile = UserProfile {
            selected_visa: Some(category),
            ..UserProfile::default()
        };
        let assessment = compute_score(&profile).expect("assessment computes");

        let consistency = assessment
            .factors
            .iter()
            .find(|factor| factor.id == FactorId::DataConsistency)
            .expect("consistency factor present");
        assert_eq!(consistency.score, 70);

        let visa_fit = assessment
            .factors
            .iter()
            .find(|factor| {
                !matches!(
                    factor.id,
                    FactorId::ProfileCompleteness
                        | FactorId::Preparation
                        | FactorId::DataConsistency
                )
            })
            .expect("visa fit factor present");
        assert_eq!(visa_fit.score, 50, "category {:?}", category);
    }
}

#[test]
fn strong_h1b_profile_lands_in_the_excellent_band() {
    let assessment = pinned_engine()
        .compute(&strong_h1b_profile())
        .expect("assessment computes");

    for factor in &assessment.factors {
        assert_eq!(factor.score, 100, "factor {:?}", factor.id);
    }
    assert_eq!(assessment.overall_score, 100);
    assert_eq!(assessment.category, ScoreBand::Excellent);
    assert_eq!(assessment.color, "green");
    assert_eq!(assessment.historical_comparison.similar_profiles, 250);
}

#[test]
fn empty_profile_lands_low_with_exactly_four_recommendations() {
    let profile = UserProfile {
        name: Some("X".to_string()),
        email: Some("x@x.com".to_string()),
        ..UserProfile::default()
    };
    let assessment = pinned_engine()
        .compute(&profile)
        .expect("assessment computes");

    // 20*0.15 + 0*0.25 + 70*0.20 + 50*0.30 / 0.90 = 35.6 -> 36.
    assert_eq!(assessment.overall_score, 36);
    assert!(matches!(
        assessment.category,
        ScoreBand::Critical | ScoreBand::Low
    ));

    let ids: Vec<&str> = assessment
        .recommendations
        .iter()
        .map(|recommendation| recommendation.id)
        .collect();
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
fn unknown_visa_field_falls_back_to_the_visitor_category() {
    let profile: UserProfile = serde_json::from_str(
        r#"{ "selected_visa": "XYZ", "completed_quiz": true, "interviews_practiced": 1 }"#,
    )
    .expect("payload accepted");

    let assessment = compute_score(&profile).expect("assessment computes");
    assert!(assessment
        .recommendations
        .iter()
        .any(|recommendation| recommendation.description.contains("Visitor (B1/B2)")));
}

#[test]
fn quick_insights_returns_at_most_three_lines() {
    for profile in profile_variants() {
        let insights = quick_insights(&profile).expect("insights compute");
        assert!(!insights.is_empty());
        assert!(insights.len() <= 3);
    }
}
