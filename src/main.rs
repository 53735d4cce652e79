use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use visa_advisor::config::AppConfig;
use visa_advisor::error::AppError;
use visa_advisor::scoring::{
    EducationLevel, InvestmentCapacity, PredictiveScore, QuizAnswers, ScoringEngine, StayDuration,
    TripPurpose, UserProfile, VisaCategory, WorkExperience,
};
use visa_advisor::telemetry;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Visa Advisor",
    about = "Run the visa assessment service or score an applicant profile from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute a predictive assessment for one applicant profile
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Applicant profile as a JSON file (defaults to a built-in sample)
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Include quick insight lines in the output
    #[arg(long)]
    insights: bool,
}

#[derive(Debug, Deserialize)]
struct AssessmentRequest {
    profile: UserProfile,
    #[serde(default)]
    include_insights: bool,
}

#[derive(Debug, Serialize)]
struct AssessmentResponse {
    generated_at: DateTime<Utc>,
    visa_category: &'static str,
    assessment: PredictiveScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<Vec<String>>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assess(args) => run_assess(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "visa assessment service ready");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessment", post(assessment_endpoint))
        .with_state(state)
}

fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { profile, insights } = args;

    let profile = match profile {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<UserProfile>(&raw).map_err(AppError::ProfileInput)?
        }
        None => sample_profile(),
    };

    let engine = ScoringEngine::new();
    let assessment = engine.compute(&profile)?;
    let insight_lines = if insights {
        Some(engine.insights(&profile)?)
    } else {
        None
    };

    render_assessment(&profile, &assessment, insight_lines.as_deref());
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn assessment_endpoint(
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let AssessmentRequest {
        profile,
        include_insights,
    } = payload;

    let engine = ScoringEngine::new();
    let assessment = engine.compute(&profile)?;
    let insights = if include_insights {
        Some(engine.insights(&profile)?)
    } else {
        None
    };

    Ok(Json(AssessmentResponse {
        generated_at: Utc::now(),
        visa_category: profile.active_category().code(),
        assessment,
        insights,
    }))
}

fn sample_profile() -> UserProfile {
    UserProfile {
        name: Some("Sample Applicant".to_string()),
        email: Some("applicant@example.com".to_string()),
        completed_quiz: true,
        interviews_practiced: 3,
        selected_visa: Some(VisaCategory::WorkerH1B),
        quiz_answers: Some(QuizAnswers {
            purpose: Some(TripPurpose::Work),
            duration: Some(StayDuration::Long),
            education: Some(EducationLevel::Master),
            experience: Some(WorkExperience::Mid),
            investment: Some(InvestmentCapacity::Small),
        }),
        ..UserProfile::default()
    }
}

fn render_assessment(
    profile: &UserProfile,
    assessment: &PredictiveScore,
    insights: Option<&[String]>,
) {
    println!("Visa assessment");
    println!(
        "Category: {} | Score: {}/100 ({}, {})",
        profile.active_category().label(),
        assessment.overall_score,
        assessment.category.label(),
        assessment.color
    );

    println!("\nScore factors");
    for factor in &assessment.factors {
        println!(
            "- {}: {}/100 (weight {:.2}, {:?})",
            factor.name, factor.score, factor.weight, factor.impact
        );
    }

    if assessment.recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &assessment.recommendations {
            println!(
                "- [{}] {}: {}",
                recommendation.priority.label(),
                recommendation.title,
                recommendation.description
            );
            for action in &recommendation.actions {
                println!("    * {action}");
            }
        }
    }

    if assessment.risk_factors.is_empty() {
        println!("\nRisk factors: none");
    } else {
        println!("\nRisk factors");
        for risk in &assessment.risk_factors {
            println!(
                "- [{} / {}%] {}: {}",
                risk.severity.label(),
                risk.likelihood,
                risk.title,
                risk.description
            );
        }
    }

    let comparison = &assessment.historical_comparison;
    println!("\nHistorical comparison");
    println!(
        "- Percentile {} among ~{} similar profiles; category success rate {}%, typical approval {}",
        comparison.percentile,
        comparison.similar_profiles,
        comparison.success_rate,
        comparison.time_to_approval
    );

    if let Some(lines) = insights {
        println!("\nQuick insights");
        for line in lines {
            println!("- {line}");
        }
    }
}
