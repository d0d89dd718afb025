use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use placement_match::config::AppConfig;
use placement_match::error::AppError;
use placement_match::telemetry;
use placement_match::workflows::matching::{
    matching_router, CandidateId, InMemoryCandidateSource, JobCriteria, MatchRequest,
    MatchResponse, MatchService,
};
use placement_match::workflows::roster::RosterImporter;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Placement Match",
    about = "Run the placement-cell matching service or score a roster from the command line",
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
    /// Score a candidate roster against a job definition
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Seed the candidate pool from a roster CSV at startup
    #[arg(long)]
    roster: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum MatchCommand {
    /// Run one matching pass and print the ranked results
    Run(MatchRunArgs),
}

#[derive(Args, Debug)]
struct MatchRunArgs {
    /// Job definition (JSON file with criteria, skills, and weights)
    #[arg(long)]
    job: PathBuf,
    /// Candidate roster CSV
    #[arg(long)]
    roster: PathBuf,
    /// Restrict the run to these candidate ids
    #[arg(long, value_delimiter = ',')]
    candidate_ids: Option<Vec<String>>,
    /// Only print the top N ranked candidates
    #[arg(long)]
    top: Option<usize>,
    /// Include matched/missing skills per candidate
    #[arg(long)]
    list_skills: bool,
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
        Command::Match {
            command: MatchCommand::Run(args),
        } => run_match_command(args),
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

    let pool = match args.roster.take() {
        Some(path) => RosterImporter::from_path(path)?,
        None => Vec::new(),
    };
    let pool_size = pool.len();
    let source = Arc::new(InMemoryCandidateSource::new(pool));
    let service = Arc::new(MatchService::new(source, config.scoring));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(matching_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, pool_size, "placement matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_match_command(args: MatchRunArgs) -> Result<(), AppError> {
    let MatchRunArgs {
        job,
        roster,
        candidate_ids,
        top,
        list_skills,
    } = args;

    let job_file = std::fs::File::open(job)?;
    let job: JobCriteria = serde_json::from_reader(job_file)?;

    let pool = RosterImporter::from_path(roster)?;
    let source = Arc::new(InMemoryCandidateSource::new(pool));
    let service = MatchService::new(source, AppConfig::load()?.scoring);

    let request = MatchRequest {
        job_criteria: job,
        candidate_ids: candidate_ids.map(|ids| ids.into_iter().map(CandidateId).collect()),
    };

    let response = service.run(&request)?;
    render_match_report(&request.job_criteria, &response, top, list_skills);

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

fn render_match_report(
    job: &JobCriteria,
    response: &MatchResponse,
    top: Option<usize>,
    list_skills: bool,
) {
    println!("Match run report");
    println!(
        "Job: {} / {} ({})",
        job.company,
        job.role,
        response.job_id
    );
    println!(
        "Scored {} candidate(s) in {} ms at {}",
        response.total_candidates, response.execution_time_ms, response.timestamp
    );

    let shown = top.unwrap_or(response.results.len());

    println!("\nRanked results");
    for row in response.export_rows().into_iter().take(shown) {
        println!(
            "- #{} {} | {} | overall {} (skills {:.0}, experience {:.0}, projects {:.0})",
            row.rank,
            row.candidate_id,
            row.name,
            row.overall_score,
            row.skill_score,
            row.experience_score,
            row.project_score
        );

        if list_skills {
            let matched = if row.matched_skills.is_empty() {
                "none"
            } else {
                &row.matched_skills
            };
            let missing = if row.missing_skills.is_empty() {
                "none"
            } else {
                &row.missing_skills
            };
            println!("    matched: {matched} | missing: {missing}");
        }
    }

    if shown < response.results.len() {
        println!(
            "\nShowing top {shown} of {} result(s)",
            response.results.len()
        );
    }
}
