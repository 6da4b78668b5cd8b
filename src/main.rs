use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use pawlink_match::config::{LoggingSettings, Settings};
use pawlink_match::core::{MatchPolicy, Matcher};
use pawlink_match::error::MatchError;
use pawlink_match::models::{RankRequest, RankResponse, TopMatchesRequest, TopMatchesResponse};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;

#[derive(Parser, Debug)]
#[command(
    name = "pawlink-match",
    about = "Score and rank pet compatibility from JSON batch files",
    version
)]
struct Cli {
    /// Configuration file (defaults to config/default and config/local)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Reference date for pet ages, YYYY-MM-DD (defaults to today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank candidates for one requester pet
    Rank { file: PathBuf },
    /// Best candidate for each of the requester's pets
    Top { file: PathBuf },
    /// Print features, activations and score for every eligible candidate
    Explain { file: PathBuf },
}

fn main() {
    dotenv::dotenv().ok();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), MatchError> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    init_logging(&settings.logging)?;

    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());
    let matcher = settings.matcher(as_of);

    info!(%as_of, policy = ?matcher.policy(), "Matcher initialized");

    let output = match &cli.command {
        Command::Rank { file } => {
            let request: RankRequest = read_request(file)?;
            request.validate().map_err(MatchError::InvalidRequest)?;
            serde_json::to_string_pretty(&rank(&matcher, &request))?
        }
        Command::Top { file } => {
            let request: TopMatchesRequest = read_request(file)?;
            request.validate().map_err(MatchError::InvalidRequest)?;
            let pets: Vec<_> = request
                .pets
                .into_iter()
                .map(|p| (p.pet, p.preferences))
                .collect();
            let response = TopMatchesResponse {
                top_matches: matcher.top_matches(&pets, &request.candidates),
            };
            serde_json::to_string_pretty(&response)?
        }
        Command::Explain { file } => {
            let request: RankRequest = read_request(file)?;
            request.validate().map_err(MatchError::InvalidRequest)?;
            let explained = matcher.explain(&request.requester, request.preferences.as_ref(), &request.candidates);
            serde_json::to_string_pretty(&explained)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Apply per-request overrides on top of the configured policy
fn rank(matcher: &Matcher, request: &RankRequest) -> RankResponse {
    let policy = MatchPolicy {
        min_score: request.min_score.unwrap_or(matcher.policy().min_score),
        limit: request.limit.or(matcher.policy().limit),
        ..*matcher.policy()
    };

    let result = matcher
        .with_policy(policy)
        .find_matches(&request.requester, request.preferences.as_ref(), &request.candidates);

    info!(
        "Returning {} matches for pet {} (from {} candidates)",
        result.matches.len(),
        request.requester.pet_id,
        result.total_candidates
    );

    RankResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
        eligible_candidates: result.eligible_candidates,
    }
}

fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T, MatchError> {
    let raw = std::fs::read_to_string(path).map_err(|source| MatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// `RUST_LOG` wins over the configured level
fn init_logging(logging: &LoggingSettings) -> Result<(), MatchError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .map_err(|e| MatchError::Logging(format!("invalid log level '{}': {}", logging.level, e)))?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    let result = match logging.format.as_str() {
        "pretty" => subscriber.pretty().try_init(),
        "json" => subscriber.json().try_init(),
        _ => subscriber.compact().try_init(),
    };

    result.map_err(|e| MatchError::Logging(e.to_string()))
}
