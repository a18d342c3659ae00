use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rendezvous_engine::planner::{PlanRequest, PlannerConfig, RendezvousPlanner};
use rendezvous_engine::provider::{CacheConfig, CachedRouteProvider, StaticRouteProvider};

/// Directory holding `fixtures/` and `scenario.json` when none is given.
const DEFAULT_DATA_DIR: &str = "data";

fn load_scenario(path: &Path) -> Result<PlanRequest, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read scenario {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("failed to parse scenario {}: {e}", path.display()))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir = std::env::var("RENDEZVOUS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

    let fixtures = match StaticRouteProvider::from_dir(data_dir.join("fixtures")) {
        Ok(provider) => provider,
        Err(e) => {
            error!(error = %e, "Failed to load route fixtures");
            return ExitCode::FAILURE;
        }
    };
    let fixtures = match std::env::var("RENDEZVOUS_MATCH_RADIUS_M") {
        Ok(raw) => match raw.parse::<f64>() {
            Ok(meters) if meters > 0.0 => fixtures.with_match_radius(meters),
            _ => {
                error!(value = %raw, "RENDEZVOUS_MATCH_RADIUS_M must be a positive number");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => fixtures,
    };
    info!(routes = fixtures.route_count(), "Loaded route fixtures");

    let scenario_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("scenario.json"));
    let request = match load_scenario(&scenario_path) {
        Ok(request) => request,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let provider = CachedRouteProvider::new(fixtures, &CacheConfig::default());
    let planner = RendezvousPlanner::new(provider, PlannerConfig::default());

    match planner.calculate(&request).await {
        Ok(result) => {
            println!("{}", result.narrative());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Planning failed");
            ExitCode::FAILURE
        }
    }
}
