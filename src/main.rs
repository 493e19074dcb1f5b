//! Wiring & DI. Entry point: load config, build the Gemini gateway, run CLI or TUI.
//! No business logic here; prompts and validation live in the insight service.

use dotenv::dotenv;
use nomad_intel::adapters::ai::GeminiAdapter;
use nomad_intel::adapters::ui::payload::read_payload;
use nomad_intel::adapters::ui::progress::spinner;
use nomad_intel::adapters::ui::tui::TuiInputPort;
use nomad_intel::domain::{Feature, Generated};
use nomad_intel::ports::GenerativePort;
use nomad_intel::shared::config::AppConfig;
use nomad_intel::usecases::InsightService;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage:
  nomad-intel                               interactive mode
  nomad-intel [--strict] <feature> [FILE]   run one feature; payload from FILE or stdin ('-')

Features: calendar-conflicts, coworking, time-zones, budget, community, legal, assistant
The assistant payload is {\"query\": \"...\", \"context\": {...}}.
--strict  fail when the model answers with non-JSON text";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    // Logs go to stderr so stdout carries only result JSON.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found (check CWD)"),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }
    let strict = args.iter().any(|a| a == "--strict");
    let positional: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| *a != "--strict")
        .collect();

    let cfg = AppConfig::load()?;
    if cfg.is_ai_configured() {
        info!("Gemini API key is set");
    } else {
        warn!("Gemini API key is not set (NOMAD_GEMINI_API_KEY or GEMINI_API_KEY)");
    }

    // --- Gateway: credential checked here, before any call can be made ---
    let gateway = GeminiAdapter::new(cfg.gemini_config())?;
    info!(
        endpoint = %gateway.endpoint(),
        model = %cfg.gemini_model_or_default(),
        "Gemini gateway ready"
    );
    let gateway: Arc<dyn GenerativePort> = Arc::new(gateway);
    let service = Arc::new(InsightService::new(gateway));

    match positional.as_slice() {
        [] => TuiInputPort::new(service).run().await,
        [feature] => run_once(&service, feature, None, strict).await,
        [feature, path] => run_once(&service, feature, Some(*path), strict).await,
        _ => anyhow::bail!("too many arguments\n\n{}", USAGE),
    }
}

async fn run_once(
    service: &InsightService,
    feature: &str,
    path: Option<&str>,
    strict: bool,
) -> anyhow::Result<()> {
    let feature: Feature = feature.parse().map_err(|e: String| anyhow::anyhow!("{}\n\n{}", e, USAGE))?;
    let payload = read_payload(path)?;

    let pb = spinner(format!("Asking Gemini: {}", feature.label()));
    let result = service.run(feature, &payload).await;
    pb.finish_and_clear();
    let generated = result?;

    if let Generated::RawText(text) = &generated {
        if strict {
            anyhow::bail!("{} answered with non-JSON text: {}", feature, text);
        }
        warn!(feature = %feature, "model answered with non-JSON text");
    }
    println!("{:#}", serde_json::to_value(&generated)?);
    Ok(())
}
