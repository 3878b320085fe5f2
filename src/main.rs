//! plugin-agent - Ask an LLM agent a question it answers through a hosted AI plugin
//!
//! This is the main entry point for the plugin-agent binary.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use tracing::{debug, error, info};

mod agent;
mod chat_model;
mod cli;
mod config;
mod environment;
mod error;
mod logging;
mod plugins;

use agent::{Agent, AgentStrategy};
use chat_model::OpenAiChat;
use cli::Args;
use config::Config;
use environment::{resolve_base_url, DEV_ENV_VAR};
use error::ConfigError;
use logging::TranscriptLogger;
use plugins::{PluginLoader, ToolInvoker};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let dotenv = dotenvy::dotenv();

    let config = Config::load(args.config.as_deref());
    let verbose = !args.quiet && config.as_ref().map_or(true, |c| c.agent.verbose);
    init_logging(args.debug, verbose);

    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    info!("Starting plugin-agent v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args, config).await {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Validate the configuration and answer one query, recording the outcome
/// in the run transcript
async fn run(args: &Args, config: std::result::Result<Config, ConfigError>) -> error::Result<()> {
    let mut config = config?;
    if let Some(max_iterations) = args.max_iterations {
        config.agent.max_iterations = max_iterations;
    }
    config.validate()?;

    let mut transcript = TranscriptLogger::new(config.transcript.clone());
    transcript.maybe_rotate();
    debug!("Transcript run id {}", TranscriptLogger::run_id());

    match answer(args, &config, &mut transcript).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            transcript.log_error(&args.query, &e.to_string());
            Err(e)
        }
    }
}

/// Resolve the plugin, assemble the tools and run the agent
async fn answer(
    args: &Args,
    config: &Config,
    transcript: &mut TranscriptLogger,
) -> error::Result<String> {
    // The only place the DEV flag is read from the process environment
    let dev_flag = std::env::var(DEV_ENV_VAR).ok();
    let base_url = resolve_base_url(dev_flag.as_deref(), &config.plugin)?;
    info!("Using plugin at {}", base_url);
    transcript.log_query(&args.query, &base_url);

    let api_key = config
        .get_api_key()
        .ok_or_else(|| ConfigError::MissingEnv(config.ai.api_key_env.clone()))?;
    let model = OpenAiChat::new(config.ai.clone(), api_key)?;

    let client = plugins::http_client(config.plugin.timeout)?;
    let loader = PluginLoader::new(client.clone(), &config.plugin.manifest_path);
    let registry = plugins::load_registry(&loader, &base_url).await?;

    let agent = Agent::new(model, registry, AgentStrategy::ZeroShotReactDescription)?
        .with_invoker(ToolInvoker::new(client))
        .with_max_iterations(config.agent.max_iterations);
    info!("Registered tools: {}", agent.registry().names().join(", "));

    let started = Instant::now();
    let run = agent.run(&args.query).await?;
    transcript.log_run(&args.query, &run, started.elapsed().as_millis() as u64);
    Ok(run.output)
}

/// Initialize the logging/tracing subsystem
fn init_logging(debug: bool, verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = if verbose { "info" } else { "warn" };
            EnvFilter::new(format!("warn,plugin_agent={}", level))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
