//! Silhouette daemon — the tick driver plus the REST facade
//!
//! One process owns every component: the continuum memory, the swarm
//! registry, the workflow coordinator, and the gateway all hang off a
//! single explicitly constructed AppContext. A 1-second interval drives
//! the swarm and workflow ticks; the gateway serves in parallel.

use clap::{Parser, Subcommand};
use silhouette_consciousness::{ConsciousnessScorer, IntrospectionFilter};
use silhouette_core::{AuthMode, SilhouetteConfig};
use silhouette_gateway::{start_gateway, AppContext, ResolvedAuth};
use silhouette_llm::{AnthropicProvider, GenerationProvider};
use silhouette_memory::ContinuumMemory;
use silhouette_swarm::AgentRegistry;
use silhouette_workflow::WorkflowCoordinator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "silhouette", about = "Silhouette Agency OS — operator daemon")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway and the 1-second tick driver
    Serve {
        /// Config file (default: ~/.silhouette/silhouette.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the gateway port
        #[arg(short, long)]
        port: Option<u16>,
        /// Gateway bearer token (overrides config and env)
        #[arg(long)]
        token: Option<String>,
        /// Disable authentication
        #[arg(long)]
        no_auth: bool,
        /// Workspace root for the filesystem endpoints
        #[arg(short, long)]
        workspace: Option<PathBuf>,
        /// Seed the swarm RNG for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the resolved configuration
    Status {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Commands::Serve {
            config,
            port,
            token,
            no_auth,
            workspace,
            seed,
        } => serve(config, port, token, no_auth, workspace, seed).await,
        Commands::Status { config } => status(config),
        Commands::Version => {
            println!("silhouette {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    port: Option<u16>,
    token: Option<String>,
    no_auth: bool,
    workspace: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut config = SilhouetteConfig::load(config_path.as_deref())?;
    if let Some(port) = port {
        config.gateway.port = port;
    }
    if no_auth {
        config.gateway.auth.mode = AuthMode::None;
    }
    if token.is_some() {
        config.gateway.auth.token = token;
    }

    let env_token = std::env::var("SILHOUETTE_GATEWAY_TOKEN").ok();
    let auth = ResolvedAuth::from_config(&config.gateway.auth, env_token);

    let api_key = std::env::var("ANTHROPIC_API_KEY")
        .map_err(|_| anyhow::anyhow!("ANTHROPIC_API_KEY not set"))?;
    let provider: Arc<dyn GenerationProvider> = match std::env::var("ANTHROPIC_API_URL") {
        Ok(api_url) => {
            info!("Using custom API URL: {}/v1/messages", api_url);
            Arc::new(
                AnthropicProvider::new(&api_key)
                    .with_base_url(format!("{}/v1/messages", api_url)),
            )
        }
        Err(_) => Arc::new(AnthropicProvider::new(&api_key)),
    };

    let model = std::env::var("SILHOUETTE_MODEL")
        .ok()
        .or_else(|| config.model.clone())
        .unwrap_or_else(|| config.workflow.model.clone());
    let mut workflow_config = config.workflow.clone();
    workflow_config.model = model.clone();

    let workspace_root = match workspace.or_else(|| config.workspace.clone()) {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let data_dir = config.resolved_data_dir();

    let memory = Arc::new(ContinuumMemory::new(&data_dir));
    let swarm = Arc::new(match seed {
        Some(seed) => AgentRegistry::with_seed(seed),
        None => AgentRegistry::new(),
    });
    let workflow = Arc::new(WorkflowCoordinator::new(
        provider.clone(),
        memory.clone(),
        workflow_config,
    ));

    let ctx = Arc::new(AppContext {
        memory,
        swarm,
        workflow,
        scorer: Arc::new(ConsciousnessScorer::new(3)),
        filter: IntrospectionFilter::default(),
        provider,
        auth,
        workspace_root: workspace_root.clone(),
        model,
        started_at: Instant::now(),
    });

    info!("data dir: {}", data_dir.display());
    info!("workspace: {}", workspace_root.display());

    let cancel = CancellationToken::new();
    let driver_cancel = cancel.clone();
    let driver_ctx = ctx.clone();
    let driver = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = driver_cancel.cancelled() => break,
                _ = interval.tick() => {
                    driver_ctx.swarm.tick();
                    driver_ctx.workflow.tick().await;
                }
            }
        }
    });

    tokio::select! {
        result = start_gateway(ctx.clone(), &config.gateway) => result?,
        _ = tokio::signal::ctrl_c() => info!("shutdown signal received"),
    }

    cancel.cancel();
    let _ = driver.await;
    Ok(())
}

fn status(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = SilhouetteConfig::load(config_path.as_deref())?;
    println!("silhouette {}", env!("CARGO_PKG_VERSION"));
    println!("  gateway:   {}:{}", config.gateway.bind.to_addr(), config.gateway.port);
    println!("  auth mode: {:?}", config.gateway.auth.mode);
    println!("  data dir:  {}", config.resolved_data_dir().display());
    println!(
        "  workflow:  enabled={} continuous={} budget={} tokens",
        config.workflow.enabled, config.workflow.continuous, config.workflow.max_daily_tokens
    );
    Ok(())
}
