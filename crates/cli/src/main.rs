//! cfctl - command-line client for the Codefresh platform

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codefresh_sdk::{CancellationToken, ClientOptions, Codefresh, WORKFLOW_STATUS_SUCCESS};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "codefresh=info,cfctl=info";

#[derive(Parser)]
#[command(name = "cfctl")]
#[command(about = "Codefresh platform CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Auth-context file (default: ~/.cfconfig)
    #[arg(long, global = true, env = "CFCONFIG")]
    cfconfig: Option<PathBuf>,

    /// Auth context to use (default: current-context)
    #[arg(long, global = true)]
    context: Option<String>,

    /// Platform URL, overrides the auth context
    #[arg(long, global = true, env = "CF_URL")]
    url: Option<String>,

    /// API key, overrides the auth context
    #[arg(long, global = true, env = "CF_API_KEY", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    request_timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Display resources
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },

    /// Trigger resources
    Run {
        #[command(subcommand)]
        resource: RunResource,
    },

    /// Wait until a build reaches a status
    Wait {
        /// Build ID
        build_id: String,

        #[arg(long, default_value = WORKFLOW_STATUS_SUCCESS)]
        status: String,

        /// Poll interval in seconds
        #[arg(long, default_value = "2")]
        interval: u64,

        /// Give up after this many seconds
        #[arg(long, default_value = "300")]
        timeout: u64,
    },

    /// Show the user the API key belongs to
    Whoami,

    /// Show app-proxy version information of a runtime
    VersionInfo {
        #[arg(long)]
        runtime: String,

        /// Skip TLS certificate verification for the app-proxy
        #[arg(long)]
        insecure: bool,
    },
}

#[derive(Subcommand)]
enum GetResource {
    /// Classic pipelines
    Pipelines {
        /// Raw query filter, e.g. --filter limit=10
        #[arg(long = "filter", value_parser = parse_key_val)]
        filters: Vec<(String, String)>,
    },

    /// API keys scoped to runtime environments
    Tokens,

    /// Clusters managed by a runtime
    Clusters {
        #[arg(long)]
        runtime: String,
    },

    /// One runtime in detail
    Runtime { name: String },

    /// All runtimes of the account
    Runtimes,
}

#[derive(Subcommand)]
enum RunResource {
    /// Trigger one or more classic pipelines
    Pipeline {
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(long)]
        branch: Option<String>,

        /// Build variable, e.g. --var IMAGE_TAG=1.2.3
        #[arg(long = "var", value_parser = parse_key_val)]
        variables: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))
}

fn init_logging() {
    let log_format = std::env::var("CFCTL_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let creds = config::resolve_credentials(
        cli.url,
        cli.token,
        cli.cfconfig.as_deref(),
        cli.context.as_deref(),
    )?;
    debug!(url = %creds.url, "Resolved platform endpoint");

    let client = Codefresh::new(
        ClientOptions::new(creds.url, creds.token)
            .with_timeout(Duration::from_secs(cli.request_timeout)),
    )?;

    // Ctrl-C cancels whatever is in flight
    let ctx = CancellationToken::new();
    let cancel = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            cancel.cancel();
        }
    });

    match cli.command {
        Commands::Get { resource } => match resource {
            GetResource::Pipelines { filters } => {
                commands::get_pipelines(&client, &ctx, filters).await
            }
            GetResource::Tokens => commands::get_tokens(&client, &ctx).await,
            GetResource::Clusters { runtime } => {
                commands::get_clusters(&client, &ctx, &runtime).await
            }
            GetResource::Runtime { name } => commands::get_runtime(&client, &ctx, &name).await,
            GetResource::Runtimes => commands::get_runtimes(&client, &ctx).await,
        },

        Commands::Run { resource } => match resource {
            RunResource::Pipeline {
                names,
                branch,
                variables,
            } => commands::run_pipelines(&client, &ctx, &names, branch, variables).await,
        },

        Commands::Wait {
            build_id,
            status,
            interval,
            timeout,
        } => {
            commands::wait(
                &client,
                &ctx,
                &build_id,
                &status,
                Duration::from_secs(interval),
                Duration::from_secs(timeout),
            )
            .await
        }

        Commands::Whoami => commands::whoami(&client, &ctx).await,

        Commands::VersionInfo { runtime, insecure } => {
            commands::version_info(&client, &ctx, &runtime, insecure).await
        }
    }
}
