//! Command handlers: one SDK call each, rendered as a table or a summary

use anyhow::{Context, Result};
use codefresh_sdk::domain::classic::{RunOptions, Token};
use codefresh_sdk::domain::platform::{Cluster, Runtime};
use codefresh_sdk::port::{
    ClassicPipelineApi, ClusterApi, RuntimeApi, TokenApi, UserApi, VersionInfoApi,
};
use codefresh_sdk::{CancellationToken, Codefresh};
use colored::Colorize;
use std::collections::BTreeMap;
use std::time::Duration;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const NONE: &str = "-";

#[derive(Tabled)]
struct PipelineRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PROJECT")]
    project: String,
    #[tabled(rename = "UPDATED")]
    updated: String,
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PREFIX")]
    prefix: String,
    #[tabled(rename = "SUBJECT")]
    subject: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "SERVER")]
    server: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "VERSION")]
    version: String,
}

#[derive(Tabled)]
struct RuntimeRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "NAMESPACE")]
    namespace: String,
    #[tabled(rename = "HEALTH")]
    health: String,
    #[tabled(rename = "VERSION")]
    version: String,
}

impl From<&Token> for TokenRow {
    fn from(token: &Token) -> Self {
        Self {
            name: token.name.clone(),
            prefix: token.token_prefix.clone(),
            subject: format!("{}/{}", token.subject.kind, token.subject.reference),
            created: token
                .created
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| NONE.to_string()),
        }
    }
}

impl From<Cluster> for ClusterRow {
    fn from(cluster: Cluster) -> Self {
        Self {
            name: cluster.metadata.name,
            server: cluster.server,
            status: cluster.info.connection_state.status,
            version: cluster.info.server_version.unwrap_or_else(|| NONE.to_string()),
        }
    }
}

impl From<Runtime> for RuntimeRow {
    fn from(runtime: Runtime) -> Self {
        Self {
            name: runtime.metadata.name,
            namespace: runtime.metadata.namespace.unwrap_or_else(|| NONE.to_string()),
            health: runtime.health_status.unwrap_or_else(|| NONE.to_string()),
            version: runtime.runtime_version.unwrap_or_else(|| NONE.to_string()),
        }
    }
}

fn print_table<T: Tabled>(rows: Vec<T>, empty: &str) {
    if rows.is_empty() {
        println!("{}", empty.yellow());
        return;
    }
    println!("{}", Table::new(rows).with(Style::blank()));
}

pub async fn get_pipelines(
    client: &Codefresh,
    ctx: &CancellationToken,
    filters: Vec<(String, String)>,
) -> Result<()> {
    let query: BTreeMap<String, String> = filters.into_iter().collect();
    let pipelines = client.v1().pipeline().list(ctx, &query).await?;

    let rows = pipelines
        .into_iter()
        .map(|p| PipelineRow {
            name: p.metadata.name,
            project: p.metadata.project.unwrap_or_else(|| NONE.to_string()),
            updated: p
                .metadata
                .updated_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| NONE.to_string()),
        })
        .collect();

    print_table::<PipelineRow>(rows, "No pipelines found");
    Ok(())
}

pub async fn get_tokens(client: &Codefresh, ctx: &CancellationToken) -> Result<()> {
    let tokens = client.v1().token().list(ctx).await?;
    print_table(tokens.iter().map(TokenRow::from).collect(), "No tokens found");
    Ok(())
}

pub async fn get_clusters(client: &Codefresh, ctx: &CancellationToken, runtime: &str) -> Result<()> {
    let clusters = client.v2().cluster().list(ctx, runtime).await?;
    print_table(
        clusters.into_iter().map(ClusterRow::from).collect(),
        &format!("No clusters found in runtime {}", runtime),
    );
    Ok(())
}

pub async fn get_runtimes(client: &Codefresh, ctx: &CancellationToken) -> Result<()> {
    let runtimes = client.v2().runtime().list(ctx).await?;
    print_table(runtimes.into_iter().map(RuntimeRow::from).collect(), "No runtimes found");
    Ok(())
}

pub async fn get_runtime(client: &Codefresh, ctx: &CancellationToken, name: &str) -> Result<()> {
    let runtime = client.v2().runtime().get(ctx, name).await?;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| NONE.to_string());

    println!("{}", runtime.metadata.name.cyan().bold());
    println!("  {} {}", "Namespace:".bold(), show(&runtime.metadata.namespace));
    println!("  {} {}", "Health:".bold(), show(&runtime.health_status));
    println!("  {} {}", "Sync:".bold(), show(&runtime.sync_status));
    println!("  {} {}", "Version:".bold(), show(&runtime.runtime_version));
    println!("  {} {}", "Cluster:".bold(), show(&runtime.cluster));
    println!("  {} {}", "Ingress host:".bold(), show(&runtime.ingress_host));
    println!("  {} {}", "Managed:".bold(), runtime.managed);
    Ok(())
}

pub async fn run_pipelines(
    client: &Codefresh,
    ctx: &CancellationToken,
    names: &[String],
    branch: Option<String>,
    variables: Vec<(String, String)>,
) -> Result<()> {
    let options = RunOptions {
        branch,
        variables: variables.into_iter().collect(),
    };

    let pipelines = client.v1().pipeline();
    for name in names {
        let build_id = pipelines
            .run(ctx, name, &options)
            .await
            .with_context(|| format!("pipeline {}", name))?;
        println!("{} {} -> {}", "✓".green(), name.bold(), build_id);
    }
    Ok(())
}

pub async fn wait(
    client: &Codefresh,
    ctx: &CancellationToken,
    build_id: &str,
    status: &str,
    interval: Duration,
    timeout: Duration,
) -> Result<()> {
    client
        .v1()
        .workflow()
        .wait_for_status(ctx, build_id, status, interval, timeout)
        .await
        .with_context(|| format!("build {} did not reach status {}", build_id, status))?;

    println!(
        "{}",
        format!("✓ Build {} reached status {}", build_id, status).green().bold()
    );
    Ok(())
}

pub async fn whoami(client: &Codefresh, ctx: &CancellationToken) -> Result<()> {
    let user = client.v2().user().current(ctx).await?;

    println!("{}", user.name.cyan().bold());
    println!("  {} {}", "Email:".bold(), user.email);
    if let Some(account) = &user.active_account {
        println!("  {} {}", "Account:".bold(), account.name);
    }
    if user.is_admin {
        println!("  {} {}", "Admin:".bold(), "yes".green());
    }
    Ok(())
}

pub async fn version_info(
    client: &Codefresh,
    ctx: &CancellationToken,
    runtime: &str,
    insecure: bool,
) -> Result<()> {
    let app_proxy = client.v2().app_proxy(ctx, runtime, insecure).await?;
    let info = app_proxy.version_info().version_info(ctx).await?;

    println!("{}", format!("App-proxy of {}", runtime).cyan().bold());
    println!("  {} {}", "Version:".bold(), info.version);
    println!("  {} {}", "Platform host:".bold(), info.platform_host);
    println!("  {} {}", "Platform version:".bold(), info.platform_version);
    Ok(())
}
