//! Simple SDK Example
//!
//! Prints the current user, the runtimes of the account and the clusters of
//! the first runtime.
//!
//! # Usage
//!
//! ```bash
//! CF_API_KEY=<key> cargo run --example simple
//! ```

use codefresh_sdk::port::{ClusterApi, RuntimeApi, UserApi};
use codefresh_sdk::{CancellationToken, ClientOptions, Codefresh};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::var("CF_URL").unwrap_or_else(|_| "https://g.codefresh.io".to_string());
    let token = std::env::var("CF_API_KEY")?;

    let client = Codefresh::new(
        ClientOptions::new(host, token).with_timeout(Duration::from_secs(30)),
    )?;
    let ctx = CancellationToken::new();

    // Ctrl-C aborts in-flight requests
    let cancel = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let me = client.v2().user().current(&ctx).await?;
    println!("User: {} <{}>", me.name, me.email);

    let runtimes = client.v2().runtime().list(&ctx).await?;
    for runtime in &runtimes {
        println!(
            "Runtime: {} ({})",
            runtime.metadata.name,
            runtime.health_status.as_deref().unwrap_or("unknown")
        );
    }

    if let Some(runtime) = runtimes.first() {
        let clusters = client.v2().cluster().list(&ctx, &runtime.metadata.name).await?;
        for cluster in clusters {
            println!("  Cluster: {} -> {}", cluster.metadata.name, cluster.server);
        }
    }

    Ok(())
}
