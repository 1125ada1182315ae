//! Health check command - checks a running QnA server.

use std::time::Duration;

use super::serve::HealthResponse;
use crate::cli::HealthArgs;

/// The `/health` URL for a server base URL (or the health URL itself).
fn health_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.ends_with("/health") {
        base.to_string()
    } else {
        format!("{base}/health")
    }
}

/// Run the health check command
pub async fn run(args: &HealthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let url = health_url(&args.url);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("unhealthy: failed to connect to {url}: {e}"))?;

    let status = response.status();
    let health: HealthResponse = response
        .json()
        .await
        .map_err(|e| format!("unhealthy: unexpected response from {url} ({status}): {e}"))?;

    if !status.is_success() || health.status != "healthy" {
        return Err(format!(
            "unhealthy: server returned {status}, status {}",
            health.status
        )
        .into());
    }

    let users = health.users.map(|n| n.to_string()).unwrap_or_else(|| "?".into());
    println!("healthy: backend={} users={users}", health.backend);
    Ok(())
}
