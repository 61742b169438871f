use crate::api::ConsoleClient;
use crate::config::{self, Config};
use crate::error::{ConfigError, ConsoleError, Result};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Validates the configuration, then probes the backend: the public tools
/// endpoint for reachability and, when a session exists, `/auth/me` to see
/// whether the stored token is still accepted.
pub async fn run_check(config: &Config, client: &ConsoleClient) -> Result<()> {
    info!("Running configuration check...");
    config::validate(config)?;
    info!("✓ Configuration is valid");
    info!("  Backend: {}", client.transport().base_url());
    match config.session.resolved_path() {
        Some(path) if !config.session.in_memory => info!("  Session file: {}", path.display()),
        _ => info!("  Session: in memory"),
    }

    let mut all_passed = true;

    match timeout(CHECK_TIMEOUT, client.tools().mcp_tools(None)).await {
        Ok(Ok(tools)) => info!("✓ Backend reachable ({} sample tools)", tools.tools.len()),
        Ok(Err(e)) => {
            error!("✗ Backend check failed: {}", e);
            all_passed = false;
        }
        Err(_) => {
            error!("✗ Backend did not answer within {:?}", CHECK_TIMEOUT);
            all_passed = false;
        }
    }

    if client.session().is_authenticated() {
        match timeout(CHECK_TIMEOUT, client.auth().current_user()).await {
            Ok(Ok(user)) => info!("✓ Signed in as {} ({:?})", user.username, user.role),
            Ok(Err(ConsoleError::Unauthorized)) => {
                warn!("✗ Stored session was rejected and has been cleared");
                all_passed = false;
            }
            Ok(Err(e)) => {
                error!("✗ Session check failed: {}", e);
                all_passed = false;
            }
            Err(_) => {
                error!("✗ Session check timed out");
                all_passed = false;
            }
        }
    } else {
        info!("  Not signed in");
    }

    if all_passed {
        info!("✓ All checks passed");
        Ok(())
    } else {
        Err(ConfigError::Validation("One or more checks failed".to_string()).into())
    }
}
