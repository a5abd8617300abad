// SDK constants (no magic values)
use std::time::Duration;

/// Poll interval used when waiting for a build status (2s)
pub const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_secs(2);

/// Give up waiting for a build status after 5 minutes
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Build status that marks a successful run
pub const WORKFLOW_STATUS_SUCCESS: &str = "success";
