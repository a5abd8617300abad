// Status Wait - poll an operation until it reports the target state

use crate::error::{ClientError, Result};
use crate::port::WorkflowApi;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Re-run `probe` every `interval` until it returns `true`
///
/// The first probe runs one interval after the call. Probe errors are
/// returned as-is and passing the deadline returns `ClientError::TimedOut`.
/// Cancelling `ctx` interrupts the sleep with `ClientError::Cancelled`.
pub async fn wait_for<F, Fut>(
    ctx: &CancellationToken,
    interval: Duration,
    timeout: Duration,
    mut probe: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        let wake = Instant::now() + interval;
        if wake > deadline {
            sleep_or_cancel(ctx, deadline).await?;
            return Err(ClientError::TimedOut(timeout));
        }

        sleep_or_cancel(ctx, wake).await?;

        if probe().await? {
            return Ok(());
        }
    }
}

/// Wait until build `id` reaches `status`
pub async fn wait_for_workflow_status(
    api: &dyn WorkflowApi,
    ctx: &CancellationToken,
    id: &str,
    status: &str,
    interval: Duration,
    timeout: Duration,
) -> Result<()> {
    wait_for(ctx, interval, timeout, || async move {
        let workflow = api.get(ctx, id).await?;
        debug!(
            workflow_id = %id,
            status = %workflow.status,
            target = %status,
            "Polled workflow status"
        );
        Ok(workflow.status == status)
    })
    .await
}

async fn sleep_or_cancel(ctx: &CancellationToken, until: Instant) -> Result<()> {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(ClientError::Cancelled),
        _ = sleep_until(until) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classic::Workflow;
    use crate::error::ApiError;
    use crate::port::classic::MockWorkflowApi;

    const INTERVAL: Duration = Duration::from_millis(5);

    fn workflow(status: &str) -> Workflow {
        Workflow {
            id: "build-1".to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_wait_returns_once_status_matches() {
        let mut api = MockWorkflowApi::new();
        let mut calls = 0;
        api.expect_get().times(3).returning(move |_, _| {
            calls += 1;
            Ok(workflow(if calls == 3 { "success" } else { "running" }))
        });

        let ctx = CancellationToken::new();
        let result =
            wait_for_workflow_status(&api, &ctx, "build-1", "success", INTERVAL, Duration::from_secs(5))
                .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let mut api = MockWorkflowApi::new();
        api.expect_get().returning(|_, _| Ok(workflow("running")));

        let ctx = CancellationToken::new();
        let timeout = Duration::from_millis(40);
        let err = wait_for_workflow_status(&api, &ctx, "build-1", "success", INTERVAL, timeout)
            .await
            .unwrap_err();

        assert!(err.is_timed_out());
    }

    #[tokio::test]
    async fn test_wait_propagates_fetch_error() {
        let mut api = MockWorkflowApi::new();
        api.expect_get().times(1).returning(|_, _| {
            Err(ClientError::Api(ApiError {
                status_code: 404,
                status_text: "Not Found".to_string(),
                body: "no such build".to_string(),
                message: "failed to make a REST API request".to_string(),
            }))
        });

        let ctx = CancellationToken::new();
        let err = wait_for_workflow_status(&api, &ctx, "build-1", "success", INTERVAL, Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(!err.is_timed_out());
        assert_eq!(err.api_error().map(|e| e.status_code), Some(404));
    }

    #[tokio::test]
    async fn test_wait_cancelled_before_first_probe() {
        let mut api = MockWorkflowApi::new();
        api.expect_get().times(0);

        let ctx = CancellationToken::new();
        ctx.cancel();
        let err = wait_for_workflow_status(&api, &ctx, "build-1", "success", INTERVAL, Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_wait_timeout_shorter_than_interval_never_probes() {
        let mut probes = 0;
        let ctx = CancellationToken::new();
        let err = wait_for(&ctx, Duration::from_secs(10), Duration::from_millis(10), || {
            probes += 1;
            async { Ok(true) }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ClientError::TimedOut(_)));
        assert_eq!(probes, 0);
    }
}
