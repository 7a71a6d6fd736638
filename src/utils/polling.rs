use std::future::Future;
use std::time::{Duration, Instant};

use log::debug;

/// Polls until a condition is met or the deadline passes.
///
/// `check` returns `Ok(true)` when the condition is met and `Ok(false)` to
/// keep polling. `Ok(true)` means the condition was met within `max_wait`,
/// `Ok(false)` that the deadline passed first. Errors from `check`
/// propagate immediately; nothing is retried.
pub async fn poll_until<F, Fut, E>(
    check: F,
    max_wait: Duration,
    poll_interval: Duration,
    operation_name: &str,
) -> Result<bool, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let start = Instant::now();
    loop {
        if check().await? {
            debug!("{} completed after {:?}", operation_name, start.elapsed());
            return Ok(true);
        }
        if start.elapsed() > max_wait {
            debug!("timed out waiting for {}", operation_name);
            return Ok(false);
        }
        tokio::time::sleep(poll_interval).await;
    }
}
