//! Time-bounded reads against the host.

use std::time::Duration;

use scenelens_protocols::error::{HostError, IntrospectionError};

/// Run a blocking host read on the blocking pool and give up after `timeout`.
///
/// A read that overruns is abandoned, not cancelled: the blocking task keeps
/// running, but the caller gets `HostTimeout` immediately.
pub(crate) async fn read_bounded<F, T>(
    operation: &str,
    timeout: Duration,
    f: F,
) -> Result<T, IntrospectionError>
where
    F: FnOnce() -> Result<T, HostError> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(f);
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result.map_err(IntrospectionError::from),
        Ok(Err(join_err)) => Err(IntrospectionError::HostUnavailable(format!(
            "{} panicked: {}",
            operation, join_err
        ))),
        Err(_) => Err(IntrospectionError::HostTimeout {
            operation: operation.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}
