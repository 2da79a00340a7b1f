//! Task-local trace context for web requests.
//!
//! Gives any code on the request path access to the request's trace id
//! without threading it through every signature. The scope is established by
//! the `TraceSpan` middleware; outside a request the id reads as "unknown".
//!
//! Web boundary only; service and repo code takes no dependency on this.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id of the current request, or "unknown" outside a request scope.
pub fn current() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with the given trace id installed as the task-local value.
pub async fn scope<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
