//! Per-request trace identifier.
//!
//! [`crate::Trace`] opens a scope for every request; errors built inside it
//! pick the id up through [`TraceId::current`]. The id lives in a tokio
//! task-local, so spawned tasks do not see it.

use std::fmt;
use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header echoing the request's trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Random UUID tagging one request's logs, error payloads and response.
///
/// ```
/// use kitchen::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::generate();
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request being handled, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` as part of the request tagged `id`.
    pub async fn scope<F: Future>(id: TraceId, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn nested_scopes_see_the_innermost_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;

        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[test]
    fn displays_as_a_hyphenated_uuid() {
        let id = TraceId::generate().to_string();

        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
