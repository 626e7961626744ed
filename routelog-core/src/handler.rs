use crate::context::Context;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// A request handler: the "next" link of a middleware chain.
#[async_trait]
pub trait Handler<C: Context>: Send + Sync {
    async fn call(&self, ctx: &mut C) -> anyhow::Result<()>;
}

/// Wraps a downstream handler with cross-cutting behaviour.
///
/// Implementations must invoke `next` exactly once per request they let
/// through and must never alter routing decisions.
#[async_trait]
pub trait Middleware<C: Context>: Send + Sync {
    async fn handle(&self, ctx: &mut C, next: &dyn Handler<C>) -> anyhow::Result<()>;
}

/// Per-request decision to bypass a middleware entirely.
pub type Skipper = Arc<dyn Fn(&dyn Context) -> bool + Send + Sync>;

/// Skipper that never skips.
pub fn default_skipper() -> Skipper {
    Arc::new(|_: &dyn Context| false)
}

/// Skipper that bypasses requests whose path is one of `paths`.
pub fn skip_paths<I, S>(paths: I) -> Skipper
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let paths: HashSet<String> = paths.into_iter().map(Into::into).collect();
    if paths.is_empty() {
        return default_skipper();
    }
    Arc::new(move |ctx: &dyn Context| paths.contains(ctx.path()))
}
