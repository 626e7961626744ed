use crate::buffer_pool::BufferPool;
use crate::format::{self, LogLine};
use crate::options::LoggerOptions;
use crate::severity;
use crate::sink::LogSink;
use crate::terminal;
use async_trait::async_trait;
use routelog_core::config::LogFormat;
use routelog_core::context::Context;
use routelog_core::handler::{Handler, Middleware, Skipper};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Access-log middleware.
///
/// Built once and shared across all requests. For every request that is
/// not skipped it times the downstream handler, forwards any handler error
/// to the context, and writes exactly one line to the sink. Logging never
/// fails the request: the middleware reports success even when the handler
/// did not, and a failed sink write is dropped.
pub struct RequestLogger {
    skipper: Skipper,
    output: Arc<dyn LogSink>,
    format: LogFormat,
    pool: BufferPool,
    is_terminal: bool,
}

impl RequestLogger {
    /// Build the logger, probing once whether stdout is a terminal.
    ///
    /// Color is gated on the process's stdout, not on the configured sink.
    pub fn new(options: LoggerOptions) -> Self {
        Self::with_terminal(options, terminal::stdout_is_terminal())
    }

    /// Build the logger with an already known terminal capability.
    pub fn with_terminal(options: LoggerOptions, is_terminal: bool) -> Self {
        let LoggerOptions {
            skipper,
            output,
            format,
        } = options;

        debug!(format = %format, terminal = is_terminal, "Request logger initialised");

        Self {
            skipper,
            output,
            format,
            pool: BufferPool::default(),
            is_terminal,
        }
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Format and write one access line.
    fn emit(
        &self,
        status: u16,
        method: &str,
        path: &str,
        latency: Duration,
        error: Option<&anyhow::Error>,
    ) {
        let latency = format::format_latency(latency);
        let outcome = severity::classify(status, error);

        let line = LogLine {
            status,
            method,
            path,
            latency: &latency,
            color: outcome.color,
            error: outcome.error.as_deref(),
        };

        let mut buf = self.pool.acquire();
        match self.format {
            LogFormat::Text => format::encode_text(&mut buf, &line, self.is_terminal),
            LogFormat::Json => {
                if format::encode_json(&mut buf, &line).is_err() {
                    return;
                }
            }
        }
        // Best effort: the request outcome never depends on the sink.
        let _ = self.output.write_line(&buf);
    }
}

#[async_trait]
impl<C: Context> Middleware<C> for RequestLogger {
    async fn handle(&self, ctx: &mut C, next: &dyn Handler<C>) -> anyhow::Result<()> {
        if (self.skipper)(&*ctx) {
            return next.call(ctx).await;
        }

        let start = Instant::now();
        let result = next.call(ctx).await;
        let error = result.err();
        if let Some(err) = &error {
            ctx.report_error(err);
        }
        let latency = start.elapsed();

        self.emit(ctx.status(), ctx.method(), ctx.path(), latency, error.as_ref());
        Ok(())
    }
}
