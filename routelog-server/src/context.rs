//! Adapter between axum's middleware stack and the logger's host contracts.

use async_trait::async_trait;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use routelog_core::context::Context;
use routelog_core::handler::Handler;
use std::sync::Arc;
use tracing::debug;

/// Response extension marking a response produced from a handler error.
#[derive(Debug, Clone)]
pub struct HandlerFailure(pub Arc<str>);

/// Error type for demo handlers.
///
/// Renders as a bare 500 and tags the response with [`HandlerFailure`] so
/// the logging layer can see the original message.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response =
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        response
            .extensions_mut()
            .insert(HandlerFailure(self.0.to_string().into()));
        response
    }
}

/// One request travelling through the axum stack.
pub struct HttpContext {
    method: String,
    path: String,
    pending: Option<(Request, Next)>,
    response: Option<Response>,
}

impl HttpContext {
    pub fn new(request: Request, next: Next) -> Self {
        Self {
            method: request.method().as_str().to_string(),
            path: request.uri().path().to_string(),
            pending: Some((request, next)),
            response: None,
        }
    }

    /// The response to send back; a 500 if nothing downstream produced one.
    pub fn into_response(self) -> Response {
        self.response
            .unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

impl Context for HttpContext {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn status(&self) -> u16 {
        self.response
            .as_ref()
            .map(|r| r.status().as_u16())
            .unwrap_or(200)
    }

    fn report_error(&mut self, err: &anyhow::Error) {
        debug!(method = %self.method, path = %self.path, error = %err, "Handler error");
        if self.response.is_none() {
            self.response = Some(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
    }
}

/// Runs the rest of the axum stack for an [`HttpContext`].
pub struct Forward;

#[async_trait]
impl Handler<HttpContext> for Forward {
    async fn call(&self, ctx: &mut HttpContext) -> anyhow::Result<()> {
        let Some((request, next)) = ctx.pending.take() else {
            anyhow::bail!("downstream handler already invoked");
        };

        let response = next.run(request).await;
        let failure = response.extensions().get::<HandlerFailure>().cloned();
        ctx.response = Some(response);

        match failure {
            Some(HandlerFailure(msg)) => Err(anyhow::anyhow!("{msg}")),
            None => Ok(()),
        }
    }
}
