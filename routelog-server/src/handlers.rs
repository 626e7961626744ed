use crate::context::AppError;
use axum::http::StatusCode;

pub async fn ok() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

pub async fn cont() -> (StatusCode, &'static str) {
    (StatusCode::CONTINUE, "continue")
}

pub async fn warn() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

pub async fn err() -> Result<&'static str, AppError> {
    Err(anyhow::anyhow!("something went wrong").into())
}
