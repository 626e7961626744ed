use thiserror::Error;

/// Unified error type for routelog setup paths.
///
/// Nothing on the per-request path produces one of these: handler failures
/// travel as `anyhow::Error` and sink failures are dropped.
#[derive(Error, Debug)]
pub enum RouteLogError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for RouteLogError {
    fn from(err: figment::Error) -> Self {
        RouteLogError::Config(err.to_string())
    }
}
