pub mod config;
pub mod context;
pub mod error;
pub mod handler;

pub use config::{LogFormat, LoggerConfig, OutputTarget, RouteLogConfig};
pub use context::{Context, RequestContext};
pub use error::RouteLogError;
pub use handler::{Handler, Middleware, Skipper};
