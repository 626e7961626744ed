use crate::sink::LogSink;
use routelog_core::config::{LogFormat, LoggerConfig, OutputTarget};
use routelog_core::context::Context;
use routelog_core::error::RouteLogError;
use routelog_core::handler::{self, Skipper};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Arc;
use tracing::info;

/// Caller-facing settings for a [`RequestLogger`](crate::RequestLogger).
///
/// Defaults: skip nothing, write to stderr, text format.
#[derive(Clone)]
pub struct LoggerOptions {
    pub(crate) skipper: Skipper,
    pub(crate) output: Arc<dyn LogSink>,
    pub(crate) format: LogFormat,
}

/// A single override applied on top of [`LoggerOptions`].
#[derive(Clone)]
pub enum LoggerOption {
    Skipper(Skipper),
    Output(Arc<dyn LogSink>),
    Format(LogFormat),
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            skipper: handler::default_skipper(),
            output: Arc::new(io::stderr()),
            format: LogFormat::Text,
        }
    }
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skipper<F>(mut self, skipper: F) -> Self
    where
        F: Fn(&dyn Context) -> bool + Send + Sync + 'static,
    {
        self.skipper = Arc::new(skipper);
        self
    }

    pub fn output<S: LogSink + 'static>(mut self, output: S) -> Self {
        self.output = Arc::new(output);
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn get_format(&self) -> LogFormat {
        self.format
    }

    /// Apply one override; later calls win.
    pub fn apply(&mut self, option: LoggerOption) {
        match option {
            LoggerOption::Skipper(skipper) => self.skipper = skipper,
            LoggerOption::Output(output) => self.output = output,
            LoggerOption::Format(format) => self.format = format,
        }
    }

    /// Build options from file/env configuration, opening the output target.
    pub fn from_config(config: &LoggerConfig) -> Result<Self, RouteLogError> {
        let output: Arc<dyn LogSink> = match &config.output {
            OutputTarget::Stderr => Arc::new(io::stderr()),
            OutputTarget::Stdout => Arc::new(io::stdout()),
            OutputTarget::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                info!(path = %path.display(), "Access log file opened");
                Arc::new(file)
            }
        };

        Ok(Self {
            skipper: handler::skip_paths(config.skip_paths.iter().cloned()),
            output,
            format: config.format,
        })
    }
}

/// Overlay `overrides` onto `defaults` in order.
pub fn resolve<I>(defaults: LoggerOptions, overrides: I) -> LoggerOptions
where
    I: IntoIterator<Item = LoggerOption>,
{
    overrides.into_iter().fold(defaults, |mut opts, option| {
        opts.apply(option);
        opts
    })
}
