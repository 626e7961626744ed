pub mod access_log;
pub mod buffer_pool;
pub mod format;
pub mod logger;
pub mod options;
pub mod severity;
pub mod sink;
pub mod terminal;

pub use logger::RequestLogger;
pub use options::{LoggerOption, LoggerOptions, resolve};
pub use sink::{LogSink, MemorySink};
