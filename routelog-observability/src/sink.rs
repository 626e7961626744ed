use std::fs::File;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Destination for formatted access lines.
///
/// Each call carries exactly one complete line. Implementations are shared
/// by every in-flight request; the logger does not serialize calls.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &[u8]) -> io::Result<()>;
}

impl LogSink for io::Stderr {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        self.lock().write_all(line)
    }
}

impl LogSink for io::Stdout {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        self.lock().write_all(line)
    }
}

impl LogSink for File {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut file: &File = self;
        file.write_all(line)
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// In-memory sink; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Written lines, without their trailing newline.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().map(|b| b.is_empty()).unwrap_or(true)
    }

    pub fn clear(&self) {
        if let Ok(mut buf) = self.inner.lock() {
            buf.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut buf = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory sink lock poisoned"))?;
        buf.extend_from_slice(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn memory_sink_clones_share_contents() {
        let sink = MemorySink::new();
        let other = sink.clone();
        assert!(sink.is_empty());
        other.write_line(b"200 method=GET\n").unwrap();
        other.write_line(b"404 method=POST\n").unwrap();
        assert_eq!(sink.lines(), vec!["200 method=GET", "404 method=POST"]);
        sink.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn arc_dyn_sink_forwards() {
        let sink = MemorySink::new();
        let shared: Arc<dyn LogSink> = Arc::new(sink.clone());
        shared.write_line(b"line\n").unwrap();
        assert_eq!(sink.contents(), "line\n");
    }

    #[test]
    fn file_sink_appends_lines() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        let file = tmp.reopen().unwrap();
        file.write_line(b"first\n").unwrap();
        file.write_line(b"second\n").unwrap();
        let mut out = String::new();
        tmp.read_to_string(&mut out).unwrap();
        assert_eq!(out, "first\nsecond\n");
    }
}
