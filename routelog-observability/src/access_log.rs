use serde::Serialize;

/// Structured access log entry, as written in JSON mode.
///
/// Field order is the order on the wire.
#[derive(Debug, Serialize)]
pub struct AccessLogEntry<'a> {
    pub status: u16,
    pub method: &'a str,
    pub path: &'a str,
    pub latency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}
