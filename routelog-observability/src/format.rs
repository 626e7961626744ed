//! Access line encoders.
//!
//! Both encoders append to a caller-owned buffer so a whole line can be
//! handed to the sink in a single write.

use crate::access_log::AccessLogEntry;
use std::io::Write;
use std::time::Duration;

const ESC: &[u8] = b"\x1b[";
const RESET: &[u8] = b"\x1b[0m";

/// Everything a formatter needs for one request.
#[derive(Debug, Clone, Copy)]
pub struct LogLine<'a> {
    pub status: u16,
    pub method: &'a str,
    pub path: &'a str,
    pub latency: &'a str,
    pub color: u8,
    pub error: Option<&'a str>,
}

/// Human-readable latency, e.g. `1.2ms`, `350ns`, `2.5s`, `1m15s`.
///
/// Below one second a single unit is used (`ns`, `µs`, `ms`); from one
/// second on, hour and minute segments lead once they are non-zero. Zero
/// renders as `0s`.
pub fn format_latency(latency: Duration) -> String {
    let nanos = latency.as_nanos();
    let mut out = String::with_capacity(16);

    if nanos == 0 {
        out.push_str("0s");
    } else if nanos < 1_000 {
        push_decimal(&mut out, nanos, 0, 0);
        out.push_str("ns");
    } else if nanos < 1_000_000 {
        push_decimal(&mut out, nanos / 1_000, nanos % 1_000, 3);
        out.push_str("µs");
    } else if nanos < 1_000_000_000 {
        push_decimal(&mut out, nanos / 1_000_000, nanos % 1_000_000, 6);
        out.push_str("ms");
    } else {
        let secs = latency.as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        if hours > 0 {
            push_decimal(&mut out, u128::from(hours), 0, 0);
            out.push('h');
        }
        if hours > 0 || minutes > 0 {
            push_decimal(&mut out, u128::from(minutes), 0, 0);
            out.push('m');
        }
        push_decimal(
            &mut out,
            u128::from(secs % 60),
            u128::from(latency.subsec_nanos()),
            9,
        );
        out.push('s');
    }
    out
}

/// `whole[.frac]`, with `frac` zero-padded to `width` digits and trailing
/// zeros trimmed.
fn push_decimal(out: &mut String, whole: u128, frac: u128, width: usize) {
    let mut n = itoa::Buffer::new();
    out.push_str(n.format(whole));
    if frac > 0 {
        let digits = format!("{frac:0width$}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}

/// Text encoding, newline-terminated.
///
/// With `terminal` set the status (and error, if any) are wrapped in ANSI
/// color codes. The plain variant writes the error text once bare and once
/// again as `err=<text>`, and always leaves a space after the latency.
pub fn encode_text(buf: &mut Vec<u8>, line: &LogLine<'_>, terminal: bool) {
    let mut status = itoa::Buffer::new();
    let status = status.format(line.status).as_bytes();
    let mut color = itoa::Buffer::new();
    let color = color.format(line.color).as_bytes();

    if terminal {
        buf.extend_from_slice(ESC);
        buf.extend_from_slice(color);
        buf.push(b'm');
        buf.extend_from_slice(status);
        buf.extend_from_slice(RESET);
        push_fields(buf, line);
        if let Some(err) = line.error.filter(|e| !e.is_empty()) {
            buf.push(b' ');
            buf.extend_from_slice(ESC);
            buf.extend_from_slice(color);
            buf.extend_from_slice(b"merr=");
            buf.extend_from_slice(err.as_bytes());
            buf.extend_from_slice(RESET);
        }
    } else {
        let err = line.error.unwrap_or_default();
        buf.extend_from_slice(status);
        push_fields(buf, line);
        buf.push(b' ');
        buf.extend_from_slice(err.as_bytes());
        if !err.is_empty() {
            buf.extend_from_slice(b" err=");
            buf.extend_from_slice(err.as_bytes());
        }
    }
    buf.push(b'\n');
}

/// JSON encoding: one object followed by a newline. `error` is omitted
/// when there is none.
pub fn encode_json(buf: &mut Vec<u8>, line: &LogLine<'_>) -> serde_json::Result<()> {
    let entry = AccessLogEntry {
        status: line.status,
        method: line.method,
        path: line.path,
        latency: line.latency,
        error: line.error.filter(|e| !e.is_empty()),
    };
    serde_json::to_writer(&mut *buf, &entry)?;
    buf.push(b'\n');
    Ok(())
}

fn push_fields(buf: &mut Vec<u8>, line: &LogLine<'_>) {
    // Writing into a Vec cannot fail.
    let _ = write!(
        buf,
        " method={} path={} latency={}",
        line.method, line.path, line.latency
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::{COLOR_BLUE, COLOR_RED};

    fn line(status: u16, error: Option<&'static str>) -> LogLine<'static> {
        LogLine {
            status,
            method: "GET",
            path: "/ok",
            latency: "1.2ms",
            color: if status >= 500 { COLOR_RED } else { COLOR_BLUE },
            error,
        }
    }

    fn text(line: &LogLine<'_>, terminal: bool) -> String {
        let mut buf = Vec::new();
        encode_text(&mut buf, line, terminal);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_text_without_error_has_trailing_space() {
        assert_eq!(
            text(&line(200, None), false),
            "200 method=GET path=/ok latency=1.2ms \n"
        );
    }

    #[test]
    fn plain_text_with_error_repeats_error() {
        assert_eq!(
            text(&line(500, Some("boom")), false),
            "500 method=GET path=/ok latency=1.2ms boom err=boom\n"
        );
    }

    #[test]
    fn terminal_text_wraps_status_in_color() {
        assert_eq!(
            text(&line(200, None), true),
            "\x1b[36m200\x1b[0m method=GET path=/ok latency=1.2ms\n"
        );
    }

    #[test]
    fn terminal_text_with_error_appends_colored_err() {
        assert_eq!(
            text(&line(500, Some("boom")), true),
            "\x1b[31m500\x1b[0m method=GET path=/ok latency=1.2ms \x1b[31merr=boom\x1b[0m\n"
        );
    }

    #[test]
    fn json_omits_missing_error() {
        let mut buf = Vec::new();
        encode_json(&mut buf, &line(200, None)).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"status\":200,\"method\":\"GET\",\"path\":\"/ok\",\"latency\":\"1.2ms\"}\n"
        );
    }

    #[test]
    fn json_includes_error_and_escapes() {
        let mut buf = Vec::new();
        encode_json(&mut buf, &line(500, Some("bad \"quote\""))).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status"], 500);
        assert_eq!(value["error"], "bad \"quote\"");
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn encoders_append_to_existing_contents() {
        let mut buf = b"prefix|".to_vec();
        encode_text(&mut buf, &line(200, None), false);
        assert!(buf.starts_with(b"prefix|200 method=GET"));
    }

    #[test]
    fn format_latency_is_human_readable() {
        assert_eq!(format_latency(Duration::from_micros(1200)), "1.2ms");
        assert_eq!(format_latency(Duration::from_nanos(350)), "350ns");
        assert_eq!(format_latency(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_latency(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(format_latency(Duration::from_millis(1)), "1ms");
    }

    #[test]
    fn format_latency_zero_is_0s() {
        assert_eq!(format_latency(Duration::ZERO), "0s");
    }

    #[test]
    fn format_latency_uses_minute_and_hour_segments() {
        assert_eq!(format_latency(Duration::from_secs(75)), "1m15s");
        assert_eq!(format_latency(Duration::from_secs(60)), "1m0s");
        assert_eq!(format_latency(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_latency(Duration::from_millis(3_723_500)), "1h2m3.5s");
    }
}
