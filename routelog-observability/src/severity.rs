//! Status-derived severity buckets and their terminal colors.

/// ANSI foreground codes.
pub const COLOR_RED: u8 = 31;
pub const COLOR_YELLOW: u8 = 33;
pub const COLOR_BLUE: u8 = 36;
pub const COLOR_GRAY: u8 = 37;

/// Coarse request outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// 1xx (and anything below 200)
    Informational,
    /// 2xx
    Success,
    /// 3xx and 4xx
    ClientOrRedirect,
    /// 5xx
    ServerError,
}

impl Severity {
    pub fn color(&self) -> u8 {
        match self {
            Severity::Informational => COLOR_GRAY,
            Severity::Success => COLOR_BLUE,
            Severity::ClientOrRedirect => COLOR_YELLOW,
            Severity::ServerError => COLOR_RED,
        }
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub color: u8,
    /// Handler error text; only ever set for 5xx.
    pub error: Option<String>,
}

/// Map a final status (and the handler's error, if any) to a severity.
///
/// The error is only carried into the log line when the status is already
/// 5xx. An error next to a 2xx/3xx/4xx status leaves the line untouched.
pub fn classify(status: u16, error: Option<&anyhow::Error>) -> Classification {
    let (severity, error) = match error {
        Some(err) if status >= 500 => (Severity::ServerError, Some(err.to_string())),
        _ => {
            let severity = if (200..300).contains(&status) {
                Severity::Success
            } else if status >= 500 {
                Severity::ServerError
            } else if (300..500).contains(&status) {
                Severity::ClientOrRedirect
            } else {
                Severity::Informational
            };
            (severity, None)
        }
    };

    Classification {
        severity,
        color: severity.color(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boom() -> anyhow::Error {
        anyhow::anyhow!("boom")
    }

    #[test]
    fn informational_is_gray_even_with_error() {
        for status in [100, 101, 150, 199] {
            let c = classify(status, Some(&boom()));
            assert_eq!(c.severity, Severity::Informational);
            assert_eq!(c.color, COLOR_GRAY);
            assert!(c.error.is_none());
        }
    }

    #[test]
    fn success_is_blue() {
        for status in [200, 201, 204, 299] {
            let c = classify(status, None);
            assert_eq!(c.severity, Severity::Success);
            assert_eq!(c.color, COLOR_BLUE);
            assert!(c.error.is_none());
        }
    }

    #[test]
    fn success_with_error_hides_error() {
        let c = classify(200, Some(&boom()));
        assert_eq!(c.color, COLOR_BLUE);
        assert!(c.error.is_none());
    }

    #[test]
    fn redirect_and_client_errors_are_yellow_without_error_text() {
        for status in [300, 301, 400, 404, 499] {
            let c = classify(status, Some(&boom()));
            assert_eq!(c.severity, Severity::ClientOrRedirect);
            assert_eq!(c.color, COLOR_YELLOW);
            assert!(c.error.is_none());
        }
    }

    #[test]
    fn server_error_with_error_carries_message() {
        let err = anyhow::anyhow!("something went wrong");
        let c = classify(500, Some(&err));
        assert_eq!(c.severity, Severity::ServerError);
        assert_eq!(c.color, COLOR_RED);
        assert_eq!(c.error.as_deref(), Some("something went wrong"));
    }

    #[test]
    fn server_error_without_error_is_red_and_empty() {
        for status in [500, 502, 503, 599] {
            let c = classify(status, None);
            assert_eq!(c.severity, Severity::ServerError);
            assert_eq!(c.color, COLOR_RED);
            assert!(c.error.is_none());
        }
    }

    #[test]
    fn below_100_falls_into_informational() {
        let c = classify(0, None);
        assert_eq!(c.severity, Severity::Informational);
    }
}
