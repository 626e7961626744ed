/// Read/write view of one in-flight request, supplied by the routing engine.
///
/// The logger only reads the method, path and final status, and forwards
/// handler errors through [`Context::report_error`].
pub trait Context: Send {
    fn method(&self) -> &str;

    fn path(&self) -> &str;

    /// Response status as it stands right now.
    fn status(&self) -> u16;

    /// Record an error against the request without altering control flow.
    fn report_error(&mut self, err: &anyhow::Error);
}

/// Minimal in-process context.
///
/// Behaves like a router with a default error handler: a reported error
/// commits a 500 unless a status was already written.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: String,
    path: String,
    status: u16,
    committed: bool,
    errors: Vec<String>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        // Strip the query string, the logger only sees the path.
        let path = match path.find('?') {
            Some(pos) => path[..pos].to_string(),
            None => path,
        };

        Self {
            method: method.into(),
            path,
            status: 200,
            committed: false,
            errors: Vec::new(),
        }
    }

    /// Commit a response status.
    pub fn respond(&mut self, status: u16) {
        self.status = status;
        self.committed = true;
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Errors reported so far, oldest first.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl Context for RequestContext {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn report_error(&mut self, err: &anyhow::Error) {
        self.errors.push(err.to_string());
        if !self.committed {
            self.respond(500);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_defaults_to_200_uncommitted() {
        let ctx = RequestContext::new("GET", "/ok");
        assert_eq!(ctx.method(), "GET");
        assert_eq!(ctx.path(), "/ok");
        assert_eq!(ctx.status(), 200);
        assert!(!ctx.is_committed());
        assert!(ctx.errors().is_empty());
    }

    #[test]
    fn query_string_is_not_part_of_path() {
        let ctx = RequestContext::new("GET", "/api/users?page=1");
        assert_eq!(ctx.path(), "/api/users");
    }

    #[test]
    fn report_error_commits_500_when_nothing_written() {
        let mut ctx = RequestContext::new("DELETE", "/err");
        ctx.report_error(&anyhow::anyhow!("something went wrong"));
        assert_eq!(ctx.status(), 500);
        assert_eq!(ctx.errors(), ["something went wrong".to_string()]);
    }

    #[test]
    fn report_error_keeps_committed_status() {
        let mut ctx = RequestContext::new("POST", "/");
        ctx.respond(404);
        ctx.report_error(&anyhow::anyhow!("missing"));
        assert_eq!(ctx.status(), 404);
        assert_eq!(ctx.errors().len(), 1);
    }
}
