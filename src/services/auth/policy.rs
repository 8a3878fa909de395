/*
 * Responsibility
 * - path-based decision: does this request need credentials at all?
 * - pure function over an exempt-path set loaded once at startup
 */

/// Immutable set of path patterns exempt from authentication.
#[derive(Clone, Debug, Default)]
pub struct AccessPolicy {
    exempt: Vec<String>,
}

impl AccessPolicy {
    pub fn new(exempt: Vec<String>) -> Self {
        Self { exempt }
    }

    /// Whether a request path requires authentication.
    ///
    /// A missing/empty path always requires auth (fail secure). A path
    /// matches a pattern exactly, or with a trailing slash appended —
    /// `/api/v1/status` and `/api/v1/status/` are the same route.
    pub fn requires_auth(&self, path: Option<&str>) -> bool {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            return true;
        };

        if self.exempt.is_empty() {
            return false;
        }

        let exempt = |candidate: &str| self.exempt.iter().any(|p| p == candidate);

        if exempt(path) {
            return false;
        }
        if !path.ends_with('/') && exempt(&format!("{path}/")) {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(patterns: &[&str]) -> AccessPolicy {
        AccessPolicy::new(patterns.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn exact_match_is_exempt() {
        let p = policy(&["/api/v1/status/"]);
        assert!(!p.requires_auth(Some("/api/v1/status/")));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let p = policy(&["/api/v1/status/"]);
        assert!(!p.requires_auth(Some("/api/v1/status")));
    }

    #[test]
    fn unlisted_path_requires_auth() {
        let p = policy(&["/api/v1/status/"]);
        assert!(p.requires_auth(Some("/api/v1/profile")));
    }

    #[test]
    fn missing_path_fails_secure() {
        let p = policy(&["/api/v1/status/"]);
        assert!(p.requires_auth(None));
        assert!(p.requires_auth(Some("")));
    }

    #[test]
    fn empty_exempt_set_requires_nothing() {
        let p = policy(&[]);
        assert!(!p.requires_auth(Some("/api/v1/profile")));
    }
}
