//! Route Policy Domain Model
//!
//! Declarative table mapping page path patterns to gate policies, and the
//! pure decision function the edge auth gate is built on.

/// What the gate does with requests matching a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Not a page; the gate does not apply
    Bypass,
    /// Only reachable without a session (login page)
    GuestOnly,
    /// Reachable with or without a session (register page)
    Open,
    /// Requires a session
    Protected,
}

/// Outcome of evaluating the gate for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectToLanding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
}

/// Path pattern: literal segments, `*` for one segment, trailing `/**` for a subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
    subtree: bool,
}

impl PathPattern {
    /// Parse a pattern such as `/api/**`, `/login` or `/projects/*/board`
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let normalized = normalize_path(pattern);
        let (body, subtree) = match normalized.strip_suffix("/**") {
            Some(prefix) => (prefix, true),
            None => (normalized.as_str(), false),
        };

        let segments = split_segments(body)
            .map(|s| {
                if s == "*" {
                    Segment::Any
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();

        Self { segments, subtree }
    }

    /// Check whether a (normalized) request path matches this pattern
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = split_segments(path).collect();

        if parts.len() < self.segments.len() || (!self.subtree && parts.len() != self.segments.len()) {
            return false;
        }

        self.segments.iter().zip(&parts).all(|(segment, part)| match segment {
            Segment::Any => true,
            Segment::Literal(literal) => literal == part,
        })
    }
}

/// Ordered `pattern -> policy` table; the first match wins
#[derive(Debug, Clone)]
pub struct PolicyTable {
    entries: Vec<(PathPattern, RoutePolicy)>,
    default_policy: RoutePolicy,
    login_path: String,
    landing_path: String,
}

impl PolicyTable {
    /// Create an empty table with the given login and landing paths
    ///
    /// Unmatched paths default to [`RoutePolicy::Protected`].
    #[must_use]
    pub fn new(login_path: &str, landing_path: &str) -> Self {
        Self {
            entries: Vec::new(),
            default_policy: RoutePolicy::Protected,
            login_path: normalize_path(login_path),
            landing_path: normalize_path(landing_path),
        }
    }

    /// Default table for the taskboard front-end
    #[must_use]
    pub fn standard(login_path: &str, register_path: &str, landing_path: &str) -> Self {
        Self::new(login_path, landing_path)
            .with("/api/**", RoutePolicy::Bypass)
            .with("/static/**", RoutePolicy::Bypass)
            .with("/_next/**", RoutePolicy::Bypass)
            .with("/images/**", RoutePolicy::Bypass)
            .with("/favicon.ico", RoutePolicy::Bypass)
            .with("/health", RoutePolicy::Bypass)
            .with(login_path, RoutePolicy::GuestOnly)
            .with(register_path, RoutePolicy::Open)
    }

    /// Append an entry to the table
    #[must_use]
    pub fn with(mut self, pattern: &str, policy: RoutePolicy) -> Self {
        self.entries.push((PathPattern::parse(pattern), policy));
        self
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Resolve the policy for a request path
    #[must_use]
    pub fn policy_for(&self, path: &str) -> RoutePolicy {
        let path = normalize_path(path);
        self.entries
            .iter()
            .find(|(pattern, _)| pattern.matches(&path))
            .map_or(self.default_policy, |(_, policy)| *policy)
    }

    /// Decide what to do with a request, given whether it carries a valid session
    #[must_use]
    pub fn decide(&self, path: &str, has_session: bool) -> GateDecision {
        match (self.policy_for(path), has_session) {
            (RoutePolicy::GuestOnly, true) => GateDecision::RedirectToLanding,
            (RoutePolicy::Protected, false) => GateDecision::RedirectToLogin,
            _ => GateDecision::Allow,
        }
    }
}

/// Ensure a leading slash and strip a trailing one (except on `/`)
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
