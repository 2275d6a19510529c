//! Proxy Route Domain Model
//!
//! Static table mapping inbound API paths 1:1 onto upstream paths.

/// HTTP verbs the gateway forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Parse an uppercase method name
    #[must_use]
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(Self::Get),
            "HEAD" => Some(Self::Head),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which configured upstream origin a call goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamBase {
    /// `BASE_URL`: auth and user endpoints
    V1,
    /// `BASE_V2_URL`: project-tracking endpoints
    V2,
    /// The UI renderer serving pages
    Frontend,
}

/// One inbound API path and the upstream path it forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyRoute {
    pub inbound: &'static str,
    pub base: UpstreamBase,
    pub upstream: &'static str,
    pub verbs: &'static [HttpVerb],
    pub requires_auth: bool,
    pub forward_client_ip: bool,
}

impl ProxyRoute {
    const fn v1(inbound: &'static str, upstream: &'static str, verbs: &'static [HttpVerb]) -> Self {
        Self {
            inbound,
            base: UpstreamBase::V1,
            upstream,
            verbs,
            requires_auth: true,
            forward_client_ip: false,
        }
    }

    const fn v2(inbound: &'static str, upstream: &'static str, verbs: &'static [HttpVerb]) -> Self {
        Self {
            base: UpstreamBase::V2,
            ..Self::v1(inbound, upstream, verbs)
        }
    }

    /// Forward without a bearer credential
    const fn public(self) -> Self {
        Self {
            requires_auth: false,
            ..self
        }
    }

    /// Forward the caller's IP upstream
    const fn with_client_ip(self) -> Self {
        Self {
            forward_client_ip: true,
            ..self
        }
    }

    /// Whether this route accepts the given verb
    #[must_use]
    pub fn allows(&self, verb: HttpVerb) -> bool {
        self.verbs.contains(&verb)
    }

    /// Map a concrete inbound path onto the upstream path
    ///
    /// `:name` segments of the inbound template are captured and substituted
    /// into the upstream template. Returns `None` if the path does not fit
    /// the inbound template.
    #[must_use]
    pub fn upstream_path(&self, inbound_path: &str) -> Option<String> {
        let template: Vec<&str> = segments(self.inbound).collect();
        let actual: Vec<&str> = segments(inbound_path).collect();
        if template.len() != actual.len() {
            return None;
        }

        let mut params = Vec::new();
        for (t, a) in template.iter().zip(&actual) {
            match t.strip_prefix(':') {
                Some(name) => params.push((name, *a)),
                None if t == a => {}
                None => return None,
            }
        }

        let mut path = String::new();
        for segment in segments(self.upstream) {
            path.push('/');
            match segment.strip_prefix(':') {
                Some(name) => {
                    let (_, value) = params.iter().find(|(n, _)| *n == name)?;
                    path.push_str(value);
                }
                None => path.push_str(segment),
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

const GET: &[HttpVerb] = &[HttpVerb::Get];
const POST: &[HttpVerb] = &[HttpVerb::Post];
const PUT: &[HttpVerb] = &[HttpVerb::Put];
const GET_POST: &[HttpVerb] = &[HttpVerb::Get, HttpVerb::Post];
const GET_PUT: &[HttpVerb] = &[HttpVerb::Get, HttpVerb::Put];
const GET_PUT_DELETE: &[HttpVerb] = &[HttpVerb::Get, HttpVerb::Put, HttpVerb::Delete];
const GET_PUT_PATCH_DELETE: &[HttpVerb] = &[HttpVerb::Get, HttpVerb::Put, HttpVerb::Patch, HttpVerb::Delete];

/// Every API route the gateway exposes
pub static PROXY_ROUTES: &[ProxyRoute] = &[
    // Authentication
    ProxyRoute::v1("/api/auth/login", "/auth/login", POST).public().with_client_ip(),
    ProxyRoute::v1("/api/auth/register", "/auth/register", POST).public().with_client_ip(),
    ProxyRoute::v1("/api/auth/forgot-password", "/auth/forgot-password", POST).public().with_client_ip(),
    ProxyRoute::v1("/api/auth/reset-password", "/auth/reset-password", POST).public(),
    ProxyRoute::v1("/api/auth/logout", "/auth/logout", POST),
    // Users
    ProxyRoute::v1("/api/users", "/users", GET),
    ProxyRoute::v1("/api/users/me", "/users/me", GET_PUT),
    ProxyRoute::v1("/api/users/:id", "/users/:id", GET),
    // Dashboard
    ProxyRoute::v2("/api/v2/dashboard", "/dashboard", GET),
    // Projects and boards
    ProxyRoute::v2("/api/v2/projects", "/projects", GET_POST),
    ProxyRoute::v2("/api/v2/projects/:id", "/projects/:id", GET_PUT_DELETE),
    ProxyRoute::v2("/api/v2/projects/:id/board", "/projects/:id/board", GET),
    ProxyRoute::v2("/api/v2/projects/:id/backlog", "/projects/:id/backlog", GET),
    ProxyRoute::v2("/api/v2/projects/:id/members", "/projects/:id/members", GET_POST),
    ProxyRoute::v2("/api/v2/projects/:id/sprints", "/projects/:id/sprints", GET_POST),
    // Sprints
    ProxyRoute::v2("/api/v2/sprints/:id", "/sprints/:id", GET_PUT),
    ProxyRoute::v2("/api/v2/sprints/:id/start", "/sprints/:id/start", POST),
    ProxyRoute::v2("/api/v2/sprints/:id/complete", "/sprints/:id/complete", POST),
    // Tasks
    ProxyRoute::v2("/api/v2/tasks", "/tasks", GET_POST),
    ProxyRoute::v2("/api/v2/tasks/:id", "/tasks/:id", GET_PUT_PATCH_DELETE),
    ProxyRoute::v2("/api/v2/tasks/:id/status", "/tasks/:id/status", PUT),
    ProxyRoute::v2("/api/v2/tasks/:id/comments", "/tasks/:id/comments", GET_POST),
    // Teams and companies
    ProxyRoute::v2("/api/v2/teams", "/teams", GET_POST),
    ProxyRoute::v2("/api/v2/teams/:id", "/teams/:id", GET_PUT),
    ProxyRoute::v2("/api/v2/teams/:id/members", "/teams/:id/members", GET_POST),
    ProxyRoute::v2("/api/v2/companies", "/companies", GET_POST),
    ProxyRoute::v2("/api/v2/companies/:id", "/companies/:id", GET_PUT),
    // Approval workflows
    ProxyRoute::v2("/api/v2/leaves", "/leaves", GET_POST),
    ProxyRoute::v2("/api/v2/leaves/:id", "/leaves/:id", GET_PUT),
    ProxyRoute::v2("/api/v2/leaves/:id/approve", "/leaves/:id/approve", POST),
    ProxyRoute::v2("/api/v2/leaves/:id/reject", "/leaves/:id/reject", POST),
    ProxyRoute::v2("/api/v2/overtimes", "/overtimes", GET_POST),
    ProxyRoute::v2("/api/v2/overtimes/:id", "/overtimes/:id", GET_PUT),
    ProxyRoute::v2("/api/v2/overtimes/:id/approve", "/overtimes/:id/approve", POST),
    ProxyRoute::v2("/api/v2/overtimes/:id/reject", "/overtimes/:id/reject", POST),
    ProxyRoute::v2("/api/v2/spendings", "/spendings", GET_POST),
    ProxyRoute::v2("/api/v2/spendings/:id", "/spendings/:id", GET_PUT),
    ProxyRoute::v2("/api/v2/spendings/:id/approve", "/spendings/:id/approve", POST),
    ProxyRoute::v2("/api/v2/spendings/:id/reject", "/spendings/:id/reject", POST),
    ProxyRoute::v2("/api/v2/approvals/pending", "/approvals/pending", GET),
    // Notifications and invitations
    ProxyRoute::v2("/api/v2/notifications", "/notifications", GET_PUT),
    ProxyRoute::v2("/api/v2/notifications/:id/read", "/notifications/:id/read", PUT),
    ProxyRoute::v2("/api/v2/invitations", "/invitations", GET_POST),
    ProxyRoute::v2("/api/v2/invitations/:token", "/invitations/:token", GET).public(),
    ProxyRoute::v2("/api/v2/invitations/:token/accept", "/invitations/:token/accept", POST).with_client_ip(),
    ProxyRoute::v2("/api/v2/invitations/:token/decline", "/invitations/:token/decline", POST),
];
