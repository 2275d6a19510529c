//! Evaluate Gate Use Case
//!
//! Decides whether a page request passes the edge auth gate, and where to
//! redirect it if not.

use url::form_urlencoded;

use crate::domain::models::route_policy::{GateDecision, PolicyTable};

/// Result of evaluating the gate: either pass through or redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Allow,
    Redirect(String),
}

/// Use case for evaluating the edge auth gate
pub struct EvaluateGateUseCase {
    policies: PolicyTable,
    callback_param: String,
}

impl EvaluateGateUseCase {
    /// Create a new EvaluateGateUseCase
    #[must_use]
    pub fn new(policies: PolicyTable, callback_param: impl Into<String>) -> Self {
        Self {
            policies,
            callback_param: callback_param.into(),
        }
    }

    /// Execute the use case
    ///
    /// `query` is the raw query string of the inbound request, if any. When
    /// redirecting to login, the original path and query are passed along as
    /// the callback parameter.
    #[must_use]
    pub fn execute(&self, path: &str, query: Option<&str>, has_session: bool) -> GateOutcome {
        match self.policies.decide(path, has_session) {
            GateDecision::Allow => GateOutcome::Allow,
            GateDecision::RedirectToLanding => {
                tracing::debug!(path, "Authenticated user sent to landing page");
                GateOutcome::Redirect(self.policies.landing_path().to_string())
            }
            GateDecision::RedirectToLogin => {
                tracing::debug!(path, "Unauthenticated request sent to login");
                GateOutcome::Redirect(self.login_location(path, query))
            }
        }
    }

    fn login_location(&self, path: &str, query: Option<&str>) -> String {
        let login = self.policies.login_path();
        if self.callback_param.is_empty() {
            return login.to_string();
        }

        let callback = match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("{path}?{q}"),
            None => path.to_string(),
        };
        let encoded: String = form_urlencoded::Serializer::new(String::new())
            .append_pair(&self.callback_param, &callback)
            .finish();
        format!("{login}?{encoded}")
    }
}
