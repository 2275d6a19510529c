//! Session Domain Model
//!
//! The identity and upstream credential carried by a provider-issued
//! session token. The gateway only reads sessions; it never issues them.

/// Newtype wrapper for the upstream access credential
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// A verified user session
#[derive(Debug, Clone)]
pub struct Session {
    user_id: String,
    name: Option<String>,
    email: Option<String>,
    access_token: AccessToken,
}

impl Session {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: Option<String>,
        email: Option<String>,
        access_token: AccessToken,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name,
            email,
            access_token,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}
