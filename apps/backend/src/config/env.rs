use std::env;

use actix_web::cookie::SameSite;

/// Deployment environment, selected by `NODE_ENV`.
///
/// Production serves a cross-origin frontend over TLS, so session cookies
/// must be `Secure` with `SameSite=None`. Anything else is treated as local
/// development: same-origin, plain HTTP, `SameSite=Strict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
    Production,
    #[default]
    Development,
}

impl RuntimeEnv {
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn from_env() -> Self {
        Self::from_node_env(env::var("NODE_ENV").ok().as_deref())
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// `Secure` attribute for the session cookie.
    pub fn cookie_secure(self) -> bool {
        self.is_production()
    }

    /// `SameSite` attribute for the session cookie.
    pub fn cookie_same_site(self) -> SameSite {
        match self {
            Self::Production => SameSite::None,
            Self::Development => SameSite::Strict,
        }
    }
}
