//! Request authorization stages.
//!
//! Each stage maps the request context to either an allowed (possibly
//! enriched) context or a 401 rejection. Extractors in `crate::extractors`
//! bind them to handlers.

use std::time::SystemTime;

use tracing::debug;

use crate::auth::identity::Identity;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::security_config::SecurityConfig;
use crate::store::{filter_eq, DocumentStore};

pub const USERS_COLLECTION: &str = "users";
pub const ADMIN_ROLE: &str = "admin";

/// Auth Gate: require a session token that verifies and has not expired.
///
/// Never touches the document store.
pub fn authenticate(
    cookie_token: Option<&str>,
    security_config: &SecurityConfig,
) -> Result<Identity, AppError> {
    // An empty cookie counts as no cookie.
    let Some(token) = cookie_token.filter(|t| !t.is_empty()) else {
        security::auth_rejected("missing_cookie");
        return Err(AppError::unauthorized_user());
    };

    verify_access_token(token, SystemTime::now(), security_config)
        .map(Identity::from)
        .map_err(|e| {
            security::auth_rejected(&e.to_string());
            AppError::unauthorized_access()
        })
}

/// Role Gate: the identity's user record must carry `role == "admin"`.
///
/// One store read per call; roles are never cached across requests.
pub async fn require_admin(identity: &Identity, store: &dyn DocumentStore) -> Result<(), AppError> {
    let Some(email) = identity.email() else {
        security::admin_denied(None, "identity_without_email");
        return Err(AppError::insufficient_role());
    };

    let record = store
        .find_one(USERS_COLLECTION, filter_eq("email", email))
        .await?;

    let role = record
        .as_ref()
        .and_then(|user| user.get("role"))
        .and_then(|role| role.as_str());

    match (record.is_some(), role) {
        (_, Some(ADMIN_ROLE)) => {
            debug!("admin role confirmed");
            Ok(())
        }
        (false, _) => {
            security::admin_denied(Some(email), "user_not_found");
            Err(AppError::insufficient_role())
        }
        (true, _) => {
            security::admin_denied(Some(email), "not_admin");
            Err(AppError::insufficient_role())
        }
    }
}
