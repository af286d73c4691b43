use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Auth Gate rejected a request.
pub fn auth_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason,
        "Authentication failure"
    );
}

/// Role Gate rejected an authenticated identity.
pub fn admin_denied(email: Option<&str>, reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ADMIN_DENIED",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        reason,
        "Admin role required"
    );
}
