use std::time::{Duration, SystemTime};

use actix_web::cookie::Cookie;
use meal_lounge::auth::IdentityClaim;
use meal_lounge::state::security_config::TOKEN_TTL_SECS;
use meal_lounge::{mint_access_token, SecurityConfig, TOKEN_COOKIE};
use serde_json::Value;

pub const TEST_SECRET: &str = "meal-lounge-test-secret";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

pub fn claim(value: Value) -> IdentityClaim {
    value.as_object().cloned().expect("identity claim must be an object")
}

/// Token for `identity`, issued now with the test secret.
pub fn token_for(identity: Value) -> String {
    mint_access_token(&claim(identity), SystemTime::now(), &test_security()).expect("mint token")
}

/// Token whose validity window closed a day ago.
pub fn expired_token_for(identity: Value) -> String {
    let issued = SystemTime::now() - Duration::from_secs((TOKEN_TTL_SECS + 86_400) as u64);
    mint_access_token(&claim(identity), issued, &test_security()).expect("mint token")
}

pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::new(TOKEN_COOKIE, token.to_string())
}

/// Session cookie for `{email}` signed with the test secret.
pub fn cookie_for(email: &str) -> Cookie<'static> {
    session_cookie(&token_for(serde_json::json!({ "email": email })))
}
