use std::time::{Duration, SystemTime, UNIX_EPOCH};

use meal_lounge::auth::IdentityClaim;
use meal_lounge::state::security_config::TOKEN_TTL_SECS;
use meal_lounge::{mint_access_token, verify_access_token, SecurityConfig, TokenError};
use proptest::prelude::*;
use serde_json::{json, Value};

use crate::support::auth::{claim, test_security};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn claim_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z0-9@._ -]{0,24}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// Field names, weighted toward registered JWT claim names a client may post.
fn claim_key() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => "[a-z][a-zA-Z_]{0,10}",
        1 => prop::sample::select(vec!["aud", "sub", "iss", "nbf", "jti"]).prop_map(String::from),
    ]
}

fn identity_claim() -> impl Strategy<Value = IdentityClaim> {
    prop::collection::btree_map(claim_key(), claim_value(), 0..6).prop_map(|fields| {
        fields
            .into_iter()
            .filter(|(key, _)| key != "iat" && key != "exp")
            .collect()
    })
}

fn epoch(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any identity survives a round trip anywhere inside the validity window.
    #[test]
    fn prop_round_trip_inside_window(
        identity in identity_claim(),
        issued_at in 1_500_000_000u64..2_000_000_000,
        elapsed in 0..TOKEN_TTL_SECS,
    ) {
        let security = test_security();
        let token = mint_access_token(&identity, epoch(issued_at), &security).unwrap();

        let claims =
            verify_access_token(&token, epoch(issued_at + elapsed as u64), &security).unwrap();

        prop_assert_eq!(claims.identity, identity);
        prop_assert_eq!(claims.iat, issued_at as i64);
        prop_assert_eq!(claims.exp, issued_at as i64 + TOKEN_TTL_SECS);
    }

    /// Once the window has elapsed the same token is rejected as expired.
    #[test]
    fn prop_rejected_after_window(
        identity in identity_claim(),
        issued_at in 1_500_000_000u64..2_000_000_000,
        overshoot in 0u64..10_000_000,
    ) {
        let security = test_security();
        let token = mint_access_token(&identity, epoch(issued_at), &security).unwrap();

        let later = epoch(issued_at + TOKEN_TTL_SECS as u64 + overshoot);
        prop_assert!(matches!(
            verify_access_token(&token, later, &security),
            Err(TokenError::Expired)
        ));
    }

    /// Changing any single character of a token makes verification fail.
    #[test]
    fn prop_tampered_token_is_rejected(
        identity in identity_claim(),
        position in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let security = test_security();
        let now = SystemTime::now();
        let token = mint_access_token(&identity, now, &security).unwrap();

        let mut bytes = token.into_bytes();
        let candidates: Vec<usize> = (0..bytes.len()).filter(|&i| bytes[i] != b'.').collect();
        let at = candidates[position.index(candidates.len())];

        let choices: Vec<u8> = ALPHABET.iter().copied().filter(|&c| c != bytes[at]).collect();
        bytes[at] = choices[replacement.index(choices.len())];
        let tampered = String::from_utf8(bytes).unwrap();

        prop_assert!(verify_access_token(&tampered, now, &security).is_err());
    }
}

#[test]
fn registered_claim_names_in_the_identity_round_trip() {
    let security = test_security();
    let identity = claim(json!({
        "email": "a@x.com",
        "aud": "web",
        "iss": "someone",
        "sub": 42,
        "nbf": 4_000_000_000u64
    }));
    let token = mint_access_token(&identity, SystemTime::now(), &security).unwrap();

    let claims = verify_access_token(&token, SystemTime::now(), &security).unwrap();

    assert_eq!(claims.identity, identity);
}

#[test]
fn token_signed_with_another_secret_is_rejected() {
    let token = mint_access_token(
        &claim(json!({"email": "a@x.com"})),
        SystemTime::now(),
        &SecurityConfig::new("someone-else".as_bytes()),
    )
    .unwrap();

    assert!(matches!(
        verify_access_token(&token, SystemTime::now(), &test_security()),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn unconfigured_secret_cannot_issue() {
    assert!(matches!(
        mint_access_token(
            &claim(json!({"email": "a@x.com"})),
            SystemTime::now(),
            &SecurityConfig::unconfigured()
        ),
        Err(TokenError::MissingSecret)
    ));
}
