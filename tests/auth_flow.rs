use axum::http::StatusCode;
use chrono::Duration;

use recipebook::auth::{authorize, AuthUser, Claims, JwtKeys, Role};
use recipebook::ApiError;

#[test]
fn token_lifecycle_carries_identity_and_role() {
    let keys = JwtKeys::new(b"integration-secret");

    let claims = Claims::new(17, false, Duration::hours(24));
    assert!(claims.exp > claims.iat);

    let token = keys.issue(&claims).unwrap();
    let decoded = keys.verify(&token).unwrap();
    assert_eq!(decoded.sub, "17");
    assert!(!decoded.admin);

    let caller = AuthUser {
        profile_id: decoded.sub.parse().unwrap(),
        is_admin: decoded.admin,
    };

    // Own comment: allowed. Someone else's: forbidden. Admin routes: forbidden.
    assert!(authorize(&caller, Some(17), Role::User).is_ok());
    let forbidden = authorize(&caller, Some(18), Role::User).unwrap_err();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    let forbidden = authorize(&caller, None, Role::Admin).unwrap_err();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

#[test]
fn admin_token_opens_admin_routes() {
    let keys = JwtKeys::new(b"integration-secret");
    let token = keys
        .issue(&Claims::new(1, true, Duration::hours(1)))
        .unwrap();
    let decoded = keys.verify(&token).unwrap();

    let caller = AuthUser {
        profile_id: decoded.sub.parse().unwrap(),
        is_admin: decoded.admin,
    };
    assert!(authorize(&caller, None, Role::Admin).is_ok());
    assert!(authorize(&caller, Some(999), Role::User).is_ok());
}

#[test]
fn tampered_token_is_unauthenticated() {
    let keys = JwtKeys::new(b"integration-secret");
    let token = keys
        .issue(&Claims::new(5, false, Duration::hours(1)))
        .unwrap();

    let mut tampered = token.clone();
    tampered.push('x');
    let err = keys.verify(&tampered).unwrap_err();
    assert!(matches!(err, ApiError::Unauthenticated(_)));
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}
