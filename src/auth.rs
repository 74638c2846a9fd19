//! Bearer-token authentication and the authorization predicate.
//!
//! The acting profile is resolved exactly once per request by the [`AuthUser`]
//! extractor; every ownership/role decision afterwards goes through
//! [`authorize`], a pure function of (caller, resource owner, required role).

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Profile id, stringly typed as JWT subjects conventionally are.
    pub sub: String,
    pub admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(profile_id: i32, admin: bool, expires_in: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: profile_id.to_string(),
            admin,
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }
}

/// HS256 key pair derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Token issuance failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| ApiError::Unauthenticated(format!("Invalid token: {}", e)))
    }
}

/// The authenticated caller. Missing or unparsable identity is a 401, never
/// a 400.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub profile_id: i32,
    pub is_admin: bool,
}

impl AuthUser {
    /// Caller description for the audit trail.
    pub fn audit_info(&self) -> String {
        format!("profile {}", self.profile_id)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated("Missing Authorization header".into()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthenticated("Expected a bearer token".into()))?;

        let claims = state.jwt.verify(token)?;
        let profile_id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| ApiError::Unauthenticated("Malformed subject claim".into()))?;

        Ok(AuthUser {
            profile_id,
            is_admin: claims.admin,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

/// Single authorization predicate. An admin passes every check; a plain user
/// passes `Role::User` checks only when the resource owner (if any) is the
/// caller itself.
pub fn authorize(caller: &AuthUser, owner: Option<i32>, required: Role) -> ApiResult<()> {
    if caller.is_admin {
        return Ok(());
    }
    match required {
        Role::Admin => Err(ApiError::Forbidden("Administrator role required".into())),
        Role::User => match owner {
            Some(owner_id) if owner_id != caller.profile_id => {
                Err(ApiError::Forbidden("Not the owner of this resource".into()))
            }
            _ => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32) -> AuthUser {
        AuthUser {
            profile_id: id,
            is_admin: false,
        }
    }

    fn admin(id: i32) -> AuthUser {
        AuthUser {
            profile_id: id,
            is_admin: true,
        }
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let keys = JwtKeys::new(b"test-secret");
        let claims = Claims::new(42, false, Duration::hours(1));
        let token = keys.issue(&claims).unwrap();
        let decoded = keys.verify(&token).unwrap();
        assert_eq!(decoded.sub, "42");
        assert!(!decoded.admin);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new(b"test-secret");
        let claims = Claims::new(7, false, Duration::hours(-2));
        let token = keys.issue(&claims).unwrap();
        assert!(matches!(
            keys.verify(&token),
            Err(ApiError::Unauthenticated(_))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let keys = JwtKeys::new(b"test-secret");
        let other = JwtKeys::new(b"other-secret");
        let token = keys
            .issue(&Claims::new(7, true, Duration::hours(1)))
            .unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn admin_passes_any_ownership_check() {
        assert!(authorize(&admin(1), Some(99), Role::User).is_ok());
        assert!(authorize(&admin(1), None, Role::Admin).is_ok());
    }

    #[test]
    fn user_passes_only_own_resources() {
        assert!(authorize(&user(5), Some(5), Role::User).is_ok());
        assert!(authorize(&user(5), None, Role::User).is_ok());
        assert!(matches!(
            authorize(&user(5), Some(6), Role::User),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn user_never_passes_admin_checks() {
        assert!(matches!(
            authorize(&user(5), None, Role::Admin),
            Err(ApiError::Forbidden(_))
        ));
    }
}
