use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::{audit, audit_as, validate_max_len, validate_required};
use crate::auth::{authorize, AuthUser, Role};
use crate::error::{ApiError, ApiResult};
use crate::models::UserProfile;
use crate::store::{is_unique_violation, NewProfile, Store};

pub struct RegisterProfile {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub reference_link: String,
    pub login: String,
    pub password: String,
}

/// Outcome of a successful credential check; token minting happens at the
/// API boundary where the signing keys live.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedIdentity {
    pub profile_id: i32,
    pub is_admin: bool,
}

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<Store>,
}

impl ProfileService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn register(&self, req: RegisterProfile) -> ApiResult<i32> {
        validate_registration(&req)?;

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();
        // The PHC string must fit the Password column.
        validate_max_len("Password hash", &password_hash, 100)?;

        let result = self
            .store
            .register_profile(NewProfile {
                name: &req.name,
                surname: &req.surname,
                email: &req.email,
                reference_link: &req.reference_link,
                login: &req.login,
                password_hash: &password_hash,
            })
            .await;

        match result {
            Ok(profile_id) => {
                audit_as(&self.store, "Profiles.Register", &format!("profile {}", profile_id))
                    .await;
                Ok(profile_id)
            }
            Err(err) if is_unique_violation(&err) => Err(ApiError::Conflict(format!(
                "Login '{}' is already taken",
                req.login
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Verifies login/password. Both unknown login and wrong password come
    /// back as the same 401 so the endpoint does not leak which logins exist.
    pub async fn login(&self, login: &str, password: &str) -> ApiResult<VerifiedIdentity> {
        let credentials = self
            .store
            .credentials_by_login(login)
            .await?
            .ok_or_else(|| ApiError::Unauthenticated("Unknown login or wrong password".into()))?;

        let parsed = PasswordHash::new(&credentials.password)
            .map_err(|e| ApiError::Internal(format!("Stored hash is unreadable: {}", e)))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| ApiError::Unauthenticated("Unknown login or wrong password".into()))?;

        Ok(VerifiedIdentity {
            profile_id: credentials.profile_id,
            is_admin: credentials.is_admin,
        })
    }

    pub async fn get(&self, profile_id: i32) -> ApiResult<UserProfile> {
        self.store
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Profile {} does not exist", profile_id)))
    }

    pub async fn edit_own(
        &self,
        actor: &AuthUser,
        name: &str,
        surname: &str,
        email: &str,
        image: Option<&[u8]>,
    ) -> ApiResult<()> {
        validate_required("Name", name)?;
        validate_required("Surname", surname)?;
        validate_required("Email", email)?;
        validate_max_len("Name", name, 50)?;
        validate_max_len("Surname", surname, 50)?;
        validate_max_len("Email", email, 100)?;

        let updated = self
            .store
            .update_profile(actor.profile_id, name, surname, email, image)
            .await?;
        if updated == 0 {
            return Err(ApiError::NotFound(format!(
                "Profile {} does not exist",
                actor.profile_id
            )));
        }
        audit(&self.store, "Profiles.EditByToken", actor).await;
        Ok(())
    }

    /// Deletes a profile with everything the schema cascades: authorization,
    /// bookmarks, comments, published recipes and their children.
    pub async fn delete(&self, actor: &AuthUser, profile_id: i32) -> ApiResult<()> {
        authorize(actor, Some(profile_id), Role::User)?;
        let deleted = self.store.delete_profile(profile_id).await?;
        if deleted == 0 {
            return Err(ApiError::NotFound(format!(
                "Profile {} does not exist",
                profile_id
            )));
        }
        audit(&self.store, "Profiles.Delete", actor).await;
        Ok(())
    }
}

fn validate_registration(req: &RegisterProfile) -> ApiResult<()> {
    validate_required("Name", &req.name)?;
    validate_required("Surname", &req.surname)?;
    validate_required("Email", &req.email)?;
    validate_required("ReferenceLink", &req.reference_link)?;
    validate_required("Login", &req.login)?;
    validate_required("Password", &req.password)?;
    validate_max_len("Name", &req.name, 50)?;
    validate_max_len("Surname", &req.surname, 50)?;
    validate_max_len("Email", &req.email, 100)?;
    validate_max_len("ReferenceLink", &req.reference_link, 100)?;
    validate_max_len("Login", &req.login, 50)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterProfile {
        RegisterProfile {
            name: "Maria".into(),
            surname: "Ivanova".into(),
            email: "maria@example.com".into(),
            reference_link: "https://example.com/maria".into(),
            login: "maria".into(),
            password: "hunter22".into(),
        }
    }

    #[test]
    fn complete_registration_passes_validation() {
        assert!(validate_registration(&registration()).is_ok());
    }

    #[test]
    fn registration_requires_a_reference_link() {
        let mut req = registration();
        req.reference_link = String::new();
        assert!(matches!(
            validate_registration(&req),
            Err(ApiError::Validation(_))
        ));

        req.reference_link = "   ".into();
        assert!(matches!(
            validate_registration(&req),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn registration_rejects_overlong_fields() {
        let mut req = registration();
        req.email = "e".repeat(101);
        assert!(matches!(
            validate_registration(&req),
            Err(ApiError::Validation(_))
        ));
    }
}
