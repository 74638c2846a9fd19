//! Use-case handlers. One service per entity family; every method validates
//! input shape, runs the authorization predicate, performs its single
//! persistence call and appends an audit row on success.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::store::Store;

mod bookmarks;
mod catalog;
mod comments;
mod friends;
mod profiles;
mod recipes;
mod recommendations;

pub use bookmarks::BookmarkService;
pub use catalog::CatalogService;
pub use comments::{CommentQuery, CommentService};
pub use friends::FriendService;
pub use profiles::{ProfileService, RegisterProfile, VerifiedIdentity};
pub use recipes::{NewRecipe, RecipeService, RecipeView};
pub use recommendations::RecommendationService;

/// Audit writes are best-effort: a failed append is logged, never surfaced.
pub(crate) async fn audit(store: &Store, method: &str, actor: &AuthUser) {
    audit_as(store, method, &actor.audit_info()).await;
}

/// Audit variant for operations without an authenticated caller yet
/// (registration happens before any token exists).
pub(crate) async fn audit_as(store: &Store, method: &str, user_info: &str) {
    if let Err(err) = store.record_audit(method, user_info).await {
        tracing::warn!("Audit write for {} failed: {}", method, err);
    }
}

pub(crate) fn validate_rating(rating: f64) -> ApiResult<()> {
    if (0.0..=5.0).contains(&rating) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Rating {} is outside the allowed range 0..=5",
            rating
        )))
    }
}

pub(crate) fn validate_max_len(field: &str, value: &str, max_chars: usize) -> ApiResult<()> {
    if value.chars().count() > max_chars {
        Err(ApiError::Validation(format!(
            "{} exceeds the maximum length of {} characters",
            field, max_chars
        )))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_required(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::Validation(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(3.5).is_ok());
        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn length_check_counts_characters_not_bytes() {
        let text = "я".repeat(200);
        assert!(validate_max_len("Text", &text, 200).is_ok());
        assert!(validate_max_len("Text", &format!("{}!", text), 200).is_err());
    }

    #[test]
    fn required_check_rejects_whitespace() {
        assert!(validate_required("Name", "borscht").is_ok());
        assert!(validate_required("Name", "   ").is_err());
        assert!(validate_required("Name", "").is_err());
    }
}
