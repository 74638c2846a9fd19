//! HTTP boundary: routes, request/response DTOs and their mapping onto the
//! service layer. Everything lives under `/cookingrecipes`.

use axum::Router;
use base64::Engine;

use crate::app_state::AppState;
use crate::error::{ApiError, ApiResult};

mod bookmarks;
mod catalog;
mod comments;
mod friends;
mod profiles;
mod recipes;
mod recommendations;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/cookingrecipes",
            recipes::router()
                .nest("/comments", comments::router())
                .nest("/bookmarks", bookmarks::router())
                .nest("/profiles", profiles::router())
                .nest("/friends", friends::router())
                .nest("/recommendations", recommendations::router())
                .nest("/categories", catalog::categories_router())
                .nest("/units", catalog::units_router()),
        )
        .with_state(state)
}

/// Binary columns travel as base64 strings in JSON bodies.
pub(crate) fn decode_image(encoded: Option<&str>) -> ApiResult<Option<Vec<u8>>> {
    match encoded {
        None => Ok(None),
        Some(data) => base64::engine::general_purpose::STANDARD
            .decode(data)
            .map(Some)
            .map_err(|e| ApiError::Validation(format!("Image is not valid base64: {}", e))),
    }
}

pub(crate) fn encode_image(raw: Option<&[u8]>) -> Option<String> {
    raw.map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_codec_round_trips() {
        let raw = vec![1u8, 2, 3, 255];
        let encoded = encode_image(Some(&raw)).unwrap();
        assert_eq!(decode_image(Some(&encoded)).unwrap(), Some(raw));
        assert_eq!(decode_image(None).unwrap(), None);
    }

    #[test]
    fn malformed_base64_is_a_validation_error() {
        assert!(matches!(
            decode_image(Some("not//valid///base64!!")),
            Err(ApiError::Validation(_))
        ));
    }
}
