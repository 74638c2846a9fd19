use chrono::Utc;
use sqlx::Result;

use super::Store;
use crate::models::Comment;

const COMMENT_COLUMNS: &str =
    r#""Id", "Text", "Rating", "ProfileId", "RecipeId", "PublicationTime""#;

impl Store {
    pub async fn insert_comment(
        &self,
        profile_id: i32,
        recipe_id: i32,
        text: Option<&str>,
        rating: f64,
    ) -> Result<i32> {
        sqlx::query_scalar(
            r#"INSERT INTO public."Comment"
               ("Text", "Rating", "ProfileId", "RecipeId", "PublicationTime")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING "Id""#,
        )
        .bind(text)
        .bind(rating)
        .bind(profile_id)
        .bind(recipe_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get_comment(&self, comment_id: i32) -> Result<Option<Comment>> {
        sqlx::query_as(&format!(
            r#"SELECT {COMMENT_COLUMNS} FROM public."Comment" WHERE "Id" = $1"#
        ))
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// The caller's comment on a recipe, if any. A profile leaves at most one
    /// comment per recipe in practice; ties resolve to the newest.
    pub async fn get_comment_by_recipe_and_profile(
        &self,
        recipe_id: i32,
        profile_id: i32,
    ) -> Result<Option<Comment>> {
        sqlx::query_as(&format!(
            r#"SELECT {COMMENT_COLUMNS} FROM public."Comment"
               WHERE "RecipeId" = $1 AND "ProfileId" = $2
               ORDER BY "PublicationTime" DESC
               LIMIT 1"#
        ))
        .bind(recipe_id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn comment_owner(&self, comment_id: i32) -> Result<Option<i32>> {
        sqlx::query_scalar(r#"SELECT "ProfileId" FROM public."Comment" WHERE "Id" = $1"#)
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn update_comment(
        &self,
        comment_id: i32,
        text: Option<&str>,
        rating: f64,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"UPDATE public."Comment" SET "Text" = $2, "Rating" = $3 WHERE "Id" = $1"#,
        )
        .bind(comment_id)
        .bind(text)
        .bind(rating)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_comment(&self, comment_id: i32) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM public."Comment" WHERE "Id" = $1"#)
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// All of a profile's comments, optionally substring-filtered on text
    /// (case-insensitive) and ordered by publication time.
    pub async fn list_profile_comments(
        &self,
        profile_id: i32,
        text_filter: Option<&str>,
        reverse: bool,
    ) -> Result<Vec<Comment>> {
        let order = if reverse { "DESC" } else { "ASC" };
        sqlx::query_as(&format!(
            r#"SELECT {COMMENT_COLUMNS} FROM public."Comment"
               WHERE "ProfileId" = $1
                 AND ($2::text IS NULL OR "Text" ILIKE '%' || $2 || '%')
               ORDER BY "PublicationTime" {order}"#
        ))
        .bind(profile_id)
        .bind(text_filter)
        .fetch_all(&self.pool)
        .await
    }
}
