use chrono::Utc;
use sqlx::Result;

use super::Store;
use crate::models::BookmarkedRecipe;

impl Store {
    /// No uniqueness is enforced: the schema permits a profile bookmarking
    /// the same recipe more than once.
    pub async fn insert_bookmark(&self, profile_id: i32, recipe_id: i32) -> Result<i32> {
        sqlx::query_scalar(
            r#"INSERT INTO public."Bookmark" ("ProfileId", "RecipeId", "AddTime")
               VALUES ($1, $2, $3)
               RETURNING "Id""#,
        )
        .bind(profile_id)
        .bind(recipe_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete_bookmarks(&self, profile_id: i32, recipe_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"DELETE FROM public."Bookmark" WHERE "ProfileId" = $1 AND "RecipeId" = $2"#,
        )
        .bind(profile_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_bookmarks(&self, profile_id: i32) -> Result<Vec<BookmarkedRecipe>> {
        sqlx::query_as(
            r#"SELECT b."Id" AS "Id",
                      b."RecipeId" AS "RecipeId",
                      r."Name" AS "RecipeName",
                      b."AddTime" AS "AddTime"
               FROM public."Bookmark" b
               JOIN public."CookingRecipe" r ON r."Id" = b."RecipeId"
               WHERE b."ProfileId" = $1
               ORDER BY b."AddTime" DESC"#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
    }
}
