use sqlx::Result;

use super::Store;
use crate::models::ReceivedRecommendation;

impl Store {
    pub async fn insert_recommendation(
        &self,
        from_user_id: i32,
        to_user_id: i32,
        recipe_id: i32,
        text: &str,
    ) -> Result<i32> {
        sqlx::query_scalar(
            r#"INSERT INTO public."Recommendation"
               ("Text", "FromUserId", "ToUserId", "RecipeId")
               VALUES ($1, $2, $3, $4)
               RETURNING "Id""#,
        )
        .bind(text)
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_received_recommendations(
        &self,
        to_user_id: i32,
    ) -> Result<Vec<ReceivedRecommendation>> {
        sqlx::query_as(
            r#"SELECT rec."Id" AS "Id",
                      rec."RecipeId" AS "RecipeId",
                      r."Name" AS "RecipeName",
                      rec."FromUserId" AS "FromUserId",
                      p."Name" || ' ' || p."Surname" AS "FromUserName",
                      rec."Text" AS "Text"
               FROM public."Recommendation" rec
               JOIN public."CookingRecipe" r ON r."Id" = rec."RecipeId"
               JOIN public."UserProfile" p ON p."Id" = rec."FromUserId"
               WHERE rec."ToUserId" = $1
               ORDER BY rec."Id" DESC"#,
        )
        .bind(to_user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete_recommendation(&self, recommendation_id: i32) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM public."Recommendation" WHERE "Id" = $1"#)
            .bind(recommendation_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
