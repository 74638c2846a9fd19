use chrono::Utc;
use sqlx::Result;

use super::Store;
use crate::models::{IngredientLine, RecipeDetails, RecipeSummary};

pub struct NewIngredientLine {
    pub name: String,
    pub value: f64,
    pub unit_id: i32,
}

impl Store {
    /// Recipe plus its ingredient lines, one transaction.
    pub async fn insert_recipe(
        &self,
        name: &str,
        description: Option<&str>,
        image: Option<&[u8]>,
        publisher_id: i32,
        category_id: i32,
        ingredients: &[NewIngredientLine],
    ) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let recipe_id: i32 = sqlx::query_scalar(
            r#"INSERT INTO public."CookingRecipe"
               ("Name", "Description", "Image", "PublicationTime", "PublisherId", "RecipeCategoryId")
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING "Id""#,
        )
        .bind(name)
        .bind(description)
        .bind(image)
        .bind(Utc::now())
        .bind(publisher_id)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await?;

        for line in ingredients {
            sqlx::query(
                r#"INSERT INTO public."IngredientsList"
                   ("Name", "Value", "IngredientUnitId", "CookingRecipeId")
                   VALUES ($1, $2, $3, $4)"#,
            )
            .bind(&line.name)
            .bind(line.value)
            .bind(line.unit_id)
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(recipe_id)
    }

    pub async fn recipe_exists(&self, recipe_id: i32) -> Result<bool> {
        sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM public."CookingRecipe" WHERE "Id" = $1)"#,
        )
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn recipe_owner(&self, recipe_id: i32) -> Result<Option<i32>> {
        sqlx::query_scalar(r#"SELECT "PublisherId" FROM public."CookingRecipe" WHERE "Id" = $1"#)
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn get_recipe_details(&self, recipe_id: i32) -> Result<Option<RecipeDetails>> {
        sqlx::query_as(
            r#"SELECT r."Id" AS "Id",
                      r."Name" AS "Name",
                      r."Description" AS "Description",
                      r."Image" AS "Image",
                      r."PublicationTime" AS "PublicationTime",
                      r."PublisherId" AS "PublisherId",
                      p."Name" || ' ' || p."Surname" AS "PublisherName",
                      r."RecipeCategoryId" AS "CategoryId",
                      c."Name" AS "CategoryName"
               FROM public."CookingRecipe" r
               JOIN public."UserProfile" p ON p."Id" = r."PublisherId"
               JOIN public."RecipeCategory" c ON c."Id" = r."RecipeCategoryId"
               WHERE r."Id" = $1"#,
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_recipe_ingredients(&self, recipe_id: i32) -> Result<Vec<IngredientLine>> {
        sqlx::query_as(
            r#"SELECT i."Id" AS "Id",
                      i."Name" AS "Name",
                      i."Value" AS "Value",
                      u."Name" AS "UnitName"
               FROM public."IngredientsList" i
               JOIN public."IngredientUnit" u ON u."Id" = i."IngredientUnitId"
               WHERE i."CookingRecipeId" = $1
               ORDER BY i."Id""#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_recipes(
        &self,
        category_id: Option<i32>,
        name_filter: Option<&str>,
        publisher_id: Option<i32>,
    ) -> Result<Vec<RecipeSummary>> {
        sqlx::query_as(
            r#"SELECT r."Id" AS "Id",
                      r."Name" AS "Name",
                      r."PublicationTime" AS "PublicationTime",
                      r."PublisherId" AS "PublisherId",
                      p."Name" || ' ' || p."Surname" AS "PublisherName",
                      c."Name" AS "CategoryName"
               FROM public."CookingRecipe" r
               JOIN public."UserProfile" p ON p."Id" = r."PublisherId"
               JOIN public."RecipeCategory" c ON c."Id" = r."RecipeCategoryId"
               WHERE ($1::integer IS NULL OR r."RecipeCategoryId" = $1)
                 AND ($2::text IS NULL OR r."Name" ILIKE '%' || $2 || '%')
                 AND ($3::integer IS NULL OR r."PublisherId" = $3)
               ORDER BY r."PublicationTime" DESC"#,
        )
        .bind(category_id)
        .bind(name_filter)
        .bind(publisher_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn update_recipe(
        &self,
        recipe_id: i32,
        name: &str,
        description: Option<&str>,
        category_id: i32,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"UPDATE public."CookingRecipe"
               SET "Name" = $2, "Description" = $3, "RecipeCategoryId" = $4
               WHERE "Id" = $1"#,
        )
        .bind(recipe_id)
        .bind(name)
        .bind(description)
        .bind(category_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_recipe(&self, recipe_id: i32) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM public."CookingRecipe" WHERE "Id" = $1"#)
            .bind(recipe_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
