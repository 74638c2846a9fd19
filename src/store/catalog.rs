use sqlx::Result;

use super::Store;
use crate::models::{IngredientUnit, RecipeCategory};

impl Store {
    pub async fn list_categories(&self) -> Result<Vec<RecipeCategory>> {
        sqlx::query_as(r#"SELECT "Id", "Name" FROM public."RecipeCategory" ORDER BY "Name""#)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn category_exists(&self, category_id: i32) -> Result<bool> {
        sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM public."RecipeCategory" WHERE "Id" = $1)"#,
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn insert_category(&self, name: &str) -> Result<i32> {
        sqlx::query_scalar(r#"INSERT INTO public."RecipeCategory" ("Name") VALUES ($1) RETURNING "Id""#)
            .bind(name)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn delete_category(&self, category_id: i32) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM public."RecipeCategory" WHERE "Id" = $1"#)
            .bind(category_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_units(&self) -> Result<Vec<IngredientUnit>> {
        sqlx::query_as(r#"SELECT "Id", "Name" FROM public."IngredientUnit" ORDER BY "Name""#)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn unit_exists(&self, unit_id: i32) -> Result<bool> {
        sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM public."IngredientUnit" WHERE "Id" = $1)"#,
        )
        .bind(unit_id)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn insert_unit(&self, name: &str) -> Result<i32> {
        sqlx::query_scalar(r#"INSERT INTO public."IngredientUnit" ("Name") VALUES ($1) RETURNING "Id""#)
            .bind(name)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn delete_unit(&self, unit_id: i32) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM public."IngredientUnit" WHERE "Id" = $1"#)
            .bind(unit_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
