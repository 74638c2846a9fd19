//! Row types for the `public` schema. Column names keep the PascalCase
//! identifiers of the persisted contract, mapped via `rename_all`.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub image: Option<Vec<u8>>,
    pub is_admin: bool,
    pub reference_link: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct Comment {
    pub id: i32,
    pub text: Option<String>,
    pub rating: f64,
    pub profile_id: i32,
    pub recipe_id: i32,
    pub publication_time: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct RecipeCategory {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct IngredientUnit {
    pub id: i32,
    pub name: String,
}

/// Login credentials joined with the owning profile's admin flag.
#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct Credentials {
    pub profile_id: i32,
    pub password: String,
    pub is_admin: bool,
}

/// Recipe detail row, category and publisher resolved by join.
#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct RecipeDetails {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<Vec<u8>>,
    pub publication_time: DateTime<Utc>,
    pub publisher_id: i32,
    pub publisher_name: String,
    pub category_id: i32,
    pub category_name: String,
}

/// Listing row, no image payload.
#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub publication_time: DateTime<Utc>,
    pub publisher_id: i32,
    pub publisher_name: String,
    pub category_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct IngredientLine {
    pub id: i32,
    pub name: String,
    pub value: f64,
    pub unit_name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct BookmarkedRecipe {
    pub id: i32,
    pub recipe_id: i32,
    pub recipe_name: String,
    pub add_time: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct Friend {
    pub profile_id: i32,
    pub name: String,
    pub surname: String,
    pub reference_link: String,
    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct ReceivedRecommendation {
    pub id: i32,
    pub recipe_id: i32,
    pub recipe_name: String,
    pub from_user_id: i32,
    pub from_user_name: String,
    pub text: String,
}
