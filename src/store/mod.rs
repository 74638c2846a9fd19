//! Data-access layer: a SQLx connection pool plus per-entity query methods,
//! split across the submodules below. Schema DDL is applied at startup and
//! preserves the persisted contract: schema `public`, PascalCase quoted
//! identifiers, cascading foreign keys, `"Rating" BETWEEN 0 AND 5`.

use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

mod audit;
mod bookmarks;
mod catalog;
mod comments;
mod friends;
mod profiles;
mod recipes;
mod recommendations;

pub use profiles::NewProfile;
pub use recipes::NewIngredientLine;

pub struct Store {
    pub(crate) pool: PgPool,
}

impl Store {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(16)
            .connect(database_url)
            .await?;
        Ok(Store { pool })
    }

    /// Create every table and index of the relational schema.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."UserProfile" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Name" character varying(50) NOT NULL,
                "Surname" character varying(50) NOT NULL,
                "Email" character varying(100) NOT NULL,
                "Image" bytea,
                "IsAdmin" boolean NOT NULL DEFAULT FALSE,
                "ReferenceLink" character varying(100) NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."Authorization" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Login" character varying(50) NOT NULL,
                "Password" character varying(100) NOT NULL,
                "UserProfileId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."RecipeCategory" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Name" character varying(50) NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."CookingRecipe" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Name" character varying(50) NOT NULL,
                "Description" text,
                "Image" bytea,
                "PublicationTime" timestamp with time zone NOT NULL,
                "PublisherId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE,
                "RecipeCategoryId" integer NOT NULL
                    REFERENCES public."RecipeCategory" ("Id") ON DELETE CASCADE
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."IngredientUnit" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Name" character varying(20) NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."IngredientsList" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Name" character varying(50) NOT NULL,
                "Value" double precision NOT NULL,
                "IngredientUnitId" integer NOT NULL
                    REFERENCES public."IngredientUnit" ("Id") ON DELETE CASCADE,
                "CookingRecipeId" integer NOT NULL
                    REFERENCES public."CookingRecipe" ("Id") ON DELETE CASCADE
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."Comment" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Text" character varying(200),
                "Rating" double precision NOT NULL,
                "ProfileId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE,
                "RecipeId" integer NOT NULL
                    REFERENCES public."CookingRecipe" ("Id") ON DELETE CASCADE,
                "PublicationTime" timestamp with time zone NOT NULL,
                CONSTRAINT "Rating_Constraint" CHECK ("Rating" BETWEEN 0 AND 5)
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."Bookmark" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "ProfileId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE,
                "RecipeId" integer NOT NULL
                    REFERENCES public."CookingRecipe" ("Id") ON DELETE CASCADE,
                "AddTime" timestamp with time zone NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."FriendList" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "RequesterId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE,
                "AddresseeId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE,
                "DateTime" timestamp with time zone NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."Recommendation" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "Text" character varying(200) NOT NULL,
                "FromUserId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE,
                "ToUserId" integer NOT NULL
                    REFERENCES public."UserProfile" ("Id") ON DELETE CASCADE,
                "RecipeId" integer NOT NULL
                    REFERENCES public."CookingRecipe" ("Id") ON DELETE CASCADE
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS public."LoggingInfo" (
                "Id" integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                "MethodName" character varying(100) NOT NULL,
                "UserInfo" character varying(100) NOT NULL,
                "DateTime" timestamp with time zone NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        // Uniqueness and lookup indexes
        sqlx::query(
            r#"CREATE UNIQUE INDEX IF NOT EXISTS "IX_Authorization_Login"
               ON public."Authorization" ("Login")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE UNIQUE INDEX IF NOT EXISTS "IX_Authorization_UserProfileId"
               ON public."Authorization" ("UserProfileId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_Comment_ProfileId"
               ON public."Comment" ("ProfileId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_Comment_RecipeId"
               ON public."Comment" ("RecipeId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_CookingRecipe_PublisherId"
               ON public."CookingRecipe" ("PublisherId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_CookingRecipe_RecipeCategoryId"
               ON public."CookingRecipe" ("RecipeCategoryId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_Bookmark_ProfileId"
               ON public."Bookmark" ("ProfileId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_Bookmark_RecipeId"
               ON public."Bookmark" ("RecipeId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_IngredientsList_CookingRecipeId"
               ON public."IngredientsList" ("CookingRecipeId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_FriendList_RequesterId"
               ON public."FriendList" ("RequesterId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_FriendList_AddresseeId"
               ON public."FriendList" ("AddresseeId")"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE INDEX IF NOT EXISTS "IX_Recommendation_ToUserId"
               ON public."Recommendation" ("ToUserId")"#,
        )
        .execute(&self.pool)
        .await?;

        // Every table also carries a unique index on "Id" alongside the PK.
        for table in [
            "UserProfile",
            "Authorization",
            "RecipeCategory",
            "CookingRecipe",
            "IngredientUnit",
            "IngredientsList",
            "Comment",
            "Bookmark",
            "FriendList",
            "Recommendation",
            "LoggingInfo",
        ] {
            sqlx::query(&format!(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS "IX_{table}_Id" ON public."{table}" ("Id")"#
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}

/// True when the error is Postgres unique-constraint violation 23505.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
