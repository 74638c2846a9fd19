use sqlx::Result;

use super::Store;
use crate::models::{Credentials, UserProfile};

pub struct NewProfile<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub reference_link: &'a str,
    pub login: &'a str,
    pub password_hash: &'a str,
}

impl Store {
    pub async fn profile_exists(&self, profile_id: i32) -> Result<bool> {
        sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM public."UserProfile" WHERE "Id" = $1)"#,
        )
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Profile and authorization rows are written in one transaction so a
    /// failed login insert never leaves an orphaned profile.
    pub async fn register_profile(&self, new: NewProfile<'_>) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let profile_id: i32 = sqlx::query_scalar(
            r#"INSERT INTO public."UserProfile"
               ("Name", "Surname", "Email", "IsAdmin", "ReferenceLink")
               VALUES ($1, $2, $3, FALSE, $4)
               RETURNING "Id""#,
        )
        .bind(new.name)
        .bind(new.surname)
        .bind(new.email)
        .bind(new.reference_link)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"INSERT INTO public."Authorization" ("Login", "Password", "UserProfileId")
               VALUES ($1, $2, $3)"#,
        )
        .bind(new.login)
        .bind(new.password_hash)
        .bind(profile_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(profile_id)
    }

    pub async fn credentials_by_login(&self, login: &str) -> Result<Option<Credentials>> {
        sqlx::query_as(
            r#"SELECT a."UserProfileId" AS "ProfileId",
                      a."Password" AS "Password",
                      p."IsAdmin" AS "IsAdmin"
               FROM public."Authorization" a
               JOIN public."UserProfile" p ON p."Id" = a."UserProfileId"
               WHERE a."Login" = $1"#,
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_profile(&self, profile_id: i32) -> Result<Option<UserProfile>> {
        sqlx::query_as(
            r#"SELECT "Id", "Name", "Surname", "Email", "Image", "IsAdmin", "ReferenceLink"
               FROM public."UserProfile"
               WHERE "Id" = $1"#,
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update_profile(
        &self,
        profile_id: i32,
        name: &str,
        surname: &str,
        email: &str,
        image: Option<&[u8]>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"UPDATE public."UserProfile"
               SET "Name" = $2, "Surname" = $3, "Email" = $4,
                   "Image" = COALESCE($5, "Image")
               WHERE "Id" = $1"#,
        )
        .bind(profile_id)
        .bind(name)
        .bind(surname)
        .bind(email)
        .bind(image)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Cascades to the profile's authorization, bookmarks, comments, recipes
    /// and those recipes' children via the schema's foreign keys.
    pub async fn delete_profile(&self, profile_id: i32) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM public."UserProfile" WHERE "Id" = $1"#)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
