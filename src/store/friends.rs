use chrono::Utc;
use sqlx::Result;

use super::Store;
use crate::models::Friend;

impl Store {
    pub async fn friend_link_exists(&self, requester_id: i32, addressee_id: i32) -> Result<bool> {
        sqlx::query_scalar(
            r#"SELECT EXISTS (
                   SELECT 1 FROM public."FriendList"
                   WHERE "RequesterId" = $1 AND "AddresseeId" = $2
               )"#,
        )
        .bind(requester_id)
        .bind(addressee_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Directional link; the inverse direction is a separate row.
    pub async fn insert_friend(&self, requester_id: i32, addressee_id: i32) -> Result<i32> {
        sqlx::query_scalar(
            r#"INSERT INTO public."FriendList" ("RequesterId", "AddresseeId", "DateTime")
               VALUES ($1, $2, $3)
               RETURNING "Id""#,
        )
        .bind(requester_id)
        .bind(addressee_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete_friend(&self, requester_id: i32, addressee_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"DELETE FROM public."FriendList"
               WHERE "RequesterId" = $1 AND "AddresseeId" = $2"#,
        )
        .bind(requester_id)
        .bind(addressee_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_friends(&self, requester_id: i32) -> Result<Vec<Friend>> {
        sqlx::query_as(
            r#"SELECT p."Id" AS "ProfileId",
                      p."Name" AS "Name",
                      p."Surname" AS "Surname",
                      p."ReferenceLink" AS "ReferenceLink",
                      f."DateTime" AS "DateTime"
               FROM public."FriendList" f
               JOIN public."UserProfile" p ON p."Id" = f."AddresseeId"
               WHERE f."RequesterId" = $1
               ORDER BY f."DateTime" DESC"#,
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await
    }
}
