use chrono::Utc;
use sqlx::Result;

use super::Store;

impl Store {
    /// Append-only audit row. Inputs are clamped to the column widths so an
    /// overlong caller description can never fail the write.
    pub async fn record_audit(&self, method_name: &str, user_info: &str) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO public."LoggingInfo" ("MethodName", "UserInfo", "DateTime")
               VALUES ($1, $2, $3)"#,
        )
        .bind(truncate(method_name, 100))
        .bind(truncate(user_info, 100))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn count_audit_entries(&self, method_name: &str, user_info: &str) -> Result<i64> {
        sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM public."LoggingInfo"
               WHERE "MethodName" = $1 AND "UserInfo" = $2"#,
        )
        .bind(method_name)
        .bind(user_info)
        .fetch_one(&self.pool)
        .await
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("profile 42", 100), "profile 42");
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("пывапыва", 4), "пыва");
    }
}
