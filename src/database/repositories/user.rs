use anyhow::Result;
use sqlx::PgPool;

use crate::database::models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves a facility-issued nurse id to the directory user carrying it.
    pub async fn find_by_nurse_id(&self, nurse_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, role, nurse_id, created_at, updated_at
            FROM users
            WHERE nurse_id = $1
            "#,
        )
        .bind(nurse_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
