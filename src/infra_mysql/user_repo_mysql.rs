use crate::domain_model::UserId;
use crate::domain_port::{IdentityError, UserRecord, UserRepo};
use sqlx::{MySqlPool, Row};

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }
}

fn record_from(row: sqlx::mysql::MySqlRow) -> Result<UserRecord, IdentityError> {
    Ok(UserRecord {
        user_id: row
            .try_get::<UserId, _>("user_id")
            .map_err(|e| IdentityError::Store(format!("decode user_id: {e}")))?,
        username: row
            .try_get::<String, _>("username")
            .map_err(|e| IdentityError::Store(format!("decode username: {e}")))?,
    })
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn resolve_by_name(&self, username: &str) -> Result<Option<UserRecord>, IdentityError> {
        let row = sqlx::query("SELECT user_id, username FROM user WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::Store(format!("query user by name: {e}")))?;

        row.map(record_from).transpose()
    }

    async fn resolve_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, IdentityError> {
        let row = sqlx::query("SELECT user_id, username FROM user WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::Store(format!("query user by id: {e}")))?;

        row.map(record_from).transpose()
    }
}
