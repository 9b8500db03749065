/**
 * PostgreSQL User Store
 *
 * sqlx-backed implementation of the store contract. Uniqueness comes from
 * the unique indexes on username and email; the guarded update is a single
 * conditional UPDATE, so the row count tells the caller whether its
 * compare-and-swap won without a second round trip.
 */
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::store::{NewUserRecord, StoreError, UserRecord, UserRecordStore, UserUpdate};

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate;
        }
    }
    tracing::error!("User store query failed: {:?}", err);
    StoreError::Unavailable(err.to_string())
}

const USER_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
     password_hash, refresh_token, created_at, updated_at";

#[async_trait]
impl UserRecordStore for PostgresUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE ($1::text IS NOT NULL AND username = $1) \
                OR ($2::text IS NOT NULL AND email = $2) \
             LIMIT 1"
        );
        sqlx::query_as::<_, UserRecord>(&query)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn create(&self, new_user: NewUserRecord) -> Result<UserRecord, StoreError> {
        let query = format!(
            "INSERT INTO users \
             (id, username, email, full_name, avatar_url, cover_image_url, \
              password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRecord>(&query)
            .bind(Uuid::new_v4())
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.full_name)
            .bind(&new_user.avatar_url)
            .bind(&new_user.cover_image_url)
            .bind(&new_user.password_hash)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        refresh_token_guard: Option<&str>,
        update: UserUpdate,
    ) -> Result<u64, StoreError> {
        // $2 flags whether the refresh_token column changes at all, so a
        // password-only update does not wipe an active session.
        let set_refresh_token = update.refresh_token.is_some();
        let refresh_token_value = update.refresh_token.flatten();

        let result = sqlx::query(
            "UPDATE users \
             SET refresh_token = CASE WHEN $2::bool THEN $3::text ELSE refresh_token END, \
                 password_hash = COALESCE($4::text, password_hash), \
                 updated_at = $5 \
             WHERE id = $1 \
               AND ($6::text IS NULL OR refresh_token = $6)",
        )
        .bind(id)
        .bind(set_refresh_token)
        .bind(refresh_token_value)
        .bind(update.password_hash)
        .bind(Utc::now())
        .bind(refresh_token_guard)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
