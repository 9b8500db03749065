/**
 * In-Memory User Store
 *
 * HashMap-backed implementation of the store contract. Uniqueness checks and
 * guarded updates run under a single write lock, which gives the same
 * compare-and-swap semantics the Postgres store gets from a conditional
 * UPDATE. Used by the test suite and as a startup fallback when no database
 * is configured.
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{NewUserRecord, StoreError, UserRecord, UserRecordStore, UserUpdate};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRecordStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| {
                username.is_some_and(|name| user.username == name)
                    || email.is_some_and(|mail| user.email == mail)
            })
            .cloned())
    }

    async fn create(&self, new_user: NewUserRecord) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;

        // Uniqueness check and insert happen under the same write lock.
        let taken = users.values().any(|user| {
            user.username == new_user.username || user.email == new_user.email
        });
        if taken {
            return Err(StoreError::Duplicate);
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            avatar_url: new_user.avatar_url,
            cover_image_url: new_user.cover_image_url,
            password_hash: new_user.password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_fields(
        &self,
        id: Uuid,
        refresh_token_guard: Option<&str>,
        update: UserUpdate,
    ) -> Result<u64, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(0);
        };

        if let Some(expected) = refresh_token_guard {
            if user.refresh_token.as_deref() != Some(expected) {
                return Ok(0);
            }
        }

        if let Some(refresh_token) = update.refresh_token {
            user.refresh_token = refresh_token;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUserRecord {
        NewUserRecord {
            username: username.to_string(),
            email: email.to_string(),
            full_name: "Test User".to_string(),
            avatar_url: "/media/avatar.png".to_string(),
            cover_image_url: None,
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_find_round_trip() {
        let store = MemoryUserStore::new();
        let created = store.create(new_user("alice", "alice@example.com")).await.unwrap();

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        let by_name = store
            .find_by_username_or_email(Some("alice"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.id, created.id);

        let by_email = store
            .find_by_username_or_email(None, Some("alice@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn lookup_with_no_identifiers_finds_nothing() {
        let store = MemoryUserStore::new();
        store.create(new_user("alice", "alice@example.com")).await.unwrap();

        let found = store.find_by_username_or_email(None, None).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let store = MemoryUserStore::new();
        store.create(new_user("alice", "alice@example.com")).await.unwrap();

        let err = store
            .create(new_user("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.create(new_user("alice", "alice@example.com")).await.unwrap();

        let err = store
            .create(new_user("bob", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn guarded_update_applies_only_on_matching_token() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("alice", "alice@example.com")).await.unwrap();

        store
            .update_fields(user.id, None, UserUpdate::set_refresh_token("first"))
            .await
            .unwrap();

        // Stale guard loses.
        let stale = store
            .update_fields(user.id, Some("other"), UserUpdate::set_refresh_token("second"))
            .await
            .unwrap();
        assert_eq!(stale, 0);

        // Matching guard wins and swaps the token.
        let swapped = store
            .update_fields(user.id, Some("first"), UserUpdate::set_refresh_token("second"))
            .await
            .unwrap();
        assert_eq!(swapped, 1);

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn clear_refresh_token_sets_column_to_none() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("alice", "alice@example.com")).await.unwrap();

        store
            .update_fields(user.id, None, UserUpdate::set_refresh_token("tok"))
            .await
            .unwrap();
        store
            .update_fields(user.id, None, UserUpdate::clear_refresh_token())
            .await
            .unwrap();

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());
    }

    #[tokio::test]
    async fn update_for_unknown_user_touches_nothing() {
        let store = MemoryUserStore::new();
        let count = store
            .update_fields(Uuid::new_v4(), None, UserUpdate::clear_refresh_token())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn password_hash_update_keeps_refresh_token() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("alice", "alice@example.com")).await.unwrap();

        store
            .update_fields(user.id, None, UserUpdate::set_refresh_token("tok"))
            .await
            .unwrap();
        store
            .update_fields(user.id, None, UserUpdate::set_password_hash("new-hash"))
            .await
            .unwrap();

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "new-hash");
        assert_eq!(stored.refresh_token.as_deref(), Some("tok"));
    }
}
