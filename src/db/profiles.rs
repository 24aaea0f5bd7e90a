// src/db/profiles.rs
use crate::models::Profile;
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

pub struct ProfileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, user_id: &str) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(profile)
    }

    /// Profiles exist implicitly alongside the identity: the first
    /// authenticated request creates the row.
    pub async fn get_or_create(
        &self,
        user_id: &str,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<Profile> {
        if let Some(profile) = self.find(user_id).await? {
            return Ok(profile);
        }

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, email, full_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(full_name)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        info!("Created profile for user: {}", email);

        Ok(Profile {
            user_id: user_id.to_string(),
            email: email.to_string(),
            full_name: full_name.map(String::from),
            created_at: now,
            updated_at: now,
        })
    }

    /// Idempotent full overwrite of the display name.
    pub async fn update_full_name(&self, user_id: &str, full_name: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE profiles SET full_name = ?, updated_at = ? WHERE user_id = ?",
        )
        .bind(full_name)
        .bind(Utc::now())
        .bind(user_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProfileRepository::new(db.pool());

        let first = repo
            .get_or_create("u-1", "ada@example.com", Some("Ada"))
            .await
            .unwrap();
        let second = repo
            .get_or_create("u-1", "ada@example.com", Some("Renamed"))
            .await
            .unwrap();

        assert_eq!(first.full_name.as_deref(), Some("Ada"));
        // second call returns the existing row untouched
        assert_eq!(second.full_name.as_deref(), Some("Ada"));
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn test_update_full_name_overwrites() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProfileRepository::new(db.pool());

        repo.get_or_create("u-1", "ada@example.com", None)
            .await
            .unwrap();
        assert!(repo.update_full_name("u-1", "Ada Lovelace").await.unwrap());
        assert!(repo.update_full_name("u-1", "Ada Lovelace").await.unwrap());

        let profile = repo.find("u-1").await.unwrap().unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_false() {
        let db = Database::in_memory().await.unwrap();
        let repo = ProfileRepository::new(db.pool());
        assert!(!repo.update_full_name("missing", "Nobody").await.unwrap());
    }
}
