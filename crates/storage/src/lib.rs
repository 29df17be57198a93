use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::{
    domain::{Item, ItemId, ItemPatch, ItemStatus, UserId},
    error::RepositoryError,
    repository::ItemRepository,
};

const ITEM_COLUMNS: &str =
    "id, user_id, text, title, description, status, completed, created_at";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Registers `username` if needed and returns its id. Stands in for a real
    /// sign-in provider.
    pub async fn create_user(&self, username: &str) -> Result<UserId> {
        let rec = sqlx::query(
            "INSERT INTO users (username) VALUES (?)
             ON CONFLICT(username) DO UPDATE SET username=excluded.username
             RETURNING id",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(UserId(rec.get::<i64, _>(0)))
    }

    pub async fn username_for_user(&self, user_id: UserId) -> Result<Option<String>> {
        let row = sqlx::query("SELECT username FROM users WHERE id = ?")
            .bind(user_id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>(0)))
    }

    pub async fn list_items_for_user(&self, user_id: UserId) -> Result<Vec<Item>> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM items
             WHERE user_id = ?
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .context("failed to list items")?;
        rows.iter().map(item_from_row).collect()
    }

    pub async fn get_item(&self, user_id: UserId, item_id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ? AND user_id = ?"
        ))
        .bind(item_id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(item_from_row).transpose()
    }

    pub async fn insert_item(&self, user_id: UserId, text: &str) -> Result<Item> {
        let row = sqlx::query(&format!(
            "INSERT INTO items (user_id, text, status, completed, created_at)
             VALUES (?, ?, ?, 0, ?)
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(user_id.0)
        .bind(text)
        .bind(ItemStatus::Inbox.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("failed to insert item")?;
        item_from_row(&row)
    }

    pub async fn patch_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
        patch: &ItemPatch,
    ) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let result = sqlx::query(
            "UPDATE items
             SET status = COALESCE(?, status),
                 title = COALESCE(?, title),
                 description = COALESCE(?, description),
                 completed = COALESCE(?, completed)
             WHERE id = ? AND user_id = ?",
        )
        .bind(patch.status.map(ItemStatus::as_str))
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.completed)
        .bind(item_id.0)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update item {item_id}"))?;

        if result.rows_affected() == 0 {
            bail!("item {item_id} not found for user {user_id}");
        }
        Ok(())
    }

    pub async fn remove_item(&self, user_id: UserId, item_id: ItemId) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ? AND user_id = ?")
            .bind(item_id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete item {item_id}"))?;

        if result.rows_affected() == 0 {
            bail!("item {item_id} not found for user {user_id}");
        }
        Ok(())
    }
}

fn item_from_row(row: &SqliteRow) -> Result<Item> {
    let status: String = row.try_get("status")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(Item {
        id: ItemId(row.try_get("id")?),
        user_id: UserId(row.try_get("user_id")?),
        text: row.try_get("text")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: status.parse::<ItemStatus>()?,
        completed: row.try_get("completed")?,
        created_at,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[async_trait]
impl ItemRepository for Storage {
    async fn list_items(&self, user_id: UserId) -> Result<Vec<Item>, RepositoryError> {
        self.list_items_for_user(user_id)
            .await
            .map_err(|err| RepositoryError::new("list_items", err))
    }

    async fn create_item(&self, user_id: UserId, text: &str) -> Result<Item, RepositoryError> {
        let item = self
            .insert_item(user_id, text)
            .await
            .map_err(|err| RepositoryError::new("create_item", err))?;
        tracing::debug!(item_id = item.id.0, user_id = user_id.0, "stored new inbox item");
        Ok(item)
    }

    async fn update_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
        patch: &ItemPatch,
    ) -> Result<(), RepositoryError> {
        self.patch_item(user_id, item_id, patch)
            .await
            .map_err(|err| RepositoryError::new("update_item", err))
    }

    async fn delete_item(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepositoryError> {
        self.remove_item(user_id, item_id)
            .await
            .map_err(|err| RepositoryError::new("delete_item", err))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
