use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::model::{Id, Item, User, UserType};
use crate::store::traits::{ItemStore, Store, UserStore};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given connection options
    pub async fn new(options: PgConnectOptions) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect_with(options)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Round-trip a trivial query to make sure the database answers
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Failed to ping database")?;
        Ok(())
    }
}

fn user_from_row(row: &PgRow) -> Result<User> {
    let tag: i32 = row.try_get("type")?;
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        user_type: UserType::try_from(tag)?,
        items: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn item_from_row(row: &PgRow) -> Result<Item> {
    Ok(Item {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl UserStore for PostgresStore {
    async fn get_user(&self, id: &Id) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, age, type, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user")?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn list_users(&self, limit: u32, offset: u32) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, age, type, created_at, updated_at
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list users")?;

        rows.iter().map(user_from_row).collect()
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, age, type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(user.age)
        .bind(user.user_type.as_i32())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert user")?;

        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            "UPDATE users SET name = $1, age = $2, type = $3, updated_at = $4 WHERE id = $5",
        )
        .bind(&user.name)
        .bind(user.age)
        .bind(user.user_type.as_i32())
        .bind(user.updated_at)
        .bind(&user.id)
        .execute(&self.pool)
        .await
        .context("Failed to update user")?;

        Ok(())
    }

    async fn delete_user(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ItemStore for PostgresStore {
    async fn get_item(&self, id: &Id) -> Result<Option<Item>> {
        let row = sqlx::query(
            "SELECT id, name, user_id, created_at, updated_at FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch item")?;

        row.as_ref().map(item_from_row).transpose()
    }

    async fn list_items_for_user(&self, user_id: &Id) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, user_id, created_at, updated_at
            FROM items
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list items for user")?;

        rows.iter().map(item_from_row).collect()
    }

    async fn insert_item(&self, item: &Item) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO items (id, name, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.user_id)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert item")?;

        Ok(())
    }

    async fn update_item(&self, item: &Item) -> Result<()> {
        sqlx::query("UPDATE items SET name = $1, updated_at = $2 WHERE id = $3")
            .bind(&item.name)
            .bind(item.updated_at)
            .bind(&item.id)
            .execute(&self.pool)
            .await
            .context("Failed to update item")?;

        Ok(())
    }
}

impl Store for PostgresStore {}
