use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{ChatMessage, PlanState, PresetStyle, QuotaState, UserAccount};
use crate::store::{AccountStore, ChatStore, Stores, StyleStore, Versioned};

/// Connects the pool, runs migrations, and hands back the full store set
/// sharing that pool.
pub async fn connect(database_url: &str) -> Result<Stores> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;

    Ok(Stores {
        accounts: Arc::new(PgAccountStore::new(pool.clone())),
        styles: Arc::new(PgStyleStore::new(pool.clone())),
        chat: Arc::new(PgChatStore::new(pool)),
    })
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    uid: String,
    email: Option<String>,
    display_name: Option<String>,
    plan_id: String,
    plan_activated: bool,
    requested_plan_id: Option<String>,
    requested_at: Option<DateTime<Utc>>,
    images_remaining: i64,
    resets_at: Option<DateTime<Utc>>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Versioned<UserAccount> {
    fn from(row: AccountRow) -> Self {
        Versioned {
            record: UserAccount {
                uid: row.uid,
                email: row.email,
                display_name: row.display_name,
                plan: PlanState {
                    id: row.plan_id,
                    activated: row.plan_activated,
                    requested_id: row.requested_plan_id,
                    requested_at: row.requested_at,
                },
                quota: QuotaState {
                    images_remaining: row.images_remaining,
                    resets_at: row.resets_at,
                },
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            version: row.version,
        }
    }
}

pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn get(&self, uid: &str) -> Result<Option<Versioned<UserAccount>>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT uid, email, display_name, plan_id, plan_activated,
                   requested_plan_id, requested_at, images_remaining, resets_at,
                   version, created_at, updated_at
            FROM accounts
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Versioned::from))
    }

    async fn insert(&self, account: &UserAccount) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (uid, email, display_name, plan_id, plan_activated,
                                  requested_plan_id, requested_at, images_remaining,
                                  resets_at, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, $11)
            ON CONFLICT (uid) DO NOTHING
            "#,
        )
        .bind(&account.uid)
        .bind(&account.email)
        .bind(&account.display_name)
        .bind(&account.plan.id)
        .bind(account.plan.activated)
        .bind(&account.plan.requested_id)
        .bind(account.plan.requested_at)
        .bind(account.quota.images_remaining)
        .bind(account.quota.resets_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update(&self, account: &UserAccount, expected_version: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, display_name = $3, plan_id = $4, plan_activated = $5,
                requested_plan_id = $6, requested_at = $7, images_remaining = $8,
                resets_at = $9, updated_at = $10, version = version + 1
            WHERE uid = $1 AND version = $11
            "#,
        )
        .bind(&account.uid)
        .bind(&account.email)
        .bind(&account.display_name)
        .bind(&account.plan.id)
        .bind(account.plan.activated)
        .bind(&account.plan.requested_id)
        .bind(account.plan.requested_at)
        .bind(account.quota.images_remaining)
        .bind(account.quota.resets_at)
        .bind(account.updated_at)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

pub struct PgStyleStore {
    pool: PgPool,
}

impl PgStyleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StyleStore for PgStyleStore {
    async fn list_active(&self) -> Result<Vec<PresetStyle>> {
        let styles = sqlx::query_as::<_, PresetStyle>(
            r#"
            SELECT id, label, description, grading, bgm, sfx, vo_tone,
                   sort_order, active, prompt, reference_image_url
            FROM styles
            WHERE active
            ORDER BY sort_order
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(styles)
    }
}

pub struct PgChatStore {
    pool: PgPool,
}

impl PgChatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for PgChatStore {
    async fn append(&self, message: &ChatMessage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, chat_id, sender_id, sender_name, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(&message.chat_id)
        .bind(&message.sender_id)
        .bind(&message.sender_name)
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
