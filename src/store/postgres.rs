use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use crate::model::{CanonicalKey, FormUpdate, InsertOutcome, StoredForm};
use crate::store::traits::{ConditionalStore, FormStore};

const CREATE_FORM_DATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS form_data (
    root_org         TEXT NOT NULL,
    framework        TEXT NOT NULL,
    type             TEXT NOT NULL,
    action           TEXT NOT NULL,
    subtype          TEXT NOT NULL,
    component        TEXT NOT NULL,
    data             TEXT NOT NULL,
    created_on       TIMESTAMPTZ,
    last_modified_on TIMESTAMPTZ,
    PRIMARY KEY (root_org, framework, type, action, subtype, component)
)
"#;

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the form_data table if it does not exist yet
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_FORM_DATA_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create form_data table")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl FormStore for PostgresStore {
    async fn find_one(&self, key: &CanonicalKey) -> Result<Option<StoredForm>> {
        let row = sqlx::query(
            r#"
            SELECT root_org, framework, type, action, subtype, component, data, created_on, last_modified_on
            FROM form_data
            WHERE root_org = $1 AND framework = $2 AND type = $3 AND action = $4 AND subtype = $5 AND component = $6
            "#,
        )
        .bind(&key.root_org)
        .bind(&key.framework)
        .bind(&key.form_type)
        .bind(&key.action)
        .bind(&key.subtype)
        .bind(&key.component)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch form")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(StoredForm {
            key: CanonicalKey {
                root_org: row.get("root_org"),
                framework: row.get("framework"),
                form_type: row.get("type"),
                subtype: row.get("subtype"),
                action: row.get("action"),
                component: row.get("component"),
            },
            data: row.get("data"),
            created_on: row.get("created_on"),
            last_modified_on: row.get("last_modified_on"),
        }))
    }

    async fn insert(&self, form: StoredForm) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO form_data (root_org, framework, type, action, subtype, component, data, created_on, last_modified_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (root_org, framework, type, action, subtype, component) DO NOTHING
            "#,
        )
        .bind(&form.key.root_org)
        .bind(&form.key.framework)
        .bind(&form.key.form_type)
        .bind(&form.key.action)
        .bind(&form.key.subtype)
        .bind(&form.key.component)
        .bind(&form.data)
        .bind(form.created_on)
        .bind(form.last_modified_on)
        .execute(&self.pool)
        .await
        .context("Failed to insert form")?;

        if result.rows_affected() > 0 {
            Ok(InsertOutcome::Inserted)
        } else {
            Ok(InsertOutcome::AlreadyExists)
        }
    }
}

#[async_trait::async_trait]
impl ConditionalStore for PostgresStore {
    async fn apply_if_exists(&self, key: &CanonicalKey, values: FormUpdate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE form_data SET data = $7, last_modified_on = $8
            WHERE root_org = $1 AND framework = $2 AND type = $3 AND action = $4 AND subtype = $5 AND component = $6
            "#,
        )
        .bind(&key.root_org)
        .bind(&key.framework)
        .bind(&key.form_type)
        .bind(&key.action)
        .bind(&key.subtype)
        .bind(&key.component)
        .bind(&values.data)
        .bind(values.last_modified_on)
        .execute(&self.pool)
        .await
        .context("Failed to update form")?;

        Ok(result.rows_affected() > 0)
    }
}
