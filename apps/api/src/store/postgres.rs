//! PostgreSQL implementation of the [`Store`] seam.
//!
//! Mutations are single statements (upsert / conditional UPDATE ... RETURNING),
//! which is what makes code consumption single-use without explicit locking.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::account::AccountRow;
use crate::models::profile::ProfileRow;
use crate::models::resume::GeneratedResumeRow;
use crate::store::{ProfileFields, Store};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn issue_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<AccountRow> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (email, verify_code, verify_expiry)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
                SET verify_code = EXCLUDED.verify_code,
                    verify_expiry = EXCLUDED.verify_expiry
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn consume_code(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AccountRow>> {
        // Conditional UPDATE: the row only changes when every precondition
        // holds, and the cleared code can never be consumed twice.
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts
            SET verified = TRUE, verify_code = NULL, verify_expiry = NULL
            WHERE email = $1 AND verify_code = $2 AND verify_expiry >= $3
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(code)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn account_by_id(&self, id: Uuid) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn profile_for_account(&self, account_id: Uuid) -> Result<Option<ProfileRow>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn upsert_profile(
        &self,
        account_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<ProfileRow> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles
                (account_id, full_name, city, email, phone, linkedin, github, about, gemini_api_key)
            VALUES ($1, $2, $3, $4, $5, $6, NULL, $7, $8)
            ON CONFLICT (account_id) DO UPDATE
                SET full_name = EXCLUDED.full_name,
                    city = EXCLUDED.city,
                    email = EXCLUDED.email,
                    phone = EXCLUDED.phone,
                    linkedin = EXCLUDED.linkedin,
                    github = NULL,
                    about = EXCLUDED.about,
                    gemini_api_key = EXCLUDED.gemini_api_key
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(&fields.full_name)
        .bind(&fields.city)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.linkedin)
        .bind(&fields.about)
        .bind(&fields.gemini_api_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_resume(&self, row: &GeneratedResumeRow) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO generated_resumes
                (id, account_id, job_url, created_at,
                 pdf_path, docx_path, pdf_name, docx_name, coverage_json)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.id)
        .bind(row.account_id)
        .bind(&row.job_url)
        .bind(row.created_at)
        .bind(&row.pdf_path)
        .bind(&row.docx_path)
        .bind(&row.pdf_name)
        .bind(&row.docx_name)
        .bind(&row.coverage_json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_resumes(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> Result<Vec<GeneratedResumeRow>> {
        let rows = sqlx::query_as::<_, GeneratedResumeRow>(
            r#"
            SELECT * FROM generated_resumes
            WHERE account_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn resume_owned(
        &self,
        account_id: Uuid,
        id: Uuid,
    ) -> Result<Option<GeneratedResumeRow>> {
        let row = sqlx::query_as::<_, GeneratedResumeRow>(
            "SELECT * FROM generated_resumes WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_resume(&self, account_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM generated_resumes WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
