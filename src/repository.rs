//! Persistence operations for leads.
//!
//! All access to the `leads` table goes through [`LeadRepository`]. The
//! repository takes its pool by constructor injection; there is no global
//! connection handle. Write operations assume their payloads already
//! passed validation.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, LeadChanges, NewLead};

pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns every lead, in whatever order the store yields them.
    pub async fn list(&self) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>("SELECT * FROM leads")
            .fetch_all(&self.pool)
            .await
            .context("listing leads")?;
        Ok(leads)
    }

    /// Fetches a single lead by id.
    pub async fn get(&self, id: Uuid) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lead with id {} not found", id)))
    }

    /// Inserts a validated lead with a generated id and timestamps.
    ///
    /// The unique index on `email` is the authority on duplicates; a
    /// violation maps to `Conflict`.
    pub async fn create(&self, lead: &NewLead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (
                first_name, last_name, email, company_name,
                company_size, website, lead_source, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&lead.first_name)
        .bind(&lead.last_name)
        .bind(&lead.email)
        .bind(&lead.company_name)
        .bind(&lead.company_size)
        .bind(lead.website.as_deref())
        .bind(&lead.lead_source)
        .bind(lead.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &lead.email))
    }

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// Fields left `None` in `changes` keep their stored values. Changing
    /// the email re-runs the uniqueness check through the same index as
    /// `create`.
    pub async fn update(&self, id: Uuid, changes: &LeadChanges) -> Result<Lead, AppError> {
        let updated = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET first_name   = COALESCE($2, first_name),
                last_name    = COALESCE($3, last_name),
                email        = COALESCE($4, email),
                company_name = COALESCE($5, company_name),
                company_size = COALESCE($6, company_size),
                website      = COALESCE($7, website),
                lead_source  = COALESCE($8, lead_source),
                is_active    = COALESCE($9, is_active),
                updated_at   = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.company_name.as_deref())
        .bind(changes.company_size.as_deref())
        .bind(changes.website.as_deref())
        .bind(changes.lead_source.as_deref())
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match changes.email.as_deref() {
            Some(email) => map_unique_violation(e, email),
            None => e.into(),
        })?;

        updated.ok_or_else(|| AppError::NotFound(format!("Lead with id {} not found", id)))
    }

    /// Permanently removes a lead. There is no soft delete.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Lead with id {} not found", id)));
        }
        Ok(())
    }

    /// Exact match on `lead_source`. Values outside the enumerated set are
    /// not rejected here; they simply match nothing.
    pub async fn list_by_lead_source(&self, source: &str) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE lead_source = $1")
            .bind(source)
            .fetch_all(&self.pool)
            .await
            .context("listing leads by source")?;
        Ok(leads)
    }

    /// Exact match on `company_size`, same contract as
    /// [`list_by_lead_source`](Self::list_by_lead_source).
    pub async fn list_by_company_size(&self, size: &str) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE company_size = $1")
            .bind(size)
            .fetch_all(&self.pool)
            .await
            .context("listing leads by company size")?;
        Ok(leads)
    }
}

fn map_unique_violation(err: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Conflict(format!("A lead with email {} already exists", email));
        }
    }
    err.into()
}
