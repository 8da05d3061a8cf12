//! Company persistence operations.
//!
//! All queries run against the `companies` table. Column rules (length,
//! emptiness, non-negative count, unique name) live in the schema; a
//! violation surfaces as [`StoreError::Constraint`].

use async_trait::async_trait;
use compreg_core::{Company, CompanyId, CompanyPatch, CompanyType, NewCompany};
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{CompanyStore, StoreError};

const COLUMNS: &str = "id, name, description, employee_count, registered, company_type";

// SQLSTATE codes reported as constraint failures.
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";
const NOT_NULL_VIOLATION: &str = "23502";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Postgres-backed [`CompanyStore`].
#[derive(Debug, Clone)]
pub struct PgCompanyStore {
    pool: PgPool,
}

impl PgCompanyStore {
    /// Wrap a connected (and migrated) pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn insert(&self, new: NewCompany) -> Result<Company, StoreError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "INSERT INTO companies (name, description, employee_count, registered, company_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.employee_count)
        .bind(new.registered)
        .bind(new.company_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.into_company()
    }

    async fn get(&self, id: CompanyId) -> Result<Company, StoreError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.ok_or(StoreError::NotFound)?.into_company()
    }

    async fn update(&self, id: CompanyId, patch: &CompanyPatch) -> Result<Company, StoreError> {
        // One statement: the merge is atomic and absent fields keep their value.
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "UPDATE companies SET
                 name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 employee_count = COALESCE($4, employee_count),
                 registered = COALESCE($5, registered),
                 company_type = COALESCE($6, company_type)
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.employee_count)
        .bind(patch.registered)
        .bind(patch.company_type.map(|t| t.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.ok_or(StoreError::NotFound)?.into_company()
    }

    async fn delete(&self, id: CompanyId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    description: String,
    employee_count: i32,
    registered: bool,
    company_type: String,
}

impl CompanyRow {
    fn into_company(self) -> Result<Company, StoreError> {
        let company_type: CompanyType = self.company_type.parse().map_err(|_| {
            tracing::error!(
                id = %self.id,
                company_type = %self.company_type,
                "unknown company type in database"
            );
            StoreError::Unavailable(format!(
                "row {} has unknown company type {:?}",
                self.id, self.company_type
            ))
        })?;

        Ok(Company {
            id: CompanyId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            employee_count: self.employee_count,
            registered: self.registered,
            company_type,
        })
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some(
                UNIQUE_VIOLATION
                | CHECK_VIOLATION
                | NOT_NULL_VIOLATION
                | FOREIGN_KEY_VIOLATION
                | STRING_DATA_RIGHT_TRUNCATION,
            ) => StoreError::Constraint(db.message().to_string()),
            _ => StoreError::Unavailable(db.to_string()),
        },
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(map_sqlx_error(sqlx::Error::RowNotFound), StoreError::NotFound);
    }

    #[test]
    fn pool_errors_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Protocol("bad frame".into())),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn row_with_known_type_converts() {
        let id = Uuid::new_v4();
        let company = CompanyRow {
            id,
            name: "Acme".into(),
            description: String::new(),
            employee_count: 3,
            registered: true,
            company_type: "SoleProprietorship".into(),
        }
        .into_company()
        .unwrap();
        assert_eq!(company.id, CompanyId::from_uuid(id));
        assert_eq!(company.company_type, CompanyType::SoleProprietorship);
    }

    #[test]
    fn row_with_unknown_type_is_unavailable() {
        let result = CompanyRow {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            description: String::new(),
            employee_count: 3,
            registered: true,
            company_type: "Guild".into(),
        }
        .into_company();
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
