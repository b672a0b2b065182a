//! Employees Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::{
    employees::records::{EmployeeRecord, EmployeeUuid},
    entities::records::EntityUuid,
};

const REGISTER_EMPLOYEE_SQL: &str = include_str!("sql/register_employee.sql");
const FIND_BY_BADGE_SQL: &str = include_str!("sql/find_by_badge.sql");
const GET_EMPLOYEE_SQL: &str = include_str!("sql/get_employee.sql");
const LIST_EMPLOYEES_SQL: &str = include_str!("sql/list_employees.sql");
const UPDATE_ACCESS_KEY_SQL: &str = include_str!("sql/update_access_key.sql");
const DELETE_EMPLOYEE_SQL: &str = include_str!("sql/delete_employee.sql");

/// An employee row plus its stored access-key hash. Only the login path
/// sees this.
#[derive(Debug)]
pub(crate) struct EmployeeWithHash {
    pub(crate) record: EmployeeRecord,
    pub(crate) password_hash: String,
}

/// PostgreSQL-backed employees repository.
#[derive(Debug, Clone)]
pub(crate) struct PgEmployeesRepository {
    pool: PgPool,
}

impl PgEmployeesRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn register_employee(
        &self,
        entity: EntityUuid,
        uuid: EmployeeUuid,
        employee_code: &str,
        badge_number: &str,
        profile: &str,
        password_hash: &str,
    ) -> Result<EmployeeRecord, sqlx::Error> {
        query_as::<Postgres, EmployeeRecord>(REGISTER_EMPLOYEE_SQL)
            .bind(uuid.into_uuid())
            .bind(entity.into_uuid())
            .bind(employee_code)
            .bind(badge_number)
            .bind(profile)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_by_badge(
        &self,
        entity: EntityUuid,
        badge_number: &str,
    ) -> Result<Option<EmployeeWithHash>, sqlx::Error> {
        query_as::<Postgres, EmployeeWithHash>(FIND_BY_BADGE_SQL)
            .bind(entity.into_uuid())
            .bind(badge_number)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn get_employee(
        &self,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<Option<EmployeeRecord>, sqlx::Error> {
        query_as::<Postgres, EmployeeRecord>(GET_EMPLOYEE_SQL)
            .bind(entity.into_uuid())
            .bind(employee_code)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn list_employees(
        &self,
        entity: EntityUuid,
    ) -> Result<Vec<EmployeeRecord>, sqlx::Error> {
        query_as::<Postgres, EmployeeRecord>(LIST_EMPLOYEES_SQL)
            .bind(entity.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn update_access_key(
        &self,
        entity: EntityUuid,
        employee_code: &str,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(UPDATE_ACCESS_KEY_SQL)
            .bind(entity.into_uuid())
            .bind(employee_code)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn delete_employee(
        &self,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_EMPLOYEE_SQL)
            .bind(entity.into_uuid())
            .bind(employee_code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for EmployeeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: EmployeeUuid::from_uuid(row.try_get("uuid")?),
            entity_uuid: EntityUuid::from_uuid(row.try_get("entity_uuid")?),
            employee_code: row.try_get("employee_code")?,
            badge_number: row.try_get("badge_number")?,
            profile: row.try_get("profile")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for EmployeeWithHash {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            record: EmployeeRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
