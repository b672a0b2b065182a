//! Sessions Repository
//!
//! Stateless; every method runs inside a caller-owned transaction so a
//! check-in or check-out commits both tables or neither.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    entities::records::EntityUuid,
    sessions::{
        data::{CheckIn, CheckOut},
        records::{AssignmentRecord, AssignmentUuid, LastSessionRecord, SessionState},
    },
};

const INSERT_ASSIGNMENT_SQL: &str = include_str!("sql/insert_assignment.sql");
const UPSERT_LAST_SESSION_SQL: &str = include_str!("sql/upsert_last_session.sql");
const CLOSE_ASSIGNMENT_SQL: &str = include_str!("sql/close_assignment.sql");
const CLOSE_LAST_SESSION_SQL: &str = include_str!("sql/close_last_session.sql");
const GET_LAST_SESSION_SQL: &str = include_str!("sql/get_last_session.sql");
const GET_ASSIGNMENT_SQL: &str = include_str!("sql/get_assignment.sql");
const LIST_ASSIGNMENTS_SQL: &str = include_str!("sql/list_assignments.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSessionsRepository;

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: EntityUuid,
        uuid: AssignmentUuid,
        check_in: &CheckIn,
    ) -> Result<AssignmentUuid, sqlx::Error> {
        let uuid = query_scalar::<Postgres, Uuid>(INSERT_ASSIGNMENT_SQL)
            .bind(uuid.into_uuid())
            .bind(entity.into_uuid())
            .bind(&check_in.employee_code)
            .bind(&check_in.client_code)
            .bind(&check_in.site_code)
            .bind(&check_in.post_code)
            .bind(&check_in.shift_date)
            .bind(&check_in.ingress_time)
            .bind(&check_in.recorded_by)
            .bind(&check_in.device_time)
            .fetch_one(&mut **tx)
            .await?;

        Ok(AssignmentUuid::from_uuid(uuid))
    }

    pub(crate) async fn upsert_last_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: EntityUuid,
        assignment: AssignmentUuid,
        check_in: &CheckIn,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_LAST_SESSION_SQL)
            .bind(entity.into_uuid())
            .bind(&check_in.employee_code)
            .bind(assignment.into_uuid())
            .bind(&check_in.client_code)
            .bind(&check_in.client_name)
            .bind(&check_in.site_code)
            .bind(&check_in.site_name)
            .bind(&check_in.post_code)
            .bind(&check_in.post_name)
            .bind(&check_in.shift_date)
            .bind(&check_in.ingress_time)
            .bind(&check_in.recorded_by)
            .bind(&check_in.device_time)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn close_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: EntityUuid,
        check_out: &CheckOut,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLOSE_ASSIGNMENT_SQL)
            .bind(check_out.assignment_uuid.into_uuid())
            .bind(entity.into_uuid())
            .bind(&check_out.egress_time)
            .bind(&check_out.real_egress_time)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn close_last_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: EntityUuid,
        employee_code: &str,
        egress_time: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLOSE_LAST_SESSION_SQL)
            .bind(entity.into_uuid())
            .bind(employee_code)
            .bind(egress_time)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_last_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<Option<LastSessionRecord>, sqlx::Error> {
        query_as::<Postgres, LastSessionRecord>(GET_LAST_SESSION_SQL)
            .bind(entity.into_uuid())
            .bind(employee_code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: EntityUuid,
        assignment: AssignmentUuid,
    ) -> Result<Option<AssignmentRecord>, sqlx::Error> {
        query_as::<Postgres, AssignmentRecord>(GET_ASSIGNMENT_SQL)
            .bind(assignment.into_uuid())
            .bind(entity.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_assignments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<Vec<AssignmentRecord>, sqlx::Error> {
        query_as::<Postgres, AssignmentRecord>(LIST_ASSIGNMENTS_SQL)
            .bind(entity.into_uuid())
            .bind(employee_code)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AssignmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AssignmentUuid::from_uuid(row.try_get("uuid")?),
            entity_uuid: EntityUuid::from_uuid(row.try_get("entity_uuid")?),
            employee_code: row.try_get("employee_code")?,
            client_code: row.try_get("client_code")?,
            site_code: row.try_get("site_code")?,
            post_code: row.try_get("post_code")?,
            shift_date: row.try_get("shift_date")?,
            ingress_time: row.try_get("ingress_time")?,
            egress_time: row.try_get("egress_time")?,
            real_egress_time: row.try_get("real_egress_time")?,
            recorded_by: row.try_get("recorded_by")?,
            device_time: row.try_get("device_time")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LastSessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let state: String = row.try_get("state")?;
        let state = state
            .parse::<SessionState>()
            .map_err(|err| sqlx::Error::ColumnDecode {
                index: "state".to_string(),
                source: Box::new(err),
            })?;

        Ok(Self {
            entity_uuid: EntityUuid::from_uuid(row.try_get("entity_uuid")?),
            employee_code: row.try_get("employee_code")?,
            assignment_uuid: row
                .try_get::<Option<Uuid>, _>("assignment_uuid")?
                .map(AssignmentUuid::from_uuid),
            client_code: row.try_get("client_code")?,
            client_name: row.try_get("client_name")?,
            site_code: row.try_get("site_code")?,
            site_name: row.try_get("site_name")?,
            post_code: row.try_get("post_code")?,
            post_name: row.try_get("post_name")?,
            shift_date: row.try_get("shift_date")?,
            ingress_time: row.try_get("ingress_time")?,
            egress_time: row.try_get("egress_time")?,
            state,
            recorded_by: row.try_get("recorded_by")?,
            device_time: row.try_get("device_time")?,
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
