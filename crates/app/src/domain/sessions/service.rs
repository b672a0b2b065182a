//! Sessions service.
//!
//! Check-in writes the append-only log row and the last-session
//! projection in one transaction; a failure in either step leaves both
//! tables untouched.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{Principal, gate},
    database::Db,
    domain::{
        entities::records::EntityUuid,
        sessions::{
            data::{CheckIn, CheckInReceipt, CheckOut},
            errors::SessionsServiceError,
            records::{AssignmentRecord, AssignmentUuid, LastSessionRecord},
            repository::PgSessionsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSessionsService {
    db: Db,
    repository: PgSessionsRepository,
}

impl PgSessionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSessionsRepository::new(),
        }
    }
}

#[async_trait]
impl SessionsService for PgSessionsService {
    async fn check_in(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        check_in: CheckIn,
    ) -> Result<CheckInReceipt, SessionsServiceError> {
        gate::require_entity_access(principal, entity)?;

        if check_in.employee_code.trim().is_empty() {
            return Err(SessionsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let assignment_uuid = self
            .repository
            .insert_assignment(&mut tx, entity, AssignmentUuid::new(), &check_in)
            .await
            .map_err(SessionsServiceError::Transaction)?;

        self.repository
            .upsert_last_session(&mut tx, entity, assignment_uuid, &check_in)
            .await
            .map_err(SessionsServiceError::Transaction)?;

        tx.commit()
            .await
            .map_err(SessionsServiceError::Transaction)?;

        Ok(CheckInReceipt { assignment_uuid })
    }

    async fn check_out(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        check_out: CheckOut,
    ) -> Result<(), SessionsServiceError> {
        gate::require_entity_access(principal, entity)?;

        if check_out.employee_code.trim().is_empty() {
            return Err(SessionsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .close_assignment(&mut tx, entity, &check_out)
            .await
            .map_err(SessionsServiceError::Transaction)?;

        if rows_affected == 0 {
            return Err(SessionsServiceError::NotFound);
        }

        self.repository
            .close_last_session(
                &mut tx,
                entity,
                &check_out.employee_code,
                Some(&check_out.egress_time),
            )
            .await
            .map_err(SessionsServiceError::Transaction)?;

        tx.commit()
            .await
            .map_err(SessionsServiceError::Transaction)?;

        Ok(())
    }

    async fn get_last_session(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<LastSessionRecord, SessionsServiceError> {
        gate::require_entity_access(principal, entity)?;

        let mut tx = self.db.begin_transaction().await?;

        let session = self
            .repository
            .get_last_session(&mut tx, entity, employee_code)
            .await?;

        tx.commit().await?;

        session.ok_or(SessionsServiceError::NotFound)
    }

    async fn close_last_session(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<(), SessionsServiceError> {
        gate::require_entity_access(principal, entity)?;

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .close_last_session(&mut tx, entity, employee_code, None)
            .await?;

        if rows_affected == 0 {
            return Err(SessionsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_assignment(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        assignment: AssignmentUuid,
    ) -> Result<AssignmentRecord, SessionsServiceError> {
        gate::require_entity_access(principal, entity)?;

        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .get_assignment(&mut tx, entity, assignment)
            .await?;

        tx.commit().await?;

        record.ok_or(SessionsServiceError::NotFound)
    }

    async fn list_assignments(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<Vec<AssignmentRecord>, SessionsServiceError> {
        gate::require_entity_access(principal, entity)?;

        let mut tx = self.db.begin_transaction().await?;

        let records = self
            .repository
            .list_assignments(&mut tx, entity, employee_code)
            .await?;

        tx.commit().await?;

        Ok(records)
    }
}

#[automock]
#[async_trait]
pub trait SessionsService: Send + Sync {
    /// Records a check-in: appends to the shift log and overwrites the
    /// employee's last-session row, atomically.
    async fn check_in(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        check_in: CheckIn,
    ) -> Result<CheckInReceipt, SessionsServiceError>;

    /// Records a check-out against a prior assignment and closes the
    /// last session, atomically.
    async fn check_out(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        check_out: CheckOut,
    ) -> Result<(), SessionsServiceError>;

    /// Retrieves the employee's current last-session row.
    async fn get_last_session(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<LastSessionRecord, SessionsServiceError>;

    /// Marks the last session closed without touching the shift log.
    async fn close_last_session(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<(), SessionsServiceError>;

    /// Retrieves one shift-log row.
    async fn get_assignment(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        assignment: AssignmentUuid,
    ) -> Result<AssignmentRecord, SessionsServiceError>;

    /// Lists an employee's shift-log rows, newest first.
    async fn list_assignments(
        &self,
        principal: &Principal,
        entity: EntityUuid,
        employee_code: &str,
    ) -> Result<Vec<AssignmentRecord>, SessionsServiceError>;
}
