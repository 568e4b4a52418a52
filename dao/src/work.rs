use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;
use worktime_utils::YearMonth;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkTypeEntity {
    None,
    Vacation,
    SickLeave,
    BusinessTrip,
}

/// A declared work record for one user and one calendar day.
///
/// The two slots allow a day to be split between two categories,
/// e.g. half a day worked and half a day of vacation.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkEntity {
    pub id: Uuid,
    pub username: Arc<str>,
    pub date: time::Date,
    pub hours: Option<f32>,
    pub work_type: WorkTypeEntity,
    pub hours2: Option<f32>,
    pub work_type2: WorkTypeEntity,
    pub created: time::PrimitiveDateTime,
    pub deleted: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}

#[automock]
#[async_trait]
pub trait WorkDao {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkEntity>, crate::DaoError>;
    async fn find_by_username_and_date(
        &self,
        username: &str,
        date: time::Date,
    ) -> Result<Option<WorkEntity>, crate::DaoError>;
    async fn find_by_username_and_month(
        &self,
        username: &str,
        month: YearMonth,
    ) -> Result<Arc<[WorkEntity]>, crate::DaoError>;
    async fn create(&self, entity: &WorkEntity, process: &str) -> Result<(), crate::DaoError>;
    async fn update(&self, entity: &WorkEntity, process: &str) -> Result<(), crate::DaoError>;
}
