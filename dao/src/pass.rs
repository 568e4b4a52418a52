use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;
use worktime_utils::YearMonth;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassDirectionEntity {
    In,
    Out,
}

/// A single swipe-card event at the site entrance. `corrected` marks
/// events that were fixed manually after the fact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassEntity {
    pub id: Uuid,
    pub usercode: i64,
    pub username: Arc<str>,
    pub direction: PassDirectionEntity,
    pub date_time: time::PrimitiveDateTime,
    pub corrected: bool,
}

#[automock]
#[async_trait]
pub trait PassDao {
    /// Swipe records, newest first, optionally restricted to one user
    /// by name or by terminal usercode.
    async fn find<'a>(
        &self,
        username: Option<&'a str>,
        usercode: Option<i64>,
        limit: u32,
        offset: i64,
    ) -> Result<Arc<[PassEntity]>, crate::DaoError>;
    async fn count<'a>(
        &self,
        username: Option<&'a str>,
        usercode: Option<i64>,
    ) -> Result<u64, crate::DaoError>;
    async fn find_by_username_and_month(
        &self,
        username: &str,
        month: YearMonth,
    ) -> Result<Arc<[PassEntity]>, crate::DaoError>;
    /// The latest swipe of every user, used for the onsite overview.
    async fn find_latest_per_user(&self) -> Result<Arc<[PassEntity]>, crate::DaoError>;
}
