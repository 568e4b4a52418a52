use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use worktime_utils::YearMonth;

/// A national holiday from the company holiday calendar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayEntity {
    pub date: time::Date,
    pub description: Arc<str>,
}

#[automock]
#[async_trait]
pub trait HolidayDao {
    async fn find_by_month(
        &self,
        month: YearMonth,
    ) -> Result<Arc<[HolidayEntity]>, crate::DaoError>;
}
