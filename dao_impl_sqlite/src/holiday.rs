use std::sync::Arc;

use async_trait::async_trait;
use dao::holiday::{HolidayDao, HolidayEntity};
use dao::DaoError;
use sqlx::{query_as, SqlitePool};
use time::macros::format_description;
use time::Date;
use worktime_utils::YearMonth;

use crate::ResultDbErrorExt;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(sqlx::FromRow)]
struct HolidayDb {
    date: String,
    description: String,
}

impl TryFrom<&HolidayDb> for HolidayEntity {
    type Error = DaoError;

    fn try_from(entity: &HolidayDb) -> Result<Self, Self::Error> {
        Ok(Self {
            date: Date::parse(&entity.date, DATE_FORMAT)?,
            description: entity.description.as_str().into(),
        })
    }
}

pub struct HolidayDaoImpl {
    pub pool: Arc<SqlitePool>,
}
impl HolidayDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HolidayDao for HolidayDaoImpl {
    async fn find_by_month(&self, month: YearMonth) -> Result<Arc<[HolidayEntity]>, DaoError> {
        query_as::<_, HolidayDb>(
            r#"
            SELECT date, description
            FROM national_holiday
            WHERE date LIKE ?
            ORDER BY date
            "#,
        )
        .bind(format!("{:04}-{:02}-%", month.year(), month.month_number()))
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?
        .iter()
        .map(HolidayEntity::try_from)
        .collect::<Result<_, _>>()
    }
}
