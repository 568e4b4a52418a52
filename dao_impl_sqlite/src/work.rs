use std::sync::Arc;

use async_trait::async_trait;
use dao::work::{WorkDao, WorkEntity, WorkTypeEntity};
use dao::DaoError;
use sqlx::{query, query_as, SqlitePool};
use time::format_description::well_known::Iso8601;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;
use worktime_utils::YearMonth;

use crate::ResultDbErrorExt;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(sqlx::FromRow)]
struct WorkDb {
    id: Vec<u8>,
    username: String,
    date: String,
    hours: Option<f64>,
    work_type: String,
    hours2: Option<f64>,
    work_type2: String,
    created: String,
    deleted: Option<String>,
    update_version: Vec<u8>,
}

fn work_type_from_db(value: &str) -> Result<WorkTypeEntity, DaoError> {
    match value {
        "NONE" => Ok(WorkTypeEntity::None),
        "VACATION" => Ok(WorkTypeEntity::Vacation),
        "SICK_LEAVE" => Ok(WorkTypeEntity::SickLeave),
        "BUSINESS_TRIP" => Ok(WorkTypeEntity::BusinessTrip),
        value => Err(DaoError::EnumValueNotFound(value.into())),
    }
}

fn work_type_to_db(value: WorkTypeEntity) -> &'static str {
    match value {
        WorkTypeEntity::None => "NONE",
        WorkTypeEntity::Vacation => "VACATION",
        WorkTypeEntity::SickLeave => "SICK_LEAVE",
        WorkTypeEntity::BusinessTrip => "BUSINESS_TRIP",
    }
}

impl TryFrom<&WorkDb> for WorkEntity {
    type Error = DaoError;

    fn try_from(entity: &WorkDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(&entity.id)?,
            username: entity.username.as_str().into(),
            date: Date::parse(&entity.date, DATE_FORMAT)?,
            hours: entity.hours.map(|hours| hours as f32),
            work_type: work_type_from_db(&entity.work_type)?,
            hours2: entity.hours2.map(|hours| hours as f32),
            work_type2: work_type_from_db(&entity.work_type2)?,
            created: PrimitiveDateTime::parse(&entity.created, &Iso8601::DATE_TIME)?,
            deleted: entity
                .deleted
                .as_ref()
                .map(|deleted| PrimitiveDateTime::parse(deleted, &Iso8601::DATE_TIME))
                .transpose()?,
            version: Uuid::from_slice(&entity.update_version)?,
        })
    }
}

pub struct WorkDaoImpl {
    pub pool: Arc<SqlitePool>,
}
impl WorkDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkDao for WorkDaoImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkEntity>, DaoError> {
        query_as::<_, WorkDb>(
            r#"
            SELECT id, username, date, hours, work_type, hours2, work_type2, created, deleted, update_version
            FROM work
            WHERE id = ?
            "#,
        )
        .bind(id.as_bytes().to_vec())
        .fetch_optional(self.pool.as_ref())
        .await
        .map_db_error()?
        .as_ref()
        .map(WorkEntity::try_from)
        .transpose()
    }

    async fn find_by_username_and_date(
        &self,
        username: &str,
        date: Date,
    ) -> Result<Option<WorkEntity>, DaoError> {
        query_as::<_, WorkDb>(
            r#"
            SELECT id, username, date, hours, work_type, hours2, work_type2, created, deleted, update_version
            FROM work
            WHERE username = ? AND date = ? AND deleted IS NULL
            "#,
        )
        .bind(username)
        .bind(date.format(DATE_FORMAT)?)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_db_error()?
        .as_ref()
        .map(WorkEntity::try_from)
        .transpose()
    }

    async fn find_by_username_and_month(
        &self,
        username: &str,
        month: YearMonth,
    ) -> Result<Arc<[WorkEntity]>, DaoError> {
        query_as::<_, WorkDb>(
            r#"
            SELECT id, username, date, hours, work_type, hours2, work_type2, created, deleted, update_version
            FROM work
            WHERE username = ? AND date LIKE ? AND deleted IS NULL
            ORDER BY date
            "#,
        )
        .bind(username)
        .bind(format!("{:04}-{:02}-%", month.year(), month.month_number()))
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?
        .iter()
        .map(WorkEntity::try_from)
        .collect::<Result<_, _>>()
    }

    async fn create(&self, entity: &WorkEntity, process: &str) -> Result<(), DaoError> {
        query(
            r#"
            INSERT INTO work (id, username, date, hours, work_type, hours2, work_type2, created, update_version, update_process)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entity.id.as_bytes().to_vec())
        .bind(entity.username.as_ref())
        .bind(entity.date.format(DATE_FORMAT)?)
        .bind(entity.hours.map(f64::from))
        .bind(work_type_to_db(entity.work_type))
        .bind(entity.hours2.map(f64::from))
        .bind(work_type_to_db(entity.work_type2))
        .bind(entity.created.format(&Iso8601::DATE_TIME)?)
        .bind(entity.version.as_bytes().to_vec())
        .bind(process)
        .execute(self.pool.as_ref())
        .await
        .map_db_error()?;
        Ok(())
    }

    async fn update(&self, entity: &WorkEntity, process: &str) -> Result<(), DaoError> {
        query(
            r#"
            UPDATE work
            SET hours = ?, work_type = ?, hours2 = ?, work_type2 = ?, deleted = ?, update_version = ?, update_process = ?
            WHERE id = ?
            "#,
        )
        .bind(entity.hours.map(f64::from))
        .bind(work_type_to_db(entity.work_type))
        .bind(entity.hours2.map(f64::from))
        .bind(work_type_to_db(entity.work_type2))
        .bind(
            entity
                .deleted
                .as_ref()
                .map(|deleted| deleted.format(&Iso8601::DATE_TIME))
                .transpose()?,
        )
        .bind(entity.version.as_bytes().to_vec())
        .bind(process)
        .bind(entity.id.as_bytes().to_vec())
        .execute(self.pool.as_ref())
        .await
        .map_db_error()?;
        Ok(())
    }
}
