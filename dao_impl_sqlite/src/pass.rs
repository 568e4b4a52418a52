use std::sync::Arc;

use async_trait::async_trait;
use dao::pass::{PassDao, PassDirectionEntity, PassEntity};
use dao::DaoError;
use sqlx::{query_as, query_scalar, SqlitePool};
use time::format_description::well_known::Iso8601;
use time::PrimitiveDateTime;
use uuid::Uuid;
use worktime_utils::YearMonth;

use crate::ResultDbErrorExt;

#[derive(sqlx::FromRow)]
struct PassDb {
    id: Vec<u8>,
    usercode: i64,
    username: String,
    direction: String,
    date_time: String,
    corrected: i64,
}

impl TryFrom<&PassDb> for PassEntity {
    type Error = DaoError;

    fn try_from(entity: &PassDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(&entity.id)?,
            usercode: entity.usercode,
            username: entity.username.as_str().into(),
            direction: match entity.direction.as_str() {
                "IN" => PassDirectionEntity::In,
                "OUT" => PassDirectionEntity::Out,
                value => return Err(DaoError::EnumValueNotFound(value.into())),
            },
            date_time: PrimitiveDateTime::parse(&entity.date_time, &Iso8601::DATE_TIME)?,
            corrected: entity.corrected != 0,
        })
    }
}

pub struct PassDaoImpl {
    pub pool: Arc<SqlitePool>,
}
impl PassDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PassDao for PassDaoImpl {
    async fn find<'a>(
        &self,
        username: Option<&'a str>,
        usercode: Option<i64>,
        limit: u32,
        offset: i64,
    ) -> Result<Arc<[PassEntity]>, DaoError> {
        query_as::<_, PassDb>(
            r#"
            SELECT id, usercode, username, direction, date_time, corrected
            FROM pass
            WHERE (?1 IS NULL OR username = ?1) AND (?2 IS NULL OR usercode = ?2)
            ORDER BY date_time DESC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(username)
        .bind(usercode)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?
        .iter()
        .map(PassEntity::try_from)
        .collect::<Result<_, _>>()
    }

    async fn count<'a>(
        &self,
        username: Option<&'a str>,
        usercode: Option<i64>,
    ) -> Result<u64, DaoError> {
        let count: i64 = query_scalar(
            r#"
            SELECT count(*) FROM pass
            WHERE (?1 IS NULL OR username = ?1) AND (?2 IS NULL OR usercode = ?2)
            "#,
        )
        .bind(username)
        .bind(usercode)
        .fetch_one(self.pool.as_ref())
        .await
        .map_db_error()?;
        Ok(count as u64)
    }

    async fn find_by_username_and_month(
        &self,
        username: &str,
        month: YearMonth,
    ) -> Result<Arc<[PassEntity]>, DaoError> {
        query_as::<_, PassDb>(
            r#"
            SELECT id, usercode, username, direction, date_time, corrected
            FROM pass
            WHERE username = ? AND date_time LIKE ?
            ORDER BY date_time
            "#,
        )
        .bind(username)
        .bind(format!("{:04}-{:02}-%", month.year(), month.month_number()))
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?
        .iter()
        .map(PassEntity::try_from)
        .collect::<Result<_, _>>()
    }

    async fn find_latest_per_user(&self) -> Result<Arc<[PassEntity]>, DaoError> {
        query_as::<_, PassDb>(
            r#"
            SELECT pass.id, pass.usercode, pass.username, pass.direction, pass.date_time, pass.corrected
            FROM pass
            INNER JOIN (
                SELECT username, max(date_time) AS latest
                FROM pass
                GROUP BY username
            ) latest ON pass.username = latest.username AND pass.date_time = latest.latest
            ORDER BY pass.username
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?
        .iter()
        .map(PassEntity::try_from)
        .collect::<Result<_, _>>()
    }
}
