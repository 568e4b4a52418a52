use std::sync::Arc;

use async_trait::async_trait;
use dao::user_info::{UserEntity, UserInfoDao};
use dao::DaoError;
use sqlx::{query_as, SqlitePool};

use crate::ResultDbErrorExt;

#[derive(sqlx::FromRow)]
struct UserDb {
    username: String,
    name: String,
    admin: i64,
    fond: Option<f64>,
}

impl From<&UserDb> for UserEntity {
    fn from(entity: &UserDb) -> Self {
        Self {
            username: entity.username.as_str().into(),
            name: entity.name.as_str().into(),
            admin: entity.admin != 0,
            fond: entity.fond.map(|fond| fond as f32),
        }
    }
}

pub struct UserInfoDaoImpl {
    pub pool: Arc<SqlitePool>,
}
impl UserInfoDaoImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInfoDao for UserInfoDaoImpl {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>, DaoError> {
        Ok(query_as::<_, UserDb>(
            r#"
            SELECT username, name, admin, fond
            FROM user_info
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_db_error()?
        .as_ref()
        .map(UserEntity::from))
    }

    async fn all(&self) -> Result<Arc<[UserEntity]>, DaoError> {
        Ok(query_as::<_, UserDb>(
            r#"
            SELECT username, name, admin, fond
            FROM user_info
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?
        .iter()
        .map(UserEntity::from)
        .collect())
    }
}
