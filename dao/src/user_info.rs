use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

/// Directory entry of an employee.
///
/// `fond` is the expected-hours pro-ration fraction in `[0, 1]`,
/// `None` means full time.
#[derive(Clone, Debug, PartialEq)]
pub struct UserEntity {
    pub username: Arc<str>,
    pub name: Arc<str>,
    pub admin: bool,
    pub fond: Option<f32>,
}

#[automock]
#[async_trait]
pub trait UserInfoDao {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, crate::DaoError>;
    /// All employees ordered by display name.
    async fn all(&self) -> Result<Arc<[UserEntity]>, crate::DaoError>;
}
