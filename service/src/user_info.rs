use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use dao::user_info::UserEntity;
use mockall::automock;

use crate::{permission::Authentication, ServiceError};

#[derive(Clone, Debug, PartialEq)]
pub struct UserInfo {
    pub username: Arc<str>,
    pub name: Arc<str>,
    pub admin: bool,
    /// Expected-hours pro-ration fraction in `[0, 1]`, `None` means full time.
    pub fond: Option<f32>,
}

impl From<&UserEntity> for UserInfo {
    fn from(entity: &UserEntity) -> Self {
        Self {
            username: entity.username.clone(),
            name: entity.name.clone(),
            admin: entity.admin,
            fond: entity.fond,
        }
    }
}

#[automock(type Context=();)]
#[async_trait]
pub trait UserInfoService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;

    async fn get_user(
        &self,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<UserInfo, ServiceError>;

    /// Employees visible to the requester in display-name order: admins
    /// see everyone, other users only themselves.
    async fn get_work_users(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[UserInfo]>, ServiceError>;
}
