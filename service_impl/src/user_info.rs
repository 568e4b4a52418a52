use std::sync::Arc;

use async_trait::async_trait;
use service::{
    permission::{Authentication, ADMIN_PRIVILEGE},
    user_info::{UserInfo, UserInfoService},
    ServiceError,
};

pub struct UserInfoServiceImpl<UserInfoDao, PermissionService>
where
    UserInfoDao: dao::user_info::UserInfoDao + Send + Sync,
    PermissionService: service::PermissionService + Send + Sync,
{
    pub user_info_dao: Arc<UserInfoDao>,
    pub permission_service: Arc<PermissionService>,
}
impl<UserInfoDao, PermissionService> UserInfoServiceImpl<UserInfoDao, PermissionService>
where
    UserInfoDao: dao::user_info::UserInfoDao + Send + Sync,
    PermissionService: service::PermissionService + Send + Sync,
{
    pub fn new(user_info_dao: Arc<UserInfoDao>, permission_service: Arc<PermissionService>) -> Self {
        Self {
            user_info_dao,
            permission_service,
        }
    }
}

#[async_trait]
impl<UserInfoDao, PermissionService> UserInfoService
    for UserInfoServiceImpl<UserInfoDao, PermissionService>
where
    UserInfoDao: dao::user_info::UserInfoDao + Send + Sync,
    PermissionService: service::PermissionService + Send + Sync,
{
    type Context = PermissionService::Context;

    async fn get_user(
        &self,
        username: &str,
        _context: Authentication<Self::Context>,
    ) -> Result<UserInfo, ServiceError> {
        self.user_info_dao
            .find_by_username(username)
            .await?
            .as_ref()
            .map(UserInfo::from)
            .ok_or_else(|| ServiceError::UserNotFound(username.into()))
    }

    async fn get_work_users(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[UserInfo]>, ServiceError> {
        let is_admin = match &context {
            Authentication::Full => true,
            Authentication::Context(_) => self
                .permission_service
                .check_permission(ADMIN_PRIVILEGE, context.clone())
                .await
                .is_ok(),
        };
        if is_admin {
            let mut users: Vec<UserInfo> =
                self.user_info_dao.all().await?.iter().map(UserInfo::from).collect();
            users.sort_by(|a, b| a.name.cmp(&b.name));
            return Ok(users.into());
        }

        // Non-admins only see themselves.
        match self.permission_service.current_user(context).await? {
            Some(username) => {
                let user = self.get_user(username.as_ref(), Authentication::Full).await?;
                Ok(Arc::from([user]))
            }
            None => {
                let empty: Vec<UserInfo> = Vec::new();
                Ok(empty.into())
            }
        }
    }
}
