use std::sync::Arc;

use async_trait::async_trait;
use service::{
    permission::{Authentication, ADMIN_PRIVILEGE},
    PermissionService, ServiceError,
};

/// Passes when the context belongs to `username` itself, otherwise falls
/// back to an admin check.
pub(crate) async fn check_self_or_admin<P>(
    permission_service: &P,
    username: &str,
    context: &Authentication<P::Context>,
) -> Result<(), ServiceError>
where
    P: PermissionService + Send + Sync,
{
    if matches!(context, Authentication::Full) {
        return Ok(());
    }
    if let Some(current) = permission_service.current_user(context.clone()).await? {
        if current.as_ref() == username {
            return Ok(());
        }
    }
    permission_service
        .check_permission(ADMIN_PRIVILEGE, context.clone())
        .await
}

/// Permission checks backed by the user directory's admin flag.
///
/// The request context carries the requester's username, resolved by the
/// rest layer from the `role` query parameter.
pub struct PermissionServiceImpl<UserInfoDao>
where
    UserInfoDao: dao::user_info::UserInfoDao + Send + Sync,
{
    pub user_info_dao: Arc<UserInfoDao>,
}
impl<UserInfoDao> PermissionServiceImpl<UserInfoDao>
where
    UserInfoDao: dao::user_info::UserInfoDao + Send + Sync,
{
    pub fn new(user_info_dao: Arc<UserInfoDao>) -> Self {
        Self { user_info_dao }
    }
}

#[async_trait]
impl<UserInfoDao> PermissionService for PermissionServiceImpl<UserInfoDao>
where
    UserInfoDao: dao::user_info::UserInfoDao + Send + Sync,
{
    type Context = Option<Arc<str>>;

    async fn check_permission(
        &self,
        privilege: &str,
        context: Authentication<Self::Context>,
    ) -> Result<(), ServiceError> {
        match context {
            Authentication::Full => Ok(()),
            Authentication::Context(Some(username)) => {
                if privilege != ADMIN_PRIVILEGE {
                    return Err(ServiceError::Forbidden);
                }
                match self.user_info_dao.find_by_username(username.as_ref()).await? {
                    Some(user) if user.admin => Ok(()),
                    _ => Err(ServiceError::Forbidden),
                }
            }
            Authentication::Context(None) => Err(ServiceError::Forbidden),
        }
    }

    async fn current_user(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Option<Arc<str>>, ServiceError> {
        match context {
            Authentication::Full => Ok(None),
            Authentication::Context(username) => Ok(username),
        }
    }
}
