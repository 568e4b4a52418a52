use std::sync::Arc;

use async_trait::async_trait;
use dao::pass::PassDirectionEntity;
use service::pass::{Pass, PassPage, PassService};
use service::permission::{Authentication, ADMIN_PRIVILEGE};
use service::ServiceError;

use crate::permission::check_self_or_admin;

pub const PAGE_SIZE: u32 = 50;

pub struct PassServiceImpl<PassDao, PermissionService, ClockService>
where
    PassDao: dao::pass::PassDao + Send + Sync,
    PermissionService: service::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    pub pass_dao: Arc<PassDao>,
    pub permission_service: Arc<PermissionService>,
    pub clock_service: Arc<ClockService>,
}
impl<PassDao, PermissionService, ClockService>
    PassServiceImpl<PassDao, PermissionService, ClockService>
where
    PassDao: dao::pass::PassDao + Send + Sync,
    PermissionService: service::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    pub fn new(
        pass_dao: Arc<PassDao>,
        permission_service: Arc<PermissionService>,
        clock_service: Arc<ClockService>,
    ) -> Self {
        Self {
            pass_dao,
            permission_service,
            clock_service,
        }
    }
}

#[async_trait]
impl<PassDao, PermissionService, ClockService> PassService
    for PassServiceImpl<PassDao, PermissionService, ClockService>
where
    PassDao: dao::pass::PassDao + Send + Sync,
    PermissionService: service::PermissionService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    type Context = PermissionService::Context;

    async fn get_pass<'a>(
        &self,
        username: Option<&'a str>,
        usercode: Option<i64>,
        page: u32,
        context: Authentication<Self::Context>,
    ) -> Result<PassPage, ServiceError> {
        let username: Option<Arc<str>> = match username {
            Some(username) => {
                check_self_or_admin(self.permission_service.as_ref(), username, &context).await?;
                Some(username.into())
            }
            // A usercode cannot be matched against the requester, so
            // the usercode filter exposes everyone's swipes.
            None if usercode.is_some() => {
                self.permission_service
                    .check_permission(ADMIN_PRIVILEGE, context)
                    .await?;
                None
            }
            // Admins get the unfiltered stream, everyone else falls
            // back to their own records.
            None => {
                match self
                    .permission_service
                    .check_permission(ADMIN_PRIVILEGE, context.clone())
                    .await
                {
                    Ok(()) => None,
                    Err(ServiceError::Forbidden) => Some(
                        self.permission_service
                            .current_user(context)
                            .await?
                            .ok_or(ServiceError::Forbidden)?,
                    ),
                    Err(err) => return Err(err),
                }
            }
        };

        let offset = i64::from(page) * i64::from(PAGE_SIZE);
        let total = self.pass_dao.count(username.as_deref(), usercode).await?;
        let items: Arc<[Pass]> = self
            .pass_dao
            .find(username.as_deref(), usercode, PAGE_SIZE, offset)
            .await?
            .iter()
            .map(Pass::from)
            .collect();

        Ok(PassPage {
            items,
            page,
            page_size: PAGE_SIZE,
            total,
        })
    }

    async fn get_pass_onsite(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[Pass]>, ServiceError> {
        self.permission_service
            .check_permission(ADMIN_PRIVILEGE, context)
            .await?;

        let today = self.clock_service.date_now();
        Ok(self
            .pass_dao
            .find_latest_per_user()
            .await?
            .iter()
            .filter(|pass| {
                pass.direction == PassDirectionEntity::In && pass.date_time.date() == today
            })
            .map(Pass::from)
            .collect())
    }
}
