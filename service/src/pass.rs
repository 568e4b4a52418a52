use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use dao::pass::{PassDirectionEntity, PassEntity};
use mockall::automock;
use uuid::Uuid;

use crate::{permission::Authentication, ServiceError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassDirection {
    In,
    Out,
}

impl From<&PassDirectionEntity> for PassDirection {
    fn from(entity: &PassDirectionEntity) -> Self {
        match entity {
            PassDirectionEntity::In => Self::In,
            PassDirectionEntity::Out => Self::Out,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pass {
    pub id: Uuid,
    pub usercode: i64,
    pub username: Arc<str>,
    pub direction: PassDirection,
    pub date_time: time::PrimitiveDateTime,
    pub corrected: bool,
}

impl From<&PassEntity> for Pass {
    fn from(entity: &PassEntity) -> Self {
        Self {
            id: entity.id,
            usercode: entity.usercode,
            username: entity.username.clone(),
            direction: (&entity.direction).into(),
            date_time: entity.date_time,
            corrected: entity.corrected,
        }
    }
}

/// One page of swipe records, newest first.
#[derive(Clone, Debug, PartialEq)]
pub struct PassPage {
    pub items: Arc<[Pass]>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

#[automock(type Context=();)]
#[async_trait]
pub trait PassService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;

    /// One page of swipe records. Without a filter admins get every
    /// user's records, everyone else their own; the usercode filter is
    /// an admin view.
    async fn get_pass<'a>(
        &self,
        username: Option<&'a str>,
        usercode: Option<i64>,
        page: u32,
        context: Authentication<Self::Context>,
    ) -> Result<PassPage, ServiceError>;

    /// Everyone whose latest swipe today was inbound.
    async fn get_pass_onsite(
        &self,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[Pass]>, ServiceError>;
}
