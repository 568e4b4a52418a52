use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use worktime_utils::YearMonth;

use crate::{permission::Authentication, ServiceError};

/// Deprecated HTML admin view of a work month.
///
/// Kept only until the separate UI application replaces it. The rendering
/// happens in a template, the aggregation core stays string free.
#[automock(type Context=();)]
#[async_trait]
pub trait MonthHtmlService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;

    async fn render_month(
        &self,
        month: YearMonth,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<str>, ServiceError>;
}
