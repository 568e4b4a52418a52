use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use worktime_utils::YearMonth;

use crate::{permission::Authentication, ServiceError};

#[automock(type Context=();)]
#[async_trait]
pub trait ExportService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;

    /// Serializes the month view of one employee into a spreadsheet.
    /// The column layout mirrors the HTML rendering.
    async fn export_work_days(
        &self,
        month: YearMonth,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[u8]>, ServiceError>;
}
