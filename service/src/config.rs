use std::sync::Arc;

use crate::ServiceError;
use async_trait::async_trait;
use mockall::automock;

/// Startup configuration for the request-handling layer.
///
/// `legacy_redirect` controls whether the deprecated HTML view posts edits
/// to relative URLs (behind the legacy JSP proxy) or to `api_base_url`.
pub struct Config {
    pub legacy_redirect: bool,
    pub api_base_url: Arc<str>,
}

#[automock]
#[async_trait]
pub trait ConfigService {
    async fn get_config(&self) -> Result<Config, ServiceError>;
}
