use std::{env, sync::Arc};

use async_trait::async_trait;
use service::{
    config::{Config, ConfigService},
    ServiceError,
};

pub struct ConfigServiceImpl;

#[async_trait]
impl ConfigService for ConfigServiceImpl {
    async fn get_config(&self) -> Result<Config, ServiceError> {
        let legacy_redirect = env::var("LEGACY_REDIRECT")
            .map(|value| value == "true" || value == "1")
            .unwrap_or(false);
        let api_base_url = env::var("API_BASE_URL").unwrap_or_else(|_| String::new());

        Ok(Config {
            legacy_redirect,
            api_base_url: Arc::from(api_base_url),
        })
    }
}
