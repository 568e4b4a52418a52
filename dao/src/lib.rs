use std::sync::Arc;

use thiserror::Error;

pub mod holiday;
pub mod pass;
pub mod user_info;
pub mod work;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Unknown enum value: {0}")]
    EnumValueNotFound(Arc<str>),

    #[error("Invalid uuid: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("Cannot parse timestamp: {0}")]
    TimeParseError(#[from] time::error::Parse),

    #[error("Cannot format timestamp: {0}")]
    TimeFormatError(#[from] time::error::Format),

    #[error("Invalid date component: {0}")]
    DateComponentError(#[from] time::error::ComponentRange),
}
