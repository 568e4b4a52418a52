use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

pub mod clock;
pub mod config;
pub mod export;
pub mod month_html;
pub mod pass;
pub mod permission;
pub mod user_info;
pub mod uuid_service;
pub mod work;

pub use permission::PermissionService;

/// A single reason why a work record was rejected. Slots are numbered 1 and 2.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationFailureItem {
    HoursWithoutType(u8),
    TypeWithoutHours(u8),
    HoursOutOfRange(u8),
    OutsideEditableWindow(time::Date),
}

impl std::fmt::Display for ValidationFailureItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HoursWithoutType(slot) => {
                write!(f, "Slot {slot} has hours but no work type")
            }
            Self::TypeWithoutHours(slot) => {
                write!(f, "Slot {slot} has a work type but no hours")
            }
            Self::HoursOutOfRange(slot) => {
                write!(f, "Slot {slot} hours must be greater than 0 and at most 24")
            }
            Self::OutsideEditableWindow(date) => {
                write!(f, "Date {date} is outside the editable window")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Forbidden")]
    Forbidden,

    #[error("Unknown user: {0}")]
    UserNotFound(Arc<str>),

    #[error("Entity {0} not found")]
    EntityNotFound(Uuid),

    #[error("Validation failed: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    ValidationError(Arc<[ValidationFailureItem]>),

    #[error("Invalid calendar month: {0}")]
    DateError(#[from] worktime_utils::WorktimeDateUtilsError),

    #[error("Export failed: {0}")]
    ExportFailed(Arc<str>),

    #[error("Rendering failed: {0}")]
    RenderFailed(Arc<str>),

    #[error("Internal error")]
    InternalError,
}
