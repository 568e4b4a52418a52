//! Work records and the monthly attendance aggregation.
//!
//! A [`Work`] record is what an employee declares for a single day: up to
//! two slots of hours, each with a category such as vacation or sick leave.
//! [`WorkMonth`] is the computed monthly view: one [`WorkDay`] per calendar
//! day plus the sums the reporting screens and the export need. Work months
//! are never persisted, they are recomputed from the raw work and pass
//! records on every read.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use dao::work::{WorkEntity, WorkTypeEntity};
use mockall::automock;
use uuid::Uuid;
use worktime_utils::YearMonth;

use crate::{permission::Authentication, ServiceError};

/// Hours of a full work day, used when hour sums are shown as day counts.
pub const HOURS_IN_DAY: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkType {
    None,
    Vacation,
    SickLeave,
    BusinessTrip,
}

impl WorkType {
    /// Order and labels of the variants as the forms and exports show them.
    pub const ALL: [WorkType; 4] = [
        WorkType::None,
        WorkType::Vacation,
        WorkType::SickLeave,
        WorkType::BusinessTrip,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            WorkType::None => "",
            WorkType::Vacation => "Vacation",
            WorkType::SickLeave => "Sick leave",
            WorkType::BusinessTrip => "Business trip",
        }
    }
}

impl From<&WorkTypeEntity> for WorkType {
    fn from(entity: &WorkTypeEntity) -> Self {
        match entity {
            WorkTypeEntity::None => Self::None,
            WorkTypeEntity::Vacation => Self::Vacation,
            WorkTypeEntity::SickLeave => Self::SickLeave,
            WorkTypeEntity::BusinessTrip => Self::BusinessTrip,
        }
    }
}
impl From<&WorkType> for WorkTypeEntity {
    fn from(work_type: &WorkType) -> Self {
        match work_type {
            WorkType::None => Self::None,
            WorkType::Vacation => Self::Vacation,
            WorkType::SickLeave => Self::SickLeave,
            WorkType::BusinessTrip => Self::BusinessTrip,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Work {
    pub id: Uuid,
    pub username: Arc<str>,
    pub date: time::Date,
    pub hours: Option<f32>,
    pub work_type: WorkType,
    pub hours2: Option<f32>,
    pub work_type2: WorkType,
    pub created: Option<time::PrimitiveDateTime>,
    pub deleted: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}

impl From<&WorkEntity> for Work {
    fn from(entity: &WorkEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username.clone(),
            date: entity.date,
            hours: entity.hours,
            work_type: (&entity.work_type).into(),
            hours2: entity.hours2,
            work_type2: (&entity.work_type2).into(),
            created: Some(entity.created),
            deleted: entity.deleted,
            version: entity.version,
        }
    }
}
impl TryFrom<&Work> for WorkEntity {
    type Error = ServiceError;

    fn try_from(work: &Work) -> Result<Self, Self::Error> {
        Ok(Self {
            id: work.id,
            username: work.username.clone(),
            date: work.date,
            hours: work.hours,
            work_type: (&work.work_type).into(),
            hours2: work.hours2,
            work_type2: (&work.work_type2).into(),
            created: work.created.ok_or(ServiceError::InternalError)?,
            deleted: work.deleted,
            version: work.version,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkDayType {
    Workday,
    Weekend,
    NationalHoliday,
}

/// A swipe-derived timestamp. `corrected` marks values that were edited
/// manually after the fact and are rendered greyed out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkHour {
    pub date_time: time::PrimitiveDateTime,
    pub corrected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkDay {
    pub date: time::Date,
    pub day_type: WorkDayType,
    /// Name of the national holiday falling on this date, if any.
    pub holiday: Option<Arc<str>>,
    pub work_start: Option<WorkHour>,
    pub lunch_start: Option<WorkHour>,
    pub lunch_end: Option<WorkHour>,
    pub work_end: Option<WorkHour>,
    pub worked_hours: Option<f32>,
    pub work: Option<Work>,
}

/// Hours declared for one work type summed over a month.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkSum {
    pub work_type: WorkType,
    pub hours: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkMonth {
    pub year: i32,
    pub month: u8,
    /// Expected workdays: days that are neither weekend nor national holiday.
    pub sum_work_days: u32,
    /// Workdays strictly before today that already have a work record,
    /// 0 unless the month is the current one. Drives the partial-month
    /// display.
    pub elapsed_work_days: u32,
    /// National holidays that fall on weekdays.
    pub sum_holidays: u32,
    /// Days with at least one pass record.
    pub sum_on_site_days: u32,
    pub sums: Arc<[WorkSum]>,
    pub work_days: Arc<[WorkDay]>,
}

#[automock(type Context=();)]
#[async_trait]
pub trait WorkService {
    type Context: Clone + Debug + PartialEq + Eq + Send + Sync + 'static;

    /// The full month view for one employee: every calendar day of the
    /// month in ascending order with day type, swipe times, the attached
    /// work record and the monthly sums.
    async fn get_work_days(
        &self,
        month: YearMonth,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<WorkMonth, ServiceError>;

    /// Upserts a work record, keyed by `id` when set, by `(date, username)`
    /// otherwise. Slot combinations and the editable window are validated
    /// before anything is written.
    async fn set_work(
        &self,
        work: &Work,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<Work, ServiceError>;
}
