use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkTypeTO {
    #[default]
    None,
    Vacation,
    SickLeave,
    BusinessTrip,
}

#[cfg(feature = "service-impl")]
impl From<service::work::WorkType> for WorkTypeTO {
    fn from(work_type: service::work::WorkType) -> Self {
        match work_type {
            service::work::WorkType::None => Self::None,
            service::work::WorkType::Vacation => Self::Vacation,
            service::work::WorkType::SickLeave => Self::SickLeave,
            service::work::WorkType::BusinessTrip => Self::BusinessTrip,
        }
    }
}
#[cfg(feature = "service-impl")]
impl From<WorkTypeTO> for service::work::WorkType {
    fn from(work_type: WorkTypeTO) -> Self {
        match work_type {
            WorkTypeTO::None => Self::None,
            WorkTypeTO::Vacation => Self::Vacation,
            WorkTypeTO::SickLeave => Self::SickLeave,
            WorkTypeTO::BusinessTrip => Self::BusinessTrip,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkTO {
    #[serde(default)]
    pub id: Uuid,
    pub username: Arc<str>,
    pub date: Date,
    pub hours: Option<f32>,
    pub work_type: WorkTypeTO,
    pub hours2: Option<f32>,
    pub work_type2: WorkTypeTO,
    #[serde(default)]
    pub created: Option<PrimitiveDateTime>,
    #[serde(default)]
    pub deleted: Option<PrimitiveDateTime>,
    #[serde(rename = "$version")]
    #[serde(default)]
    pub version: Uuid,
}
#[cfg(feature = "service-impl")]
impl From<&service::work::Work> for WorkTO {
    fn from(work: &service::work::Work) -> Self {
        Self {
            id: work.id,
            username: work.username.clone(),
            date: work.date,
            hours: work.hours,
            work_type: work.work_type.into(),
            hours2: work.hours2,
            work_type2: work.work_type2.into(),
            created: work.created,
            deleted: work.deleted,
            version: work.version,
        }
    }
}
#[cfg(feature = "service-impl")]
impl From<&WorkTO> for service::work::Work {
    fn from(work: &WorkTO) -> Self {
        Self {
            id: work.id,
            username: work.username.clone(),
            date: work.date,
            hours: work.hours,
            work_type: work.work_type.into(),
            hours2: work.hours2,
            work_type2: work.work_type2.into(),
            created: work.created,
            deleted: work.deleted,
            version: work.version,
        }
    }
}
#[cfg(feature = "service-impl")]
worktime_utils::derive_from_reference!(service::work::Work, WorkTO);

/// Body of the update endpoint. Either `id` or `date` selects the record,
/// everything else is the new slot content.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkUpdateTO {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub hours: Option<f32>,
    #[serde(default)]
    pub work_type: WorkTypeTO,
    #[serde(default)]
    pub hours2: Option<f32>,
    #[serde(default)]
    pub work_type2: WorkTypeTO,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkDayTypeTO {
    Workday,
    Weekend,
    NationalHoliday,
}
#[cfg(feature = "service-impl")]
impl From<service::work::WorkDayType> for WorkDayTypeTO {
    fn from(day_type: service::work::WorkDayType) -> Self {
        match day_type {
            service::work::WorkDayType::Workday => Self::Workday,
            service::work::WorkDayType::Weekend => Self::Weekend,
            service::work::WorkDayType::NationalHoliday => Self::NationalHoliday,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkHourTO {
    pub date_time: PrimitiveDateTime,
    pub corrected: bool,
}
#[cfg(feature = "service-impl")]
impl From<&service::work::WorkHour> for WorkHourTO {
    fn from(hour: &service::work::WorkHour) -> Self {
        Self {
            date_time: hour.date_time,
            corrected: hour.corrected,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkDayTO {
    pub date: Date,
    pub day_type: WorkDayTypeTO,
    pub holiday: Option<Arc<str>>,
    pub work_start: Option<WorkHourTO>,
    pub lunch_start: Option<WorkHourTO>,
    pub lunch_end: Option<WorkHourTO>,
    pub work_end: Option<WorkHourTO>,
    pub worked_hours: Option<f32>,
    pub work: Option<WorkTO>,
}
#[cfg(feature = "service-impl")]
impl From<&service::work::WorkDay> for WorkDayTO {
    fn from(day: &service::work::WorkDay) -> Self {
        Self {
            date: day.date,
            day_type: day.day_type.into(),
            holiday: day.holiday.clone(),
            work_start: day.work_start.as_ref().map(WorkHourTO::from),
            lunch_start: day.lunch_start.as_ref().map(WorkHourTO::from),
            lunch_end: day.lunch_end.as_ref().map(WorkHourTO::from),
            work_end: day.work_end.as_ref().map(WorkHourTO::from),
            worked_hours: day.worked_hours,
            work: day.work.as_ref().map(WorkTO::from),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkSumTO {
    pub work_type: WorkTypeTO,
    pub hours: f32,
}
#[cfg(feature = "service-impl")]
impl From<&service::work::WorkSum> for WorkSumTO {
    fn from(sum: &service::work::WorkSum) -> Self {
        Self {
            work_type: sum.work_type.into(),
            hours: sum.hours,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkMonthTO {
    pub year: i32,
    pub month: u8,
    pub sum_work_days: u32,
    pub elapsed_work_days: u32,
    pub sum_holidays: u32,
    pub sum_on_site_days: u32,
    pub sums: Arc<[WorkSumTO]>,
    pub work_days: Arc<[WorkDayTO]>,
}
#[cfg(feature = "service-impl")]
impl From<&service::work::WorkMonth> for WorkMonthTO {
    fn from(month: &service::work::WorkMonth) -> Self {
        Self {
            year: month.year,
            month: month.month,
            sum_work_days: month.sum_work_days,
            elapsed_work_days: month.elapsed_work_days,
            sum_holidays: month.sum_holidays,
            sum_on_site_days: month.sum_on_site_days,
            sums: month.sums.iter().map(WorkSumTO::from).collect(),
            work_days: month.work_days.iter().map(WorkDayTO::from).collect(),
        }
    }
}
#[cfg(feature = "service-impl")]
worktime_utils::derive_from_reference!(service::work::WorkMonth, WorkMonthTO);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoTO {
    pub username: Arc<str>,
    pub name: Arc<str>,
    pub admin: bool,
    pub fond: Option<f32>,
}
#[cfg(feature = "service-impl")]
impl From<&service::user_info::UserInfo> for UserInfoTO {
    fn from(user: &service::user_info::UserInfo) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            admin: user.admin,
            fond: user.fond,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassDirectionTO {
    In,
    Out,
}
#[cfg(feature = "service-impl")]
impl From<service::pass::PassDirection> for PassDirectionTO {
    fn from(direction: service::pass::PassDirection) -> Self {
        match direction {
            service::pass::PassDirection::In => Self::In,
            service::pass::PassDirection::Out => Self::Out,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassTO {
    pub id: Uuid,
    pub usercode: i64,
    pub username: Arc<str>,
    pub direction: PassDirectionTO,
    pub date_time: PrimitiveDateTime,
    pub corrected: bool,
}
#[cfg(feature = "service-impl")]
impl From<&service::pass::Pass> for PassTO {
    fn from(pass: &service::pass::Pass) -> Self {
        Self {
            id: pass.id,
            usercode: pass.usercode,
            username: pass.username.clone(),
            direction: pass.direction.into(),
            date_time: pass.date_time,
            corrected: pass.corrected,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassPageTO {
    pub items: Arc<[PassTO]>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}
#[cfg(feature = "service-impl")]
impl From<&service::pass::PassPage> for PassPageTO {
    fn from(page: &service::pass::PassPage) -> Self {
        Self {
            items: page.items.iter().map(PassTO::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }
}
#[cfg(feature = "service-impl")]
worktime_utils::derive_from_reference!(service::pass::PassPage, PassPageTO);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_type_codes() {
        assert_eq!(
            "\"SICK_LEAVE\"",
            serde_json::to_string(&WorkTypeTO::SickLeave).unwrap()
        );
        assert_eq!(
            WorkTypeTO::BusinessTrip,
            serde_json::from_str("\"BUSINESS_TRIP\"").unwrap()
        );
    }

    #[test]
    fn test_work_update_defaults() {
        let update: WorkUpdateTO =
            serde_json::from_str(r#"{"date":"2024-03-11","hours":8,"workType":"VACATION"}"#)
                .unwrap();
        assert!(update.id.is_nil());
        assert_eq!(Some(8.0), update.hours);
        assert_eq!(WorkTypeTO::Vacation, update.work_type);
        assert_eq!(WorkTypeTO::None, update.work_type2);
        assert!(update.hours2.is_none());
    }
}
