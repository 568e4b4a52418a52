use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use dao::pass::{PassDirectionEntity, PassEntity};
use dao::work::WorkEntity;
use service::permission::Authentication;
use service::work::{
    Work, WorkDay, WorkDayType, WorkHour, WorkMonth, WorkService, WorkSum, WorkType,
};
use service::{ServiceError, ValidationFailureItem};
use time::Weekday;
use worktime_utils::YearMonth;

use crate::permission::check_self_or_admin;

const WORK_SERVICE_PROCESS: &str = "work-service";

pub struct WorkServiceImpl<
    WorkDao: dao::work::WorkDao,
    PassDao: dao::pass::PassDao,
    HolidayDao: dao::holiday::HolidayDao,
    UserInfoService: service::user_info::UserInfoService,
    PermissionService: service::PermissionService,
    ClockService: service::clock::ClockService,
    UuidService: service::uuid_service::UuidService,
> {
    pub work_dao: Arc<WorkDao>,
    pub pass_dao: Arc<PassDao>,
    pub holiday_dao: Arc<HolidayDao>,
    pub user_info_service: Arc<UserInfoService>,
    pub permission_service: Arc<PermissionService>,
    pub clock_service: Arc<ClockService>,
    pub uuid_service: Arc<UuidService>,
}

impl<WorkDao, PassDao, HolidayDao, UserInfoService, PermissionService, ClockService, UuidService>
    WorkServiceImpl<
        WorkDao,
        PassDao,
        HolidayDao,
        UserInfoService,
        PermissionService,
        ClockService,
        UuidService,
    >
where
    WorkDao: dao::work::WorkDao + Sync + Send,
    PassDao: dao::pass::PassDao + Sync + Send,
    HolidayDao: dao::holiday::HolidayDao + Sync + Send,
    UserInfoService: service::user_info::UserInfoService + Sync + Send,
    PermissionService: service::PermissionService + Sync + Send,
    ClockService: service::clock::ClockService + Sync + Send,
    UuidService: service::uuid_service::UuidService + Sync + Send,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        work_dao: Arc<WorkDao>,
        pass_dao: Arc<PassDao>,
        holiday_dao: Arc<HolidayDao>,
        user_info_service: Arc<UserInfoService>,
        permission_service: Arc<PermissionService>,
        clock_service: Arc<ClockService>,
        uuid_service: Arc<UuidService>,
    ) -> Self {
        Self {
            work_dao,
            pass_dao,
            holiday_dao,
            user_info_service,
            permission_service,
            clock_service,
            uuid_service,
        }
    }
}

fn is_weekend(date: time::Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

fn round_hours(hours: f32) -> f32 {
    (hours * 100.0).round() / 100.0
}

#[derive(Default)]
struct DayTimes {
    work_start: Option<WorkHour>,
    lunch_start: Option<WorkHour>,
    lunch_end: Option<WorkHour>,
    work_end: Option<WorkHour>,
    worked_hours: Option<f32>,
}

fn as_work_hour(pass: &PassEntity) -> WorkHour {
    WorkHour {
        date_time: pass.date_time,
        corrected: pass.corrected,
    }
}

/// Derives the displayed day times from one day of swipes, sorted
/// ascending: first inbound swipe opens the day, last outbound swipe
/// closes it, and the first out/in pair in between is the lunch window.
fn swipe_times(day_passes: &[PassEntity]) -> DayTimes {
    let mut times = DayTimes::default();

    let first_in = day_passes
        .iter()
        .position(|pass| pass.direction == PassDirectionEntity::In);
    let last_out = day_passes
        .iter()
        .rposition(|pass| pass.direction == PassDirectionEntity::Out);

    if let Some(start_idx) = first_in {
        times.work_start = Some(as_work_hour(&day_passes[start_idx]));
    }

    let (Some(start_idx), Some(end_idx)) = (first_in, last_out) else {
        return times;
    };
    if start_idx >= end_idx {
        return times;
    }
    times.work_end = Some(as_work_hour(&day_passes[end_idx]));

    for i in (start_idx + 1)..end_idx {
        if day_passes[i].direction == PassDirectionEntity::Out
            && day_passes[i + 1].direction == PassDirectionEntity::In
        {
            times.lunch_start = Some(as_work_hour(&day_passes[i]));
            times.lunch_end = Some(as_work_hour(&day_passes[i + 1]));
            break;
        }
    }

    let span = day_passes[end_idx].date_time - day_passes[start_idx].date_time;
    let lunch = match (&times.lunch_start, &times.lunch_end) {
        (Some(lunch_start), Some(lunch_end)) => lunch_end.date_time - lunch_start.date_time,
        _ => time::Duration::ZERO,
    };
    times.worked_hours = Some(round_hours((span - lunch).as_seconds_f32() / 3600.0));

    times
}

/// Hour totals per work type over both slots of every record.
fn sum_hours_by_type(works: &[WorkEntity]) -> Arc<[WorkSum]> {
    WorkType::ALL
        .iter()
        .filter(|work_type| **work_type != WorkType::None)
        .map(|work_type| {
            let hours = works
                .iter()
                .flat_map(|work| {
                    [
                        (WorkType::from(&work.work_type), work.hours),
                        (WorkType::from(&work.work_type2), work.hours2),
                    ]
                })
                .filter(|(slot_type, _)| slot_type == work_type)
                .filter_map(|(_, hours)| hours)
                .sum();
            WorkSum {
                work_type: *work_type,
                hours,
            }
        })
        .collect()
}

fn validate_slot(slot: u8, hours: Option<f32>, work_type: WorkType, failures: &mut Vec<ValidationFailureItem>) {
    match (hours, work_type) {
        (Some(_), WorkType::None) => failures.push(ValidationFailureItem::HoursWithoutType(slot)),
        (None, work_type) if work_type != WorkType::None => {
            failures.push(ValidationFailureItem::TypeWithoutHours(slot))
        }
        _ => {}
    }
    if let Some(hours) = hours {
        if hours <= 0.0 || hours > 24.0 {
            failures.push(ValidationFailureItem::HoursOutOfRange(slot));
        }
    }
}

/// Records may only be edited for the current and the previous month.
fn check_editable_window(date: time::Date, today: time::Date) -> Result<(), ServiceError> {
    let current = YearMonth::from_date(today);
    let month = YearMonth::from_date(date);
    if month == current || month == current.previous() {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(Arc::from([
            ValidationFailureItem::OutsideEditableWindow(date),
        ])))
    }
}

#[async_trait]
impl<WorkDao, PassDao, HolidayDao, UserInfoService, PermissionService, ClockService, UuidService>
    WorkService
    for WorkServiceImpl<
        WorkDao,
        PassDao,
        HolidayDao,
        UserInfoService,
        PermissionService,
        ClockService,
        UuidService,
    >
where
    WorkDao: dao::work::WorkDao + Sync + Send,
    PassDao: dao::pass::PassDao + Sync + Send,
    HolidayDao: dao::holiday::HolidayDao + Sync + Send,
    UserInfoService: service::user_info::UserInfoService + Sync + Send,
    PermissionService: service::PermissionService + Sync + Send,
    ClockService: service::clock::ClockService + Sync + Send,
    UuidService: service::uuid_service::UuidService + Sync + Send,
{
    type Context = PermissionService::Context;

    async fn get_work_days(
        &self,
        month: YearMonth,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<WorkMonth, ServiceError> {
        check_self_or_admin(self.permission_service.as_ref(), username, &context).await?;
        self.user_info_service
            .get_user(username, Authentication::Full)
            .await?;

        let works = self
            .work_dao
            .find_by_username_and_month(username, month)
            .await?;
        let passes = self
            .pass_dao
            .find_by_username_and_month(username, month)
            .await?;
        let holidays: HashMap<time::Date, Arc<str>> = self
            .holiday_dao
            .find_by_month(month)
            .await?
            .iter()
            .map(|holiday| (holiday.date, holiday.description.clone()))
            .collect();
        let work_by_date: BTreeMap<time::Date, &WorkEntity> =
            works.iter().map(|work| (work.date, work)).collect();

        let today = self.clock_service.date_now();
        let current_month = YearMonth::from_date(today) == month;

        let mut sum_work_days = 0u32;
        let mut elapsed_work_days = 0u32;
        let mut sum_holidays = 0u32;
        let mut sum_on_site_days = 0u32;
        let mut work_days = Vec::with_capacity(month.len() as usize);

        for date in month.days()? {
            let day_type = if is_weekend(date) {
                WorkDayType::Weekend
            } else if holidays.contains_key(&date) {
                WorkDayType::NationalHoliday
            } else {
                WorkDayType::Workday
            };

            let mut day_passes: Vec<PassEntity> = passes
                .iter()
                .filter(|pass| pass.date_time.date() == date)
                .cloned()
                .collect();
            day_passes.sort_by_key(|pass| pass.date_time);
            if !day_passes.is_empty() {
                sum_on_site_days += 1;
            }
            let times = swipe_times(&day_passes);
            let work = work_by_date.get(&date).map(|entity| Work::from(*entity));

            match day_type {
                WorkDayType::Workday => {
                    sum_work_days += 1;
                    if current_month && date < today && work.is_some() {
                        elapsed_work_days += 1;
                    }
                }
                WorkDayType::NationalHoliday => sum_holidays += 1,
                WorkDayType::Weekend => {}
            }

            work_days.push(WorkDay {
                date,
                day_type,
                holiday: holidays.get(&date).cloned(),
                work_start: times.work_start,
                lunch_start: times.lunch_start,
                lunch_end: times.lunch_end,
                work_end: times.work_end,
                worked_hours: times.worked_hours,
                work,
            });
        }

        Ok(WorkMonth {
            year: month.year(),
            month: month.month_number(),
            sum_work_days,
            elapsed_work_days,
            sum_holidays,
            sum_on_site_days,
            sums: sum_hours_by_type(&works),
            work_days: work_days.into(),
        })
    }

    async fn set_work(
        &self,
        work: &Work,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<Work, ServiceError> {
        check_self_or_admin(self.permission_service.as_ref(), username, &context).await?;
        self.user_info_service
            .get_user(username, Authentication::Full)
            .await?;

        let mut failures = Vec::new();
        validate_slot(1, work.hours, work.work_type, &mut failures);
        validate_slot(2, work.hours2, work.work_type2, &mut failures);
        if !failures.is_empty() {
            return Err(ServiceError::ValidationError(failures.into()));
        }

        let today = self.clock_service.date_now();

        if !work.id.is_nil() {
            let mut entity = self
                .work_dao
                .find_by_id(work.id)
                .await?
                .filter(|entity| entity.deleted.is_none())
                .ok_or(ServiceError::EntityNotFound(work.id))?;
            if entity.username.as_ref() != username {
                return Err(ServiceError::Forbidden);
            }
            check_editable_window(entity.date, today)?;
            entity.hours = work.hours;
            entity.work_type = (&work.work_type).into();
            entity.hours2 = work.hours2;
            entity.work_type2 = (&work.work_type2).into();
            entity.version = self.uuid_service.new_uuid("WorkService::update version");
            self.work_dao.update(&entity, WORK_SERVICE_PROCESS).await?;
            return Ok(Work::from(&entity));
        }

        check_editable_window(work.date, today)?;

        if let Some(mut entity) = self
            .work_dao
            .find_by_username_and_date(username, work.date)
            .await?
        {
            entity.hours = work.hours;
            entity.work_type = (&work.work_type).into();
            entity.hours2 = work.hours2;
            entity.work_type2 = (&work.work_type2).into();
            entity.version = self.uuid_service.new_uuid("WorkService::update version");
            self.work_dao.update(&entity, WORK_SERVICE_PROCESS).await?;
            return Ok(Work::from(&entity));
        }

        let entity = WorkEntity {
            id: self.uuid_service.new_uuid("WorkService::create id"),
            username: username.into(),
            date: work.date,
            hours: work.hours,
            work_type: (&work.work_type).into(),
            hours2: work.hours2,
            work_type2: (&work.work_type2).into(),
            created: self.clock_service.date_time_now(),
            deleted: None,
            version: self.uuid_service.new_uuid("WorkService::create version"),
        };
        self.work_dao.create(&entity, WORK_SERVICE_PROCESS).await?;
        Ok(Work::from(&entity))
    }
}
