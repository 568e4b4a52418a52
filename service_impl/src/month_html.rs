use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use service::month_html::MonthHtmlService;
use service::permission::{Authentication, ADMIN_PRIVILEGE};
use service::work::{WorkDay, WorkDayType, WorkHour, WorkType, HOURS_IN_DAY};
use service::ServiceError;
use tera::Tera;
use time::macros::format_description;
use worktime_utils::YearMonth;

const MONTH_TEMPLATE: &str = include_str!("month.html.tera");

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]");

fn work_type_code(work_type: WorkType) -> &'static str {
    match work_type {
        WorkType::None => "NONE",
        WorkType::Vacation => "VACATION",
        WorkType::SickLeave => "SICK_LEAVE",
        WorkType::BusinessTrip => "BUSINESS_TRIP",
    }
}

fn weekday_label(date: time::Date) -> &'static str {
    match date.weekday() {
        time::Weekday::Monday => "Mon",
        time::Weekday::Tuesday => "Tue",
        time::Weekday::Wednesday => "Wed",
        time::Weekday::Thursday => "Thu",
        time::Weekday::Friday => "Fri",
        time::Weekday::Saturday => "Sat",
        time::Weekday::Sunday => "Sun",
    }
}

fn format_hours(hours: Option<f32>) -> String {
    hours.map(|hours| format!("{hours}")).unwrap_or_default()
}

#[derive(Serialize)]
struct WorkTypeOptionView {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct UserOptionView {
    name: String,
    url: String,
    selected: bool,
}

#[derive(Serialize)]
struct SumView {
    label: &'static str,
    days: f32,
}

#[derive(Serialize, Default)]
struct DayView {
    date: String,
    day_label: &'static str,
    holiday: String,
    css_class: &'static str,
    start: String,
    start_corrected: bool,
    lunch_start: String,
    lunch_start_corrected: bool,
    lunch_end: String,
    lunch_end_corrected: bool,
    end: String,
    end_corrected: bool,
    total: String,
    editable: bool,
    hours: String,
    work_type: &'static str,
    work_type_label: &'static str,
    hours2: String,
    work_type2: &'static str,
    work_type2_label: &'static str,
}

impl DayView {
    fn from_work_day(day: &WorkDay, editable: bool) -> Result<Self, ServiceError> {
        let render_error = |err: time::error::Format| ServiceError::RenderFailed(err.to_string().into());
        let hour = |hour: &Option<WorkHour>| -> Result<(String, bool), ServiceError> {
            match hour {
                Some(hour) => Ok((
                    hour.date_time.time().format(TIME_FORMAT).map_err(render_error)?,
                    hour.corrected,
                )),
                None => Ok((String::new(), false)),
            }
        };
        let (start, start_corrected) = hour(&day.work_start)?;
        let (lunch_start, lunch_start_corrected) = hour(&day.lunch_start)?;
        let (lunch_end, lunch_end_corrected) = hour(&day.lunch_end)?;
        let (end, end_corrected) = hour(&day.work_end)?;
        let (work_type, work_type2) = match &day.work {
            Some(work) => (work.work_type, work.work_type2),
            None => (WorkType::None, WorkType::None),
        };
        Ok(Self {
            date: day.date.format(DATE_FORMAT).map_err(render_error)?,
            day_label: weekday_label(day.date),
            holiday: day.holiday.as_deref().unwrap_or_default().to_string(),
            css_class: match day.day_type {
                WorkDayType::Workday => "",
                WorkDayType::Weekend => "weekend",
                WorkDayType::NationalHoliday => "holiday",
            },
            start,
            start_corrected,
            lunch_start,
            lunch_start_corrected,
            lunch_end,
            lunch_end_corrected,
            end,
            end_corrected,
            total: format_hours(day.worked_hours),
            editable: editable && day.day_type == WorkDayType::Workday,
            hours: format_hours(day.work.as_ref().and_then(|work| work.hours)),
            work_type: work_type_code(work_type),
            work_type_label: work_type.description(),
            hours2: format_hours(day.work.as_ref().and_then(|work| work.hours2)),
            work_type2: work_type_code(work_type2),
            work_type2_label: work_type2.description(),
        })
    }
}

pub struct MonthHtmlServiceImpl<
    WorkService: service::work::WorkService,
    UserInfoService: service::user_info::UserInfoService,
    PermissionService: service::PermissionService,
    ConfigService: service::config::ConfigService,
    ClockService: service::clock::ClockService,
> {
    pub work_service: Arc<WorkService>,
    pub user_info_service: Arc<UserInfoService>,
    pub permission_service: Arc<PermissionService>,
    pub config_service: Arc<ConfigService>,
    pub clock_service: Arc<ClockService>,
}

impl<WorkService, UserInfoService, PermissionService, ConfigService, ClockService>
    MonthHtmlServiceImpl<WorkService, UserInfoService, PermissionService, ConfigService, ClockService>
where
    WorkService: service::work::WorkService + Send + Sync,
    UserInfoService: service::user_info::UserInfoService<Context = WorkService::Context>
        + Send
        + Sync,
    PermissionService: service::PermissionService<Context = WorkService::Context> + Send + Sync,
    ConfigService: service::config::ConfigService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    pub fn new(
        work_service: Arc<WorkService>,
        user_info_service: Arc<UserInfoService>,
        permission_service: Arc<PermissionService>,
        config_service: Arc<ConfigService>,
        clock_service: Arc<ClockService>,
    ) -> Self {
        Self {
            work_service,
            user_info_service,
            permission_service,
            config_service,
            clock_service,
        }
    }
}

fn html_url(base: &str, role: &str, username: &str, month: YearMonth) -> String {
    format!(
        "{base}/api/work/html?role={role}&username={username}&year={year}&month={month}",
        year = month.year(),
        month = month.month_number(),
    )
}

#[async_trait]
impl<WorkService, UserInfoService, PermissionService, ConfigService, ClockService> MonthHtmlService
    for MonthHtmlServiceImpl<
        WorkService,
        UserInfoService,
        PermissionService,
        ConfigService,
        ClockService,
    >
where
    WorkService: service::work::WorkService + Send + Sync,
    UserInfoService: service::user_info::UserInfoService<Context = WorkService::Context>
        + Send
        + Sync,
    PermissionService: service::PermissionService<Context = WorkService::Context> + Send + Sync,
    ConfigService: service::config::ConfigService + Send + Sync,
    ClockService: service::clock::ClockService + Send + Sync,
{
    type Context = WorkService::Context;

    async fn render_month(
        &self,
        month: YearMonth,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<str>, ServiceError> {
        // Access is enforced by the aggregation call.
        let work_month = self
            .work_service
            .get_work_days(month, username, context.clone())
            .await?;
        let visible_users = self
            .user_info_service
            .get_work_users(context.clone())
            .await?;
        let user = self
            .user_info_service
            .get_user(username, Authentication::Full)
            .await?;
        let admin = self
            .permission_service
            .check_permission(ADMIN_PRIVILEGE, context.clone())
            .await
            .is_ok();
        let role = self
            .permission_service
            .current_user(context)
            .await?
            .unwrap_or_else(|| username.into());
        let config = self.config_service.get_config().await?;
        let base: &str = if config.legacy_redirect {
            ""
        } else {
            config.api_base_url.as_ref()
        };

        let today = self.clock_service.date_now();
        let current = YearMonth::from_date(today);
        let editable = month == current || month == current.previous();

        let days = work_month
            .work_days
            .iter()
            .map(|day| DayView::from_work_day(day, editable))
            .collect::<Result<Vec<_>, _>>()?;
        let sums: Vec<SumView> = work_month
            .sums
            .iter()
            .map(|sum| SumView {
                label: sum.work_type.description(),
                days: sum.hours / HOURS_IN_DAY,
            })
            .collect();
        let users: Vec<UserOptionView> = visible_users
            .iter()
            .map(|visible| UserOptionView {
                name: visible.name.to_string(),
                url: html_url(base, role.as_ref(), visible.username.as_ref(), month),
                selected: visible.username.as_ref() == username,
            })
            .collect();
        let work_types: Vec<WorkTypeOptionView> = WorkType::ALL
            .iter()
            .map(|work_type| WorkTypeOptionView {
                value: work_type_code(*work_type),
                label: work_type.description(),
            })
            .collect();
        let sum_work_days = match user.fond {
            Some(fond) => work_month.sum_work_days as f32 * fond,
            None => work_month.sum_work_days as f32,
        };

        let mut tera_context = tera::Context::new();
        tera_context.insert("name", user.name.as_ref());
        tera_context.insert("month_label", &month.to_string());
        tera_context.insert("prev_url", &html_url(base, role.as_ref(), username, month.previous()));
        tera_context.insert("prev_label", &month.previous().to_string());
        tera_context.insert("next_url", &html_url(base, role.as_ref(), username, month.next()));
        tera_context.insert("next_label", &month.next().to_string());
        tera_context.insert("users", &users);
        tera_context.insert("days", &days);
        tera_context.insert("work_types", &work_types);
        tera_context.insert("sums", &sums);
        tera_context.insert("sum_work_days", &sum_work_days);
        tera_context.insert("elapsed_work_days", &work_month.elapsed_work_days);
        tera_context.insert("sum_holidays", &work_month.sum_holidays);
        tera_context.insert("sum_on_site_days", &work_month.sum_on_site_days);
        tera_context.insert("admin", &admin);
        tera_context.insert(
            "export_url",
            &format!(
                "{base}/api/work/export?role={role}&username={username}&year={year}&month={month}",
                year = month.year(),
                month = month.month_number(),
            ),
        );
        tera_context.insert(
            "update_url",
            &format!("{base}/api/work/update?role={role}&username={username}"),
        );

        let mut tera = Tera::default();
        let rendered = tera
            .render_str(MONTH_TEMPLATE, &tera_context)
            .map_err(|err| ServiceError::RenderFailed(err.to_string().into()))?;
        Ok(Arc::from(rendered))
    }
}
