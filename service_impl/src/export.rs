use std::sync::Arc;

use async_trait::async_trait;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use service::export::ExportService;
use service::permission::Authentication;
use service::work::{WorkDay, WorkDayType, WorkHour, WorkMonth, HOURS_IN_DAY};
use service::ServiceError;
use time::macros::format_description;
use worktime_utils::YearMonth;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]");

pub struct ExportServiceImpl<WorkService, UserInfoService>
where
    WorkService: service::work::WorkService + Send + Sync,
    UserInfoService: service::user_info::UserInfoService<Context = WorkService::Context>
        + Send
        + Sync,
{
    pub work_service: Arc<WorkService>,
    pub user_info_service: Arc<UserInfoService>,
}
impl<WorkService, UserInfoService> ExportServiceImpl<WorkService, UserInfoService>
where
    WorkService: service::work::WorkService + Send + Sync,
    UserInfoService: service::user_info::UserInfoService<Context = WorkService::Context>
        + Send
        + Sync,
{
    pub fn new(work_service: Arc<WorkService>, user_info_service: Arc<UserInfoService>) -> Self {
        Self {
            work_service,
            user_info_service,
        }
    }
}

fn export_error(err: XlsxError) -> ServiceError {
    ServiceError::ExportFailed(err.to_string().into())
}

fn day_type_label(day: &WorkDay) -> &str {
    match day.day_type {
        WorkDayType::Workday => "",
        WorkDayType::Weekend => "Weekend",
        WorkDayType::NationalHoliday => day.holiday.as_deref().unwrap_or("Holiday"),
    }
}

fn format_hour(hour: Option<&WorkHour>) -> String {
    hour.and_then(|hour| hour.date_time.time().format(TIME_FORMAT).ok())
        .unwrap_or_default()
}

/// Renders one month into a spreadsheet, one row per calendar day
/// followed by the summary block the paper reports used to carry.
fn render_workbook(
    month: YearMonth,
    work_month: &WorkMonth,
    fond: Option<f32>,
) -> Result<Vec<u8>, ServiceError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(month.to_string()).map_err(export_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);
    let hours_format = Format::new().set_num_format("0.00");
    let bold_format = Format::new().set_bold();

    let headers = [
        "Date",
        "Day",
        "Start",
        "Lunch from",
        "Lunch to",
        "End",
        "Total",
        "Hours",
        "Type",
        "Hours 2",
        "Type 2",
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(export_error)?;
    }
    worksheet.set_column_width(0, 12).map_err(export_error)?;
    worksheet.set_column_width(1, 10).map_err(export_error)?;
    for col in 2u16..7 {
        worksheet.set_column_width(col, 10).map_err(export_error)?;
    }
    worksheet.set_column_width(8, 14).map_err(export_error)?;
    worksheet.set_column_width(10, 14).map_err(export_error)?;

    for (idx, day) in work_month.work_days.iter().enumerate() {
        let row = (idx + 1) as u32;
        write_day_row(worksheet, row, day).map_err(export_error)?;
    }

    let mut row = work_month.work_days.len() as u32 + 2;
    let work_days = match fond {
        Some(fond) => work_month.sum_work_days as f32 * fond,
        None => work_month.sum_work_days as f32,
    };
    let mut summary: Vec<(&str, f32)> = vec![
        ("Work days", work_days),
        ("Elapsed work days", work_month.elapsed_work_days as f32),
        ("Holidays", work_month.sum_holidays as f32),
        ("On-site days", work_month.sum_on_site_days as f32),
    ];
    for sum in work_month.sums.iter() {
        summary.push((sum.work_type.description(), sum.hours / HOURS_IN_DAY));
    }
    for (label, value) in summary {
        worksheet
            .write_string_with_format(row, 0, label, &bold_format)
            .map_err(export_error)?;
        worksheet
            .write_number_with_format(row, 1, value as f64, &hours_format)
            .map_err(export_error)?;
        row += 1;
    }

    worksheet.set_freeze_panes(1, 0).map_err(export_error)?;

    workbook.save_to_buffer().map_err(export_error)
}

fn write_day_row(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    day: &WorkDay,
) -> Result<(), XlsxError> {
    let date = day
        .date
        .format(DATE_FORMAT)
        .unwrap_or_else(|_| day.date.to_string());
    worksheet.write_string(row, 0, date)?;
    worksheet.write_string(row, 1, day_type_label(day))?;
    for (col, hour) in [
        (2, day.work_start.as_ref()),
        (3, day.lunch_start.as_ref()),
        (4, day.lunch_end.as_ref()),
        (5, day.work_end.as_ref()),
    ] {
        worksheet.write_string(row, col, format_hour(hour))?;
    }
    if let Some(hours) = day.worked_hours {
        let hours_format = Format::new().set_num_format("0.00");
        worksheet.write_number_with_format(row, 6, hours as f64, &hours_format)?;
    }
    if let Some(work) = &day.work {
        if let Some(hours) = work.hours {
            worksheet.write_number(row, 7, hours as f64)?;
        }
        worksheet.write_string(row, 8, work.work_type.description())?;
        if let Some(hours) = work.hours2 {
            worksheet.write_number(row, 9, hours as f64)?;
        }
        worksheet.write_string(row, 10, work.work_type2.description())?;
    }
    Ok(())
}

#[async_trait]
impl<WorkService, UserInfoService> ExportService
    for ExportServiceImpl<WorkService, UserInfoService>
where
    WorkService: service::work::WorkService + Send + Sync,
    UserInfoService: service::user_info::UserInfoService<Context = WorkService::Context>
        + Send
        + Sync,
{
    type Context = WorkService::Context;

    async fn export_work_days(
        &self,
        month: YearMonth,
        username: &str,
        context: Authentication<Self::Context>,
    ) -> Result<Arc<[u8]>, ServiceError> {
        // Permission and existence checks happen in the aggregation.
        let work_month = self
            .work_service
            .get_work_days(month, username, context)
            .await?;
        let user = self
            .user_info_service
            .get_user(username, Authentication::Full)
            .await?;

        let bytes = render_workbook(month, &work_month, user.fond)?;
        Ok(bytes.into())
    }
}
