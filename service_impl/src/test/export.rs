use std::sync::Arc;

use super::error_test::*;
use service::{
    export::ExportService,
    user_info::{MockUserInfoService, UserInfo},
    work::{
        MockWorkService, Work, WorkDay, WorkDayType, WorkHour, WorkMonth, WorkSum, WorkType,
    },
};
use time::{Date, Month, PrimitiveDateTime, Time};
use uuid::uuid;
use worktime_utils::YearMonth;

use crate::export::ExportServiceImpl;

fn at(day: u8, hour: u8, minute: u8) -> PrimitiveDateTime {
    PrimitiveDateTime::new(
        Date::from_calendar_date(2024, Month::March, day).unwrap(),
        Time::from_hms(hour, minute, 0).unwrap(),
    )
}

fn hour(day: u8, hour: u8, minute: u8) -> Option<WorkHour> {
    Some(WorkHour {
        date_time: at(day, hour, minute),
        corrected: false,
    })
}

pub fn sample_month() -> WorkMonth {
    let friday = WorkDay {
        date: Date::from_calendar_date(2024, Month::March, 1).unwrap(),
        day_type: WorkDayType::Workday,
        holiday: None,
        work_start: hour(1, 8, 0),
        lunch_start: hour(1, 12, 0),
        lunch_end: hour(1, 12, 30),
        work_end: hour(1, 16, 30),
        worked_hours: Some(8.0),
        work: None,
    };
    let saturday = WorkDay {
        date: Date::from_calendar_date(2024, Month::March, 2).unwrap(),
        day_type: WorkDayType::Weekend,
        holiday: None,
        work_start: None,
        lunch_start: None,
        lunch_end: None,
        work_end: None,
        worked_hours: None,
        work: None,
    };
    let monday = WorkDay {
        date: Date::from_calendar_date(2024, Month::March, 4).unwrap(),
        day_type: WorkDayType::Workday,
        holiday: None,
        work_start: None,
        lunch_start: None,
        lunch_end: None,
        work_end: None,
        worked_hours: None,
        work: Some(Work {
            id: uuid!("35C4CE5E-E37A-4C35-9C1D-0E5B76A1A3BB"),
            username: "jdoe".into(),
            date: Date::from_calendar_date(2024, Month::March, 4).unwrap(),
            hours: Some(8.0),
            work_type: WorkType::Vacation,
            hours2: None,
            work_type2: WorkType::None,
            created: Some(generate_default_datetime()),
            deleted: None,
            version: uuid!("9E4B7A5F-5D90-4C6A-9232-33ECAE9A63F2"),
        }),
    };
    let good_friday = WorkDay {
        date: Date::from_calendar_date(2024, Month::March, 29).unwrap(),
        day_type: WorkDayType::NationalHoliday,
        holiday: Some("Good Friday".into()),
        work_start: None,
        lunch_start: None,
        lunch_end: None,
        work_end: None,
        worked_hours: None,
        work: None,
    };
    WorkMonth {
        year: 2024,
        month: 3,
        sum_work_days: 21,
        elapsed_work_days: 10,
        sum_holidays: 1,
        sum_on_site_days: 1,
        sums: Arc::from([
            WorkSum {
                work_type: WorkType::Vacation,
                hours: 8.0,
            },
            WorkSum {
                work_type: WorkType::SickLeave,
                hours: 0.0,
            },
            WorkSum {
                work_type: WorkType::BusinessTrip,
                hours: 0.0,
            },
        ]),
        work_days: Arc::from([friday, saturday, monday, good_friday]),
    }
}

fn build_service(
    fond: Option<f32>,
) -> ExportServiceImpl<MockWorkService, MockUserInfoService> {
    let mut work_service = MockWorkService::new();
    work_service
        .expect_get_work_days()
        .returning(|_, _, _| Ok(sample_month()));
    let mut user_info_service = MockUserInfoService::new();
    user_info_service.expect_get_user().returning(move |username, _| {
        Ok(UserInfo {
            username: username.into(),
            name: "John Doe".into(),
            admin: false,
            fond,
        })
    });
    ExportServiceImpl::new(work_service.into(), user_info_service.into())
}

#[tokio::test]
async fn test_export_produces_spreadsheet() {
    let service = build_service(None);
    let month = YearMonth::new(2024, 3).unwrap();
    let bytes = service
        .export_work_days(month, "jdoe", ().auth())
        .await
        .unwrap();
    // An xlsx file is a zip archive.
    assert!(bytes.len() > 4);
    assert_eq!(b"PK", &bytes[0..2]);
}

#[tokio::test]
async fn test_export_with_fond_adjustment() {
    let service = build_service(Some(0.5));
    let month = YearMonth::new(2024, 3).unwrap();
    let bytes = service
        .export_work_days(month, "jdoe", ().auth())
        .await
        .unwrap();
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn test_export_propagates_forbidden() {
    let mut work_service = MockWorkService::new();
    work_service
        .expect_get_work_days()
        .returning(|_, _, _| Err(service::ServiceError::Forbidden));
    let user_info_service = MockUserInfoService::new();
    let service = ExportServiceImpl::new(work_service.into(), user_info_service.into());
    let month = YearMonth::new(2024, 3).unwrap();
    let result = service.export_work_days(month, "asmith", ().auth()).await;
    test_forbidden(&result);
}
