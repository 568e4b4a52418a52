#[cfg(test)]
mod integration_test;

use std::sync::Arc;

use dao_impl_sqlite::{
    holiday::HolidayDaoImpl, pass::PassDaoImpl, user_info::UserInfoDaoImpl, work::WorkDaoImpl,
};
use sqlx::SqlitePool;

type WorkDao = WorkDaoImpl;
type PassDao = PassDaoImpl;
type HolidayDao = HolidayDaoImpl;
type UserInfoDao = UserInfoDaoImpl;

type ClockService = service_impl::clock::ClockServiceImpl;
type UuidService = service_impl::uuid_service::UuidServiceImpl;
type ConfigService = service_impl::config::ConfigServiceImpl;
type PermissionService = service_impl::permission::PermissionServiceImpl<UserInfoDao>;
type UserInfoService =
    service_impl::user_info::UserInfoServiceImpl<UserInfoDao, PermissionService>;
type WorkService = service_impl::work::WorkServiceImpl<
    WorkDao,
    PassDao,
    HolidayDao,
    UserInfoService,
    PermissionService,
    ClockService,
    UuidService,
>;
type PassService = service_impl::pass::PassServiceImpl<PassDao, PermissionService, ClockService>;
type ExportService = service_impl::export::ExportServiceImpl<WorkService, UserInfoService>;
type MonthHtmlService = service_impl::month_html::MonthHtmlServiceImpl<
    WorkService,
    UserInfoService,
    PermissionService,
    ConfigService,
    ClockService,
>;

#[derive(Clone)]
pub struct RestStateImpl {
    work_service: Arc<WorkService>,
    user_info_service: Arc<UserInfoService>,
    pass_service: Arc<PassService>,
    export_service: Arc<ExportService>,
    month_html_service: Arc<MonthHtmlService>,
    clock_service: Arc<ClockService>,
}

impl rest::RestStateDef for RestStateImpl {
    type WorkService = WorkService;
    type UserInfoService = UserInfoService;
    type PassService = PassService;
    type ExportService = ExportService;
    type MonthHtmlService = MonthHtmlService;
    type ClockService = ClockService;

    fn work_service(&self) -> Arc<Self::WorkService> {
        self.work_service.clone()
    }
    fn user_info_service(&self) -> Arc<Self::UserInfoService> {
        self.user_info_service.clone()
    }
    fn pass_service(&self) -> Arc<Self::PassService> {
        self.pass_service.clone()
    }
    fn export_service(&self) -> Arc<Self::ExportService> {
        self.export_service.clone()
    }
    fn month_html_service(&self) -> Arc<Self::MonthHtmlService> {
        self.month_html_service.clone()
    }
    fn clock_service(&self) -> Arc<Self::ClockService> {
        self.clock_service.clone()
    }
}

impl RestStateImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        let work_dao = Arc::new(WorkDaoImpl::new(pool.clone()));
        let pass_dao = Arc::new(PassDaoImpl::new(pool.clone()));
        let holiday_dao = Arc::new(HolidayDaoImpl::new(pool.clone()));
        let user_info_dao = Arc::new(UserInfoDaoImpl::new(pool.clone()));

        let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
        let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);
        let config_service = Arc::new(service_impl::config::ConfigServiceImpl);
        let permission_service = Arc::new(
            service_impl::permission::PermissionServiceImpl::new(user_info_dao.clone()),
        );
        let user_info_service = Arc::new(service_impl::user_info::UserInfoServiceImpl::new(
            user_info_dao.clone(),
            permission_service.clone(),
        ));
        let work_service = Arc::new(service_impl::work::WorkServiceImpl::new(
            work_dao.clone(),
            pass_dao.clone(),
            holiday_dao.clone(),
            user_info_service.clone(),
            permission_service.clone(),
            clock_service.clone(),
            uuid_service.clone(),
        ));
        let pass_service = Arc::new(service_impl::pass::PassServiceImpl::new(
            pass_dao.clone(),
            permission_service.clone(),
            clock_service.clone(),
        ));
        let export_service = Arc::new(service_impl::export::ExportServiceImpl::new(
            work_service.clone(),
            user_info_service.clone(),
        ));
        let month_html_service = Arc::new(service_impl::month_html::MonthHtmlServiceImpl::new(
            work_service.clone(),
            user_info_service.clone(),
            permission_service.clone(),
            config_service.clone(),
            clock_service.clone(),
        ));

        Self {
            work_service,
            user_info_service,
            pass_service,
            export_service,
            month_html_service,
            clock_service,
        }
    }
}

#[tokio::main]
async fn main() {
    let version = env!("CARGO_PKG_VERSION");

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .pretty()
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Worktime backend version: {}", version);
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./localdb.sqlite3".to_string());
    let pool = Arc::new(
        SqlitePool::connect(&database_url)
            .await
            .expect("Could not connect to database"),
    );

    sqlx::migrate!("../migrations/sqlite")
        .run(pool.as_ref())
        .await
        .expect("Failed to run migrations");

    let rest_state = RestStateImpl::new(pool.clone());
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    rest::start_server(&bind_address, rest_state).await;
}
