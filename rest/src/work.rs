use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};
use rest_types::{UserInfoTO, WorkMonthTO, WorkTO, WorkUpdateTO};
use serde::Deserialize;
use service::clock::ClockService;
use service::export::ExportService;
use service::month_html::MonthHtmlService;
use service::user_info::UserInfoService;
use service::work::{Work, WorkService};
use tracing::instrument;
use utoipa::{IntoParams, OpenApi};
use uuid::Uuid;
use worktime_utils::YearMonth;

use crate::{error_handler, Context, RestError, RestStateDef, RoString};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/", get(get_work::<RestState>))
        .route("/users", get(get_work_users::<RestState>))
        .route("/export", post(export_work::<RestState>))
        .route("/html", get(get_work_html::<RestState>))
        .route("/update", post(update_work::<RestState>))
}

#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkQueryParams {
    /// Username of the requester, forwarded by the intranet proxy.
    #[param(example = "jdoe")]
    pub role: Option<String>,

    /// Employee to look at. Defaults to the requester.
    #[param(example = "jdoe")]
    pub username: Option<String>,

    #[param(example = "2024")]
    pub year: Option<i32>,

    #[param(example = "3")]
    pub month: Option<u8>,
}

/// Subject of the request: the `username` parameter when present, the
/// requester otherwise.
fn resolve_subject(params: &WorkQueryParams, context: &Context) -> Result<Arc<str>, RestError> {
    match (&params.username, context) {
        (Some(username), _) => Ok(username.as_str().into()),
        (None, Some(requester)) => Ok(requester.clone()),
        (None, None) => Err(service::ServiceError::Forbidden.into()),
    }
}

/// Month of the request, falling back to the server clock's current
/// month so the default agrees with the editable-window checks.
fn resolve_month(params: &WorkQueryParams, today: time::Date) -> Result<YearMonth, RestError> {
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or(today.month() as u8);
    let month = YearMonth::new(year, month).map_err(service::ServiceError::from)?;
    Ok(month)
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "",
    tags = ["Work"],
    params(WorkQueryParams),
    responses(
        (status = 200, description = "Aggregated month of one employee", body = WorkMonthTO),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Unknown user"),
    ),
)]
pub async fn get_work<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(params): Query<WorkQueryParams>,
) -> Response {
    error_handler(
        (async {
            let subject = resolve_subject(&params, &context)?;
            let month = resolve_month(&params, rest_state.clock_service().date_now())?;
            let work_month = WorkMonthTO::from(
                &rest_state
                    .work_service()
                    .get_work_days(month, subject.as_ref(), context.into())
                    .await?,
            );
            Ok(Response::builder()
                .status(200)
                .header("Content-Type", "application/json")
                .body(Body::new(serde_json::to_string(&work_month).unwrap()))
                .unwrap())
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/users",
    tags = ["Work"],
    responses(
        (status = 200, description = "Employees visible to the requester", body = [UserInfoTO]),
    ),
)]
pub async fn get_work_users<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
) -> Response {
    error_handler(
        (async {
            let users: Vec<UserInfoTO> = rest_state
                .user_info_service()
                .get_work_users(context.into())
                .await?
                .iter()
                .map(UserInfoTO::from)
                .collect();
            Ok(Response::builder()
                .status(200)
                .header("Content-Type", "application/json")
                .body(Body::new(serde_json::to_string(&users).unwrap()))
                .unwrap())
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    post,
    path = "/export",
    tags = ["Work"],
    params(WorkQueryParams),
    responses(
        (status = 200, description = "Month spreadsheet download"),
        (status = 403, description = "Forbidden"),
    ),
)]
pub async fn export_work<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(params): Query<WorkQueryParams>,
) -> Response {
    error_handler(
        (async {
            let subject = resolve_subject(&params, &context)?;
            let month = resolve_month(&params, rest_state.clock_service().date_now())?;
            let bytes = rest_state
                .export_service()
                .export_work_days(month, subject.as_ref(), context.into())
                .await?;
            let filename = format!("{month}-{subject}.xlsx");
            Ok(Response::builder()
                .status(200)
                .header(
                    "Content-Type",
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                )
                .header(
                    "Content-Disposition",
                    format!("attachment; filename={filename}"),
                )
                .body(Body::from(bytes.to_vec()))
                .unwrap())
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/html",
    tags = ["Work"],
    params(WorkQueryParams),
    responses(
        (status = 200, description = "Deprecated HTML month view"),
        (status = 403, description = "Forbidden"),
    ),
)]
pub async fn get_work_html<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(params): Query<WorkQueryParams>,
) -> Response {
    error_handler(
        (async {
            let subject = resolve_subject(&params, &context)?;
            let month = resolve_month(&params, rest_state.clock_service().date_now())?;
            let html = rest_state
                .month_html_service()
                .render_month(month, subject.as_ref(), context.into())
                .await?;
            Ok(RoString::from(html).into())
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    post,
    path = "/update",
    tags = ["Work"],
    params(WorkQueryParams),
    request_body = WorkUpdateTO,
    responses(
        (status = 200, description = "Stored work record", body = WorkTO),
        (status = 400, description = "Neither id nor date given"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation failed"),
    ),
)]
pub async fn update_work<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(params): Query<WorkQueryParams>,
    Json(update): Json<WorkUpdateTO>,
) -> Response {
    error_handler(
        (async {
            let subject = resolve_subject(&params, &context)?;
            if update.id.is_nil() && update.date.is_none() {
                return Err(RestError::MissingRecordKey);
            }
            // The date is ignored when the id selects the record.
            let work = Work {
                id: update.id,
                username: subject.clone(),
                date: update.date.unwrap_or(time::Date::MIN),
                hours: update.hours,
                work_type: update.work_type.into(),
                hours2: update.hours2,
                work_type2: update.work_type2.into(),
                created: None,
                deleted: None,
                version: Uuid::nil(),
            };
            let stored = WorkTO::from(
                &rest_state
                    .work_service()
                    .set_work(&work, subject.as_ref(), context.into())
                    .await?,
            );
            Ok(Response::builder()
                .status(200)
                .header("Content-Type", "application/json")
                .body(Body::new(serde_json::to_string(&stored).unwrap()))
                .unwrap())
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(get_work, get_work_users, export_work, get_work_html, update_work),
    components(schemas(WorkMonthTO, WorkTO, WorkUpdateTO, UserInfoTO))
)]
pub struct WorkApiDoc;
