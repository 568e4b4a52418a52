use axum::{
    body::Body,
    extract::{Query, State},
    response::Response,
    routing::get,
    Extension, Router,
};
use rest_types::{PassPageTO, PassTO};
use serde::Deserialize;
use service::pass::PassService;
use tracing::instrument;
use utoipa::{IntoParams, OpenApi};

use crate::{error_handler, Context, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/", get(get_pass::<RestState>))
        .route("/onsite", get(get_pass_onsite::<RestState>))
}

#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PassQueryParams {
    /// Username of the requester, forwarded by the intranet proxy.
    #[param(example = "jdoe")]
    pub role: Option<String>,

    /// Restrict to one employee. Non-admins only ever see their own
    /// records; an absent filter lists everyone for admins.
    #[param(example = "jdoe")]
    pub username: Option<String>,

    /// Restrict to one swipe-terminal usercode. Admin only.
    #[param(example = "1002")]
    pub usercode: Option<i64>,

    #[param(example = "0")]
    pub page: Option<u32>,
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "",
    tags = ["Pass"],
    params(PassQueryParams),
    responses(
        (status = 200, description = "One page of swipe records, newest first", body = PassPageTO),
        (status = 403, description = "Forbidden"),
    ),
)]
pub async fn get_pass<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(params): Query<PassQueryParams>,
) -> Response {
    error_handler(
        (async {
            let page = PassPageTO::from(
                &rest_state
                    .pass_service()
                    .get_pass(
                        params.username.as_deref(),
                        params.usercode,
                        params.page.unwrap_or(0),
                        context.into(),
                    )
                    .await?,
            );
            Ok(Response::builder()
                .status(200)
                .header("Content-Type", "application/json")
                .body(Body::new(serde_json::to_string(&page).unwrap()))
                .unwrap())
        })
        .await,
    )
}

#[instrument(skip(rest_state))]
#[utoipa::path(
    get,
    path = "/onsite",
    tags = ["Pass"],
    responses(
        (status = 200, description = "Employees currently on site", body = [PassTO]),
        (status = 403, description = "Forbidden"),
    ),
)]
pub async fn get_pass_onsite<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
) -> Response {
    error_handler(
        (async {
            let onsite: Vec<PassTO> = rest_state
                .pass_service()
                .get_pass_onsite(context.into())
                .await?
                .iter()
                .map(PassTO::from)
                .collect();
            Ok(Response::builder()
                .status(200)
                .header("Content-Type", "application/json")
                .body(Body::new(serde_json::to_string(&onsite).unwrap()))
                .unwrap())
        })
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(get_pass, get_pass_onsite),
    components(schemas(PassPageTO, PassTO))
)]
pub struct PassApiDoc;
