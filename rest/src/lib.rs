use std::{convert::Infallible, sync::Arc};

mod context;
pub mod pass;
pub mod work;

pub use context::{context_extractor, Context};

use axum::{body::Body, response::Response, Router};
use thiserror::Error;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Zero-copy response body over a shared string, used for the HTML view.
pub struct RoString(Arc<str>, bool);
impl http_body::Body for RoString {
    type Data = bytes::Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Result<http_body::Frame<Self::Data>, Self::Error>>> {
        std::task::Poll::Ready(if self.1 {
            None
        } else {
            self.1 = true;
            Some(Ok(http_body::Frame::data(bytes::Bytes::copy_from_slice(
                self.0.as_bytes(),
            ))))
        })
    }

    fn is_end_stream(&self) -> bool {
        self.1
    }
}
impl From<Arc<str>> for RoString {
    fn from(s: Arc<str>) -> Self {
        RoString(s, false)
    }
}
impl From<RoString> for Response {
    fn from(s: RoString) -> Self {
        Response::builder()
            .status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(Body::new(s))
            .unwrap()
    }
}

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Service error")]
    ServiceError(#[from] service::ServiceError),

    #[error("Either an id or a date must be provided")]
    MissingRecordKey,
}

fn error_handler(result: Result<Response, RestError>) -> Response {
    match result {
        Ok(response) => response,
        Err(err @ RestError::MissingRecordKey) => Response::builder()
            .status(400)
            .body(Body::new(err.to_string()))
            .unwrap(),
        Err(RestError::ServiceError(service::ServiceError::Forbidden)) => {
            Response::builder().status(403).body(Body::empty()).unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::UserNotFound(_))) => {
            Response::builder()
                .status(404)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(service::ServiceError::EntityNotFound(id))) => {
            Response::builder()
                .status(404)
                .body(Body::new(id.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::ValidationError(_))) => {
            Response::builder()
                .status(422)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::DateError(_))) => {
            Response::builder()
                .status(400)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(service::ServiceError::DatabaseQueryError(e))) => {
            Response::builder()
                .status(500)
                .body(Body::new(e.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::ExportFailed(_))) => {
            Response::builder()
                .status(500)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::RenderFailed(_))) => {
            Response::builder()
                .status(500)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(service::ServiceError::InternalError)) => {
            Response::builder().status(500).body(Body::empty()).unwrap()
        }
    }
}

pub trait RestStateDef: Clone + Send + Sync + 'static {
    type WorkService: service::work::WorkService<Context = Context> + Send + Sync + 'static;
    type UserInfoService: service::user_info::UserInfoService<Context = Context>
        + Send
        + Sync
        + 'static;
    type PassService: service::pass::PassService<Context = Context> + Send + Sync + 'static;
    type ExportService: service::export::ExportService<Context = Context> + Send + Sync + 'static;
    type MonthHtmlService: service::month_html::MonthHtmlService<Context = Context>
        + Send
        + Sync
        + 'static;
    type ClockService: service::clock::ClockService + Send + Sync + 'static;

    fn work_service(&self) -> Arc<Self::WorkService>;
    fn user_info_service(&self) -> Arc<Self::UserInfoService>;
    fn pass_service(&self) -> Arc<Self::PassService>;
    fn export_service(&self) -> Arc<Self::ExportService>;
    fn month_html_service(&self) -> Arc<Self::MonthHtmlService>;
    fn clock_service(&self) -> Arc<Self::ClockService>;
}

#[derive(OpenApi)]
#[openapi(nest(
    (path = "/api/work", api = work::WorkApiDoc),
    (path = "/api/pass", api = pass::PassApiDoc),
))]
pub struct ApiDoc;

pub fn generate_router<RestState: RestStateDef>(rest_state: RestState) -> Router {
    Router::new()
        .nest("/api/work", work::generate_route())
        .nest("/api/pass", pass::generate_route())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(context_extractor))
        .with_state(rest_state)
}

pub async fn start_server<RestState: RestStateDef>(bind_address: &str, rest_state: RestState) {
    let app = generate_router(rest_state);
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .expect("Could not bind server");
    tracing::info!("Listening on {}", bind_address);
    axum::serve(listener, app)
        .await
        .expect("Could not start server");
}
