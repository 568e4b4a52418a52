use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// The requester's username, taken from the `role` query parameter.
///
/// The legacy intranet proxy authenticates users upstream and forwards the
/// account name in the query string, so there is no session handling here.
/// `None` means the parameter was missing and only public endpoints work.
pub type Context = Option<Arc<str>>;

pub async fn context_extractor(mut request: Request, next: Next) -> Response {
    let role: Context = request.uri().query().and_then(|query| {
        query.split('&').find_map(|pair| {
            pair.split_once('=').and_then(|(key, value)| {
                (key == "role" && !value.is_empty()).then(|| Arc::from(value))
            })
        })
    });
    request.extensions_mut().insert(role);
    next.run(request).await
}
