//! Request extractors with envelope rejections
//!
//! axum's own `Json`, `Query` and `Path` reject with a plain-text body.
//! These wrappers reject with an [`AppError`] (`InvalidRequest`, 400) so a
//! malformed body or id gets the same JSON envelope as every other error.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use shared::error::AppError;

/// JSON body
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

/// Query string
#[derive(Debug, Clone, Copy, Default)]
pub struct AppQuery<T>(pub T);

/// Path parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct AppPath<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                Err(AppError::invalid_request(rejection.body_text()))
            }
        }
    }
}

impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(AppQuery(value)),
            Err(rejection) => Err(AppError::invalid_request(rejection.body_text())),
        }
    }
}

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(AppPath(value)),
            Err(rejection) => Err(AppError::invalid_request(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::routing::{get, post};
    use http::StatusCode;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Deserialize)]
    struct Filter {
        page: Option<u32>,
    }

    fn app() -> Router {
        Router::new()
            .route("/items", post(|AppJson(p): AppJson<Payload>| async move { p.name }))
            .route(
                "/items/{id}",
                get(|AppPath(id): AppPath<i64>| async move { id.to_string() }),
            )
            .route(
                "/search",
                get(|AppQuery(f): AppQuery<Filter>| async move { f.page.unwrap_or(1).to_string() }),
            )
    }

    async fn call(req: http::Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn assert_envelope(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 5);
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_malformed_json_uses_envelope() {
        let req = http::Request::post("/items")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let (status, body) = call(req).await;
        assert_envelope(status, &body);
    }

    #[tokio::test]
    async fn test_missing_content_type_uses_envelope() {
        let req = http::Request::post("/items")
            .body(Body::from("{\"name\": \"x\"}"))
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(body["code"], 5);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_path_and_query_use_envelope() {
        let req = http::Request::get("/items/abc").body(Body::empty()).unwrap();
        let (status, body) = call(req).await;
        assert_envelope(status, &body);

        let req = http::Request::get("/search?page=-3").body(Body::empty()).unwrap();
        let (status, body) = call(req).await;
        assert_envelope(status, &body);
    }

    #[tokio::test]
    async fn test_valid_input_passes_through() {
        let req = http::Request::get("/items/42").body(Body::empty()).unwrap();
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"42");
    }
}
