//! Path and query extractors that reject with the `ApiResponse` envelope
//!
//! Plain `axum::extract::{Path, Query}` answer bad input with a text body;
//! these wrappers keep the status axum picks and wrap the message as JSON.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use super::ApiResponse;

pub type ExtractRejection = (StatusCode, Json<ApiResponse<()>>);

pub struct ApiPath<T>(pub T);

pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ExtractRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(path_rejection(rejection)),
        }
    }
}

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ExtractRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

fn path_rejection(rejection: PathRejection) -> ExtractRejection {
    (
        rejection.status(),
        Json(ApiResponse::error(format!("Invalid path: {}", rejection.body_text()))),
    )
}

fn query_rejection(rejection: QueryRejection) -> ExtractRejection {
    (
        rejection.status(),
        Json(ApiResponse::error(format!("Invalid query: {}", rejection.body_text()))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Paging {
        #[allow(dead_code)]
        page: u32,
    }

    async fn by_id(ApiPath(id): ApiPath<i64>) -> String {
        id.to_string()
    }

    async fn paged(ApiQuery(_paging): ApiQuery<Paging>) -> &'static str {
        "ok"
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new()
            .route("/items/{id}", get(by_id))
            .route("/items", get(paged));
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn valid_path_is_extracted() {
        let (status, _) = get_json("/items/7").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn non_numeric_id_is_json_400() {
        let (status, body) = get_json("/items/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid path"));
    }

    #[tokio::test]
    async fn bad_query_is_json_400() {
        let (status, body) = get_json("/items?page=first").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
    }
}
