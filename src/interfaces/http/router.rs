//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::identity::{RoleResponse, UserResponse};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::users::{self, SharedUserService, UserHandlerState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Roles
        users::list_roles,
        // Users
        users::list_users,
        users::get_user,
        users::get_user_by_username,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::invalidate_user,
    ),
    components(
        schemas(
            // Common
            ApiResponse<UserResponse>,
            PaginatedResponse<UserResponse>,
            PaginatedResponse<RoleResponse>,
            // Health
            health::HealthResponse,
            health::HealthStatus,
            health::StorageProbe,
            // Users
            UserResponse,
            RoleResponse,
            users::CreateUserRequest,
            users::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Roles", description = "Roles users can be assigned to"),
        (name = "Users", description = "User management: create, read, partial update, delete, invalidate"),
    ),
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "REST API over the user repository",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(user_service: SharedUserService) -> Router {
    let user_state = UserHandlerState {
        user_service: user_service.clone(),
    };
    let health_state = HealthState {
        user_service,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let role_routes = Router::new()
        .route("/", get(users::list_roles))
        .with_state(user_state.clone());

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/invalidate", put(users::invalidate_user))
        .route("/by-username/{username}", get(users::get_user_by_username))
        .with_state(user_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .merge(health_routes)
        // Roles
        .nest("/api/v1/roles", role_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::identity::UserService;
    use crate::domain::UserRepositoryInterface;
    use crate::infrastructure::crypto::hash_passphrase;
    use crate::infrastructure::storage::InMemoryUserRepository;

    fn app() -> (Router, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let dyn_repo: Arc<dyn UserRepositoryInterface> = repo.clone();
        (create_api_router(Arc::new(UserService::new(dyn_repo))), repo)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn alice() -> Value {
        json!({
            "username": "alice",
            "passphrase": "pw123",
            "first_name": "Alice",
            "last_name": "Liddell",
            "email": "alice@example.com",
            "role": "viewer"
        })
    }

    #[tokio::test]
    async fn create_returns_201_without_passphrase() {
        let (app, repo) = app();

        let (status, body) = call(&app, "POST", "/api/v1/users", Some(alice())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["username"], "alice");
        assert!(body["data"].get("passphrase").is_none());

        let stored = repo.get_user_by_username("alice").await.unwrap();
        assert_eq!(stored.passphrase, hash_passphrase("pw123"));
    }

    #[tokio::test]
    async fn create_with_empty_username_is_422() {
        let (app, _repo) = app();
        let mut body = alice();
        body["username"] = json!("");

        let (status, body) = call(&app, "POST", "/api/v1/users", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn duplicate_username_is_417() {
        let (app, _repo) = app();
        call(&app, "POST", "/api/v1/users", Some(alice())).await;

        let (status, body) = call(&app, "POST", "/api/v1/users", Some(alice())).await;
        assert_eq!(status, StatusCode::EXPECTATION_FAILED);
        assert!(body["error"].as_str().unwrap().contains("already exists"));
    }

    #[tokio::test]
    async fn unknown_user_is_417() {
        let (app, _repo) = app();

        let (status, body) = call(&app, "GET", "/api/v1/users/99", None).await;
        assert_eq!(status, StatusCode::EXPECTATION_FAILED);
        assert_eq!(body["error"], "Not found: User with id=99");
    }

    #[tokio::test]
    async fn get_by_id_and_username() {
        let (app, _repo) = app();
        let (_, created) = call(&app, "POST", "/api/v1/users", Some(alice())).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, body) = call(&app, "GET", &format!("/api/v1/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "alice@example.com");

        let (status, body) = call(&app, "GET", "/api/v1/users/by-username/alice", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id);
    }

    #[tokio::test]
    async fn partial_update_touches_only_given_fields() {
        let (app, _repo) = app();
        let (_, created) = call(&app, "POST", "/api/v1/users", Some(alice())).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, body) = call(
            &app,
            "PUT",
            &format!("/api/v1/users/{}", id),
            Some(json!({"last_name": "Pleasance", "email": null})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["last_name"], "Pleasance");
        assert_eq!(body["data"]["first_name"], "Alice");
        assert_eq!(body["data"]["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn list_users_is_paginated() {
        let (app, _repo) = app();
        for name in ["a", "b", "c"] {
            let mut body = alice();
            body["username"] = json!(name);
            call(&app, "POST", "/api/v1/users", Some(body)).await;
        }

        let (status, body) = call(&app, "GET", "/api/v1/users?page=2&limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["username"], "c");
    }

    #[tokio::test]
    async fn list_roles_returns_seeded_roles() {
        let (app, _repo) = app();

        let (status, body) = call(&app, "GET", "/api/v1/roles", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["items"][0]["name"], "admin");
    }

    #[tokio::test]
    async fn invalidate_then_delete() {
        let (app, _repo) = app();
        let (_, created) = call(&app, "POST", "/api/v1/users", Some(alice())).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let (status, body) =
            call(&app, "PUT", &format!("/api/v1/users/{}/invalidate", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_active"], false);

        let (status, body) = call(&app, "DELETE", &format!("/api/v1/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["username"], "alice");

        let (status, _) = call(&app, "GET", &format!("/api/v1/users/{}", id), None).await;
        assert_eq!(status, StatusCode::EXPECTATION_FAILED);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _repo) = app();

        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"]["reachable"], true);
        assert_eq!(body["storage"]["roles"], 3);
    }

    #[tokio::test]
    async fn malformed_id_and_query_use_the_envelope() {
        let (app, _repo) = app();

        for (method, uri) in [
            ("GET", "/api/v1/users/abc"),
            ("DELETE", "/api/v1/users/abc"),
            ("PUT", "/api/v1/users/abc/invalidate"),
            ("GET", "/api/v1/users?page=first"),
        ] {
            let (status, body) = call(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
            assert_eq!(body["success"], false);
            assert!(body["error"].is_string());
        }
    }
}
