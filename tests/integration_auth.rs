mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    ADMIN_PASSWORD, USER_PASSWORD, access_token, admin, auth_app, body_json, empty_request,
    expired_access_token, jane, refresh_token, set_cookies, user,
};
use serde_json::json;
use tokengate_auth::{Role, verify_access_token};
use tower::ServiceExt;

fn login_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_login_success() {
    let response = auth_app()
        .oneshot(login_request(json!({
            "username": "admin",
            "password": ADMIN_PASSWORD
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(response.headers());
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }

    let body = body_json(response).await;
    assert_eq!(body["user"], json!({"id": 1, "username": "admin", "role": "admin"}));

    let token = body["accessToken"].as_str().unwrap();
    let claims = verify_access_token(token, &common::test_jwt_config()).unwrap();
    assert_eq!(claims.username, "admin");
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn test_login_regular_user() {
    let response = auth_app()
        .oneshot(login_request(json!({
            "username": "jane",
            "password": USER_PASSWORD
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let response = auth_app()
        .oneshot(login_request(json!({
            "username": "nobody",
            "password": "whatever"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(set_cookies(response.headers()).is_empty());
    let body = body_json(response).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let response = auth_app()
        .oneshot(login_request(json!({
            "username": "admin",
            "password": "wrong"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Wrong password");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_missing_field() {
    let response = auth_app()
        .oneshot(login_request(json!({ "username": "admin" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_empty_fields() {
    let response = auth_app()
        .oneshot(login_request(json!({ "username": "", "password": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_profile_with_valid_token() {
    let request = Request::builder()
        .uri("/api/profile")
        .header("authorization", format!("Bearer {}", access_token(&jane())))
        .body(Body::empty())
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Welcome!");
    assert_eq!(body["user"]["id"], 2);
    assert_eq!(body["user"]["username"], "jane");
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn test_profile_without_token() {
    let response = auth_app()
        .oneshot(empty_request(Method::GET, "/api/profile"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_with_invalid_token() {
    let request = Request::builder()
        .uri("/api/profile")
        .header("authorization", "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_with_expired_token() {
    let request = Request::builder()
        .uri("/api/profile")
        .header(
            "authorization",
            format!("Bearer {}", expired_access_token(&admin())),
        )
        .body(Body::empty())
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_rejects_refresh_token() {
    let request = Request::builder()
        .uri("/api/profile")
        .header("authorization", format!("Bearer {}", refresh_token(&admin())))
        .body(Body::empty())
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_with_valid_cookie() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/refresh-token")
        .header("cookie", format!("refreshToken={}", refresh_token(&admin())))
        .body(Body::empty())
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["accessToken"].as_str().unwrap();
    let claims = verify_access_token(token, &common::test_jwt_config()).unwrap();
    assert_eq!(claims.id, 1);
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let response = auth_app()
        .oneshot(empty_request(Method::POST, "/api/refresh-token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No refresh token");
}

#[tokio::test]
async fn test_refresh_with_access_token_is_forbidden() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/refresh-token")
        .header("cookie", format!("refreshToken={}", access_token(&admin())))
        .body(Body::empty())
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_for_removed_user() {
    let ghost = user(99, "ghost", Role::User);
    let request = Request::builder()
        .method("POST")
        .uri("/api/refresh-token")
        .header("cookie", format!("refreshToken={}", refresh_token(&ghost)))
        .body(Body::empty())
        .unwrap();

    let response = auth_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let response = auth_app()
        .oneshot(empty_request(Method::GET, "/api/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_openapi_document() {
    let response = auth_app()
        .oneshot(empty_request(Method::GET, "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"].get("/api/login").is_some());
    assert!(body["paths"].get("/api/profile").is_some());
    assert!(body["paths"].get("/api/refresh-token").is_some());
}
