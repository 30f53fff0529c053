use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;
use voucher_market_engine::{errors::MarketError, AuthApi};

use super::{helpers::test_user, mocks::MockMarketDb};
use crate::{data_objects::LoginResponse, routes::login};

async fn post_login(db: MockMarketDb, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AuthApi::new(db)))
            .route("/login", web::post().to(login::<MockMarketDb>)),
    )
    .await;
    let req = test::TestRequest::post().uri("/login").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).expect("response body should be JSON"))
}

#[actix_web::test]
async fn login_returns_the_user_profile() {
    let mut db = MockMarketDb::new();
    db.expect_authenticate_user()
        .withf(|email, password| email == "asha@example.com" && password == "hunter2")
        .returning(|_, _| Ok(test_user(3)));

    let (status, body) = post_login(db, json!({"email": "asha@example.com", "password": "hunter2"})).await;
    assert_eq!(status, StatusCode::OK);
    let response: LoginResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.user.id, 3);
    assert_eq!(response.user.email, "asha@example.com");
    assert_eq!(response.message, "Login successful");
}

#[actix_web::test]
async fn wrong_password_is_unauthenticated() {
    let mut db = MockMarketDb::new();
    db.expect_authenticate_user().returning(|_, _| Err(MarketError::InvalidCredentials));

    let (status, body) = post_login(db, json!({"email": "asha@example.com", "password": "nope"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthenticated");
}

#[actix_web::test]
async fn unknown_email_is_not_found() {
    let mut db = MockMarketDb::new();
    db.expect_authenticate_user().returning(|email, _| Err(MarketError::UserNotFound(email.to_string())));

    let (status, body) = post_login(db, json!({"email": "ghost@example.com", "password": "pw"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not-found");
}

#[actix_web::test]
async fn empty_credentials_never_reach_the_backend() {
    // No expectation is set, so any call into the mock would panic the test.
    let db = MockMarketDb::new();
    let (status, body) = post_login(db, json!({"email": "", "password": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");
}
