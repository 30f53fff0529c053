//! The buy endpoint runs against a real, freshly migrated SQLite store: the purchase scope's semantics are the
//! point of the endpoint, and mocking them away would leave nothing to test.

use actix_web::{http::StatusCode, test, web, App};
use serde_json::json;
use vms_common::Paise;
use voucher_market_engine::{payment::UpiSimulator, PurchaseApi, SqliteDatabase};

use super::helpers::{prepare_marketplace, seed_user, seed_voucher, seed_wallet};
use crate::{data_objects::BuyVoucherResponse, routes::buy_voucher};

async fn post_buy(
    db: SqliteDatabase,
    success_rate: f64,
    user_id: i64,
    voucher_id: i64,
) -> (StatusCode, serde_json::Value) {
    let api = PurchaseApi::new(db, Box::new(UpiSimulator::new(success_rate)));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(api))
            .route("/vouchers/buy", web::post().to(buy_voucher::<SqliteDatabase>)),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/vouchers/buy")
        .set_json(json!({"user_id": user_id, "voucher_id": voucher_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).expect("response body should be JSON"))
}

#[actix_web::test]
async fn buying_a_voucher_end_to_end() {
    let db = prepare_marketplace().await;
    let user_id = seed_user(&db, "asha@example.com").await;
    seed_wallet(&db, user_id, Paise::from_rupees(100)).await;
    let voucher_id = seed_voucher(&db, Paise::from_rupees(40), 5).await;

    let (status, body) = post_buy(db.clone(), 1.0, user_id, voucher_id).await;
    assert_eq!(status, StatusCode::OK);
    let response: BuyVoucherResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.message, "Voucher purchased successfully");
    assert_eq!(response.transaction.payment_status, "success");
    assert_eq!(response.transaction.amount, 40.0);
    assert_eq!(response.transaction.voucher_id, Some(voucher_id));
    assert!(response.transaction.payment_txn_id.is_some());
}

#[actix_web::test]
async fn a_declined_payment_surfaces_as_internal() {
    let db = prepare_marketplace().await;
    let user_id = seed_user(&db, "asha@example.com").await;
    seed_wallet(&db, user_id, Paise::from_rupees(100)).await;
    let voucher_id = seed_voucher(&db, Paise::from_rupees(40), 5).await;

    let (status, body) = post_buy(db.clone(), 0.0, user_id, voucher_id).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal");
}

#[actix_web::test]
async fn sold_out_vouchers_fail_the_precondition() {
    let db = prepare_marketplace().await;
    let user_id = seed_user(&db, "asha@example.com").await;
    seed_wallet(&db, user_id, Paise::from_rupees(100)).await;
    let voucher_id = seed_voucher(&db, Paise::from_rupees(40), 0).await;

    let (status, body) = post_buy(db.clone(), 1.0, user_id, voucher_id).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["code"], "failed-precondition");
}

#[actix_web::test]
async fn a_poor_buyer_fails_the_precondition() {
    let db = prepare_marketplace().await;
    let user_id = seed_user(&db, "asha@example.com").await;
    seed_wallet(&db, user_id, Paise::from_rupees(10)).await;
    let voucher_id = seed_voucher(&db, Paise::from_rupees(40), 5).await;

    let (status, body) = post_buy(db.clone(), 1.0, user_id, voucher_id).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["code"], "failed-precondition");
}
