use actix_web::{http::StatusCode, test, web, App};
use vms_common::Paise;
use voucher_market_engine::AccountApi;

use super::{
    helpers::{test_transaction, test_wallet},
    mocks::MockMarketDb,
};
use crate::{
    data_objects::{BalanceResponse, ListTransactionsResponse},
    routes::{get_balance, list_transactions},
};

async fn get_json(db: MockMarketDb, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AccountApi::new(db)))
            .route("/wallet/balance/{user_id}", web::get().to(get_balance::<MockMarketDb>))
            .route("/transactions/{user_id}", web::get().to(list_transactions::<MockMarketDb>)),
    )
    .await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).expect("response body should be JSON"))
}

#[actix_web::test]
async fn balance_is_reported_in_rupees() {
    let mut db = MockMarketDb::new();
    db.expect_fetch_wallet().withf(|user_id| *user_id == 3).returning(|_| Ok(Some(test_wallet(3, Paise::from(2_550)))));

    let (status, body) = get_json(db, "/wallet/balance/3").await;
    assert_eq!(status, StatusCode::OK);
    let response: BalanceResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.user_id, 3);
    assert_eq!(response.balance, 25.5);
}

#[actix_web::test]
async fn missing_wallet_is_not_found() {
    let mut db = MockMarketDb::new();
    db.expect_fetch_wallet().returning(|_| Ok(None));

    let (status, body) = get_json(db, "/wallet/balance/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not-found");
}

#[actix_web::test]
async fn non_positive_user_id_is_invalid() {
    let db = MockMarketDb::new();
    let (status, body) = get_json(db, "/wallet/balance/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");
}

#[actix_web::test]
async fn transactions_keep_the_backend_order() {
    let mut db = MockMarketDb::new();
    db.expect_fetch_transactions_for_user()
        .withf(|user_id, pagination| *user_id == 3 && pagination.limit == 2 && pagination.offset == 0)
        .returning(|_, _| {
            Ok(vec![test_transaction(12, 3, Paise::from_rupees(30)), test_transaction(11, 3, Paise::from_rupees(10))])
        });

    let (status, body) = get_json(db, "/transactions/3?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let response: ListTransactionsResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.transactions.iter().map(|t| t.id).collect::<Vec<_>>(), vec![12, 11]);
    assert_eq!(response.transactions[0].payment_status, "success");
    assert_eq!(response.transactions[0].amount, 30.0);
}
