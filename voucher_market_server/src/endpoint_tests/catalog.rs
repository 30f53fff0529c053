use actix_web::{http::StatusCode, test, web, App};
use vms_common::Paise;
use voucher_market_engine::CatalogApi;

use super::{helpers::test_voucher, mocks::MockMarketDb};
use crate::{data_objects::SearchVouchersResponse, routes::search_vouchers};

async fn get_search(db: MockMarketDb, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(CatalogApi::new(db)))
            .route("/vouchers/search", web::get().to(search_vouchers::<MockMarketDb>)),
    )
    .await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).expect("response body should be JSON"))
}

#[actix_web::test]
async fn search_passes_filters_through_and_returns_rupee_prices() {
    let mut db = MockMarketDb::new();
    db.expect_search_vouchers()
        .withf(|query| {
            query.category.as_deref() == Some("entertainment")
                && query.min_price == Some(Paise::from_rupees(20))
                && query.max_price == Some(Paise::from_rupees(50))
        })
        .returning(|_| Ok(vec![test_voucher(7, Paise::from_rupees(40), 5)]));

    let (status, body) =
        get_search(db, "/vouchers/search?category=entertainment&min_price=20&max_price=50").await;
    assert_eq!(status, StatusCode::OK);
    let response: SearchVouchersResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.vouchers.len(), 1);
    assert_eq!(response.vouchers[0].id, 7);
    assert_eq!(response.vouchers[0].price, 40.0);
}

#[actix_web::test]
async fn search_without_filters_uses_default_pagination() {
    let mut db = MockMarketDb::new();
    db.expect_search_vouchers()
        .withf(|query| {
            query.category.is_none()
                && query.min_price.is_none()
                && query.pagination.limit == 50
                && query.pagination.offset == 0
        })
        .returning(|_| Ok(vec![]));

    let (status, body) = get_search(db, "/vouchers/search").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["vouchers"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn inverted_price_range_is_rejected() {
    // The validation lives in front of the store; no expectation means a store call would panic.
    let db = MockMarketDb::new();
    let (status, body) = get_search(db, "/vouchers/search?min_price=50&max_price=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");
}

#[actix_web::test]
async fn negative_price_is_rejected() {
    let db = MockMarketDb::new();
    let (status, body) = get_search(db, "/vouchers/search?min_price=-5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid-argument");
}
