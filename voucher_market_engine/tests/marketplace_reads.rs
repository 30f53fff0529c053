//! Checks for the read-path collaborators: login, catalog search and account queries.

use chrono::{Duration, Utc};
use vms_common::Paise;
use voucher_market_engine::{
    db_types::{Pagination, VoucherSearchQuery},
    AccountApi, AuthApi, CatalogApi, MarketError,
};

mod support;
use support::{prepare_test_env, random_db_url, seed_user, seed_voucher, seed_voucher_with_window, seed_wallet};

#[tokio::test]
async fn login_checks_credentials() {
    let db = prepare_test_env(&random_db_url()).await;
    let user_id = seed_user(&db, "Asha", "asha@example.com", "hunter2").await;
    let auth = AuthApi::new(db.clone());

    let user = auth.login("asha@example.com", "hunter2").await.expect("login should succeed");
    assert_eq!(user.id, user_id);
    assert_eq!(user.name, "Asha");

    assert!(matches!(
        auth.login("asha@example.com", "wrong").await.unwrap_err(),
        MarketError::InvalidCredentials
    ));
    assert!(matches!(auth.login("nobody@example.com", "pw").await.unwrap_err(), MarketError::UserNotFound(_)));
}

#[tokio::test]
async fn search_only_returns_purchasable_vouchers() {
    let db = prepare_test_env(&random_db_url()).await;
    let now = Utc::now();
    let live = seed_voucher(&db, "Coffee", "food", Paise::from_rupees(10), 5).await;
    // Expired, future-dated and sold-out vouchers must not appear.
    seed_voucher_with_window(
        &db,
        "Old deal",
        "food",
        Paise::from_rupees(10),
        5,
        now - Duration::days(10),
        now - Duration::days(1),
    )
    .await;
    seed_voucher_with_window(
        &db,
        "Next month",
        "food",
        Paise::from_rupees(10),
        5,
        now + Duration::days(10),
        now + Duration::days(20),
    )
    .await;
    seed_voucher(&db, "Sold out", "food", Paise::from_rupees(10), 0).await;

    let catalog = CatalogApi::new(db.clone());
    let found = catalog.search(VoucherSearchQuery::default()).await.unwrap();
    assert_eq!(found.iter().map(|v| v.id).collect::<Vec<_>>(), vec![live]);
}

#[tokio::test]
async fn search_filters_compose() {
    let db = prepare_test_env(&random_db_url()).await;
    let coffee = seed_voucher(&db, "Coffee", "food", Paise::from_rupees(10), 5).await;
    let dinner = seed_voucher(&db, "Dinner", "food", Paise::from_rupees(60), 5).await;
    let movie = seed_voucher(&db, "Movie", "entertainment", Paise::from_rupees(40), 5).await;

    let catalog = CatalogApi::new(db.clone());

    let food = catalog.search(VoucherSearchQuery::default().with_category("food")).await.unwrap();
    let mut food_ids = food.iter().map(|v| v.id).collect::<Vec<_>>();
    food_ids.sort_unstable();
    assert_eq!(food_ids, vec![coffee, dinner]);

    let mid_range = catalog
        .search(
            VoucherSearchQuery::default()
                .with_min_price(Paise::from_rupees(20))
                .with_max_price(Paise::from_rupees(50)),
        )
        .await
        .unwrap();
    assert_eq!(mid_range.iter().map(|v| v.id).collect::<Vec<_>>(), vec![movie]);

    let cheap_food = catalog
        .search(VoucherSearchQuery::default().with_category("food").with_max_price(Paise::from_rupees(20)))
        .await
        .unwrap();
    assert_eq!(cheap_food.iter().map(|v| v.id).collect::<Vec<_>>(), vec![coffee]);
}

#[tokio::test]
async fn vouchers_can_be_fetched_by_id_regardless_of_stock() {
    let db = prepare_test_env(&random_db_url()).await;
    let sold_out = seed_voucher(&db, "Sold out", "food", Paise::from_rupees(10), 0).await;
    let catalog = CatalogApi::new(db.clone());

    // A UI rendering a voucher page still needs sold-out and expired vouchers.
    let voucher = catalog.voucher_by_id(sold_out).await.unwrap();
    assert_eq!(voucher.quantity, 0);

    assert!(matches!(catalog.voucher_by_id(0).await.unwrap_err(), MarketError::InvalidVoucherId(0)));
    assert!(matches!(catalog.voucher_by_id(999).await.unwrap_err(), MarketError::VoucherNotFound(999)));
}

#[tokio::test]
async fn invalid_price_filters_are_rejected() {
    let db = prepare_test_env(&random_db_url()).await;
    let catalog = CatalogApi::new(db.clone());

    let negative = VoucherSearchQuery::default().with_min_price(Paise::from(-100));
    assert!(matches!(catalog.search(negative).await.unwrap_err(), MarketError::InvalidPrice));

    let inverted = VoucherSearchQuery::default()
        .with_min_price(Paise::from_rupees(50))
        .with_max_price(Paise::from_rupees(10));
    assert!(matches!(catalog.search(inverted).await.unwrap_err(), MarketError::InvalidPrice));
}

#[tokio::test]
async fn account_queries_validate_their_inputs() {
    let db = prepare_test_env(&random_db_url()).await;
    let user_id = seed_user(&db, "Asha", "asha@example.com", "pw").await;
    let accounts = AccountApi::new(db.clone());

    assert!(matches!(accounts.balance_for_user(0).await.unwrap_err(), MarketError::InvalidUserId(0)));
    assert!(matches!(
        accounts.balance_for_user(user_id).await.unwrap_err(),
        MarketError::WalletNotFound(id) if id == user_id
    ));

    seed_wallet(&db, user_id, Paise::from_rupees(25)).await;
    assert_eq!(accounts.balance_for_user(user_id).await.unwrap(), Paise::from_rupees(25));

    assert!(matches!(accounts.transaction_by_id(42).await.unwrap_err(), MarketError::TransactionNotFound(42)));
    let empty = accounts.history_for_user(user_id, Pagination::default()).await.unwrap();
    assert!(empty.is_empty());
}
