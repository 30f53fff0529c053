#![allow(dead_code)]

use std::env;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};
use vms_common::Paise;
use voucher_market_engine::{
    payment::{PaymentOutcome, PaymentProcessor},
    SqliteDatabase,
};

pub fn random_db_url() -> String {
    format!("sqlite://{}/vms_test_{}.db", env::temp_dir().display(), rand::random::<u64>())
}

/// Creates a fresh throwaway database at `url`, runs the migrations and returns a handle to it.
pub async fn prepare_test_env(url: &str) -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    if let Err(e) = Sqlite::drop_database(url).await {
        trace!("Nothing to drop at {url}: {e}");
    }
    Sqlite::create_database(url).await.expect("Error creating test database");
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error connecting to test database");
    db.run_migrations().await.expect("Error running migrations");
    debug!("🚀️ Test database ready at {url}");
    db
}

pub async fn seed_user(db: &SqliteDatabase, name: &str, email: &str, password: &str) -> i64 {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id")
            .bind(name)
            .bind(email)
            .bind(password)
            .fetch_one(db.pool())
            .await
            .expect("Error seeding user");
    id
}

pub async fn seed_wallet(db: &SqliteDatabase, user_id: i64, balance: Paise) -> i64 {
    let (id,): (i64,) = sqlx::query_as("INSERT INTO wallets (user_id, balance) VALUES ($1, $2) RETURNING id")
        .bind(user_id)
        .bind(balance.value())
        .fetch_one(db.pool())
        .await
        .expect("Error seeding wallet");
    id
}

pub async fn seed_voucher_with_window(
    db: &SqliteDatabase,
    name: &str,
    category: &str,
    price: Paise,
    quantity: i64,
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO vouchers (name, category, price, quantity, valid_from, valid_to) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(name)
    .bind(category)
    .bind(price.value())
    .bind(quantity)
    .bind(valid_from)
    .bind(valid_to)
    .fetch_one(db.pool())
    .await
    .expect("Error seeding voucher");
    id
}

/// Seeds a voucher whose validity window comfortably spans the test run.
pub async fn seed_voucher(db: &SqliteDatabase, name: &str, category: &str, price: Paise, quantity: i64) -> i64 {
    let now = Utc::now();
    seed_voucher_with_window(db, name, category, price, quantity, now - Duration::days(1), now + Duration::days(30))
        .await
}

pub async fn voucher_quantity(db: &SqliteDatabase, voucher_id: i64) -> i64 {
    let (quantity,): (i64,) = sqlx::query_as("SELECT quantity FROM vouchers WHERE id = $1")
        .bind(voucher_id)
        .fetch_one(db.pool())
        .await
        .expect("Error reading voucher quantity");
    quantity
}

pub async fn wallet_balance(db: &SqliteDatabase, user_id: i64) -> Paise {
    let (balance,): (i64,) = sqlx::query_as("SELECT balance FROM wallets WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db.pool())
        .await
        .expect("Error reading wallet balance");
    Paise::from(balance)
}

pub async fn transaction_count(db: &SqliteDatabase, user_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db.pool())
        .await
        .expect("Error counting transactions");
    count
}

/// A payment network that approves every charge without any artificial delay.
pub struct AlwaysApprove;

#[async_trait]
impl PaymentProcessor for AlwaysApprove {
    async fn confirm(&self, _amount: Paise, user_id: i64, transaction_id: i64) -> PaymentOutcome {
        PaymentOutcome::approved(format!("TEST_{user_id}_{transaction_id}"), "payment processed successfully")
    }
}

/// A payment network that declines every charge without any artificial delay.
pub struct AlwaysDecline;

#[async_trait]
impl PaymentProcessor for AlwaysDecline {
    async fn confirm(&self, _amount: Paise, _user_id: i64, _transaction_id: i64) -> PaymentOutcome {
        PaymentOutcome::declined("payment processing failed")
    }
}
