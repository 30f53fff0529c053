use std::env;

use chrono::{Duration, Utc};
use sqlx::{migrate::MigrateDatabase, Sqlite};
use vms_common::Paise;
use voucher_market_engine::{
    db_types::{PaymentStatus, Transaction, TransactionType, User, Voucher, Wallet},
    SqliteDatabase,
};

pub fn test_user(id: i64) -> User {
    let now = Utc::now();
    User {
        id,
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        password: "hunter2".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_voucher(id: i64, price: Paise, quantity: i64) -> Voucher {
    let now = Utc::now();
    Voucher {
        id,
        name: "Movie night".to_string(),
        description: "Two tickets".to_string(),
        category: "entertainment".to_string(),
        price,
        quantity,
        valid_from: now - Duration::days(1),
        valid_to: now + Duration::days(30),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_wallet(user_id: i64, balance: Paise) -> Wallet {
    let now = Utc::now();
    Wallet { id: 1, user_id, balance, created_at: now, updated_at: now }
}

pub fn test_transaction(id: i64, user_id: i64, amount: Paise) -> Transaction {
    let now = Utc::now();
    Transaction {
        id,
        user_id,
        voucher_id: Some(7),
        amount,
        transaction_type: TransactionType::Purchase,
        payment_status: PaymentStatus::Success,
        payment_txn_id: Some(format!("UPI_{user_id}_{id}_0")),
        created_at: now,
        updated_at: now,
    }
}

/// Spins up a throwaway, fully migrated marketplace database for end-to-end endpoint tests.
pub async fn prepare_marketplace() -> SqliteDatabase {
    let url = format!("sqlite://{}/vms_server_test_{}.db", env::temp_dir().display(), rand::random::<u64>());
    let _ = Sqlite::drop_database(&url).await;
    Sqlite::create_database(&url).await.expect("Error creating test database");
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error connecting to test database");
    db.run_migrations().await.expect("Error running migrations");
    db
}

pub async fn seed_user(db: &SqliteDatabase, email: &str) -> i64 {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO users (name, email, password) VALUES ('Asha', $1, 'pw') RETURNING id")
            .bind(email)
            .fetch_one(db.pool())
            .await
            .expect("Error seeding user");
    id
}

pub async fn seed_wallet(db: &SqliteDatabase, user_id: i64, balance: Paise) {
    sqlx::query("INSERT INTO wallets (user_id, balance) VALUES ($1, $2)")
        .bind(user_id)
        .bind(balance.value())
        .execute(db.pool())
        .await
        .expect("Error seeding wallet");
}

pub async fn seed_voucher(db: &SqliteDatabase, price: Paise, quantity: i64) -> i64 {
    let now = Utc::now();
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO vouchers (name, category, price, quantity, valid_from, valid_to) \
         VALUES ('Movie night', 'entertainment', $1, $2, $3, $4) RETURNING id",
    )
    .bind(price.value())
    .bind(quantity)
    .bind(now - Duration::days(1))
    .bind(now + Duration::days(30))
    .fetch_one(db.pool())
    .await
    .expect("Error seeding voucher");
    id
}
