use log::debug;
use sqlx::SqliteConnection;
use vms_common::Paise;

use crate::{
    db_types::{Pagination, PaymentStatus, Transaction},
    errors::MarketError,
};

/// Inserts a new purchase transaction in the pending state and returns the stored row.
pub async fn insert_pending_purchase(
    user_id: i64,
    voucher_id: i64,
    amount: Paise,
    conn: &mut SqliteConnection,
) -> Result<Transaction, MarketError> {
    let transaction = sqlx::query_as(
        r#"
            INSERT INTO transactions (user_id, voucher_id, amount, transaction_type, payment_status)
            VALUES ($1, $2, $3, 'purchase', 'pending')
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(voucher_id)
    .bind(amount.value())
    .fetch_one(conn)
    .await?;
    Ok(transaction)
}

/// Moves a pending transaction to its terminal status, recording the processor's confirmation id when there is
/// one. The update is guarded on the row still being pending; a transaction can never move backwards out of a
/// terminal state.
pub async fn finalize_transaction(
    transaction_id: i64,
    status: PaymentStatus,
    confirmation_id: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<Transaction, MarketError> {
    let finalized: Option<Transaction> = sqlx::query_as(
        r#"
            UPDATE transactions
            SET payment_status = $1, payment_txn_id = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $3 AND payment_status = 'pending'
            RETURNING *;
        "#,
    )
    .bind(status.to_string())
    .bind(confirmation_id)
    .bind(transaction_id)
    .fetch_optional(conn)
    .await?;
    finalized.ok_or_else(|| {
        debug!("🗃️ Transaction {transaction_id} could not be finalized to {status}");
        MarketError::Database(format!("transaction {transaction_id} is missing or was already finalized"))
    })
}

pub async fn fetch_transaction(
    transaction_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Transaction>, MarketError> {
    let transaction =
        sqlx::query_as("SELECT * FROM transactions WHERE id = $1").bind(transaction_id).fetch_optional(conn).await?;
    Ok(transaction)
}

/// Fetches the user's transactions, newest first.
pub async fn fetch_transactions_for_user(
    user_id: i64,
    pagination: Pagination,
    conn: &mut SqliteConnection,
) -> Result<Vec<Transaction>, MarketError> {
    let transactions = sqlx::query_as(
        "SELECT * FROM transactions WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(pagination.limit)
    .bind(pagination.offset)
    .fetch_all(conn)
    .await?;
    Ok(transactions)
}
