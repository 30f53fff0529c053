use sqlx::SqliteConnection;
use vms_common::Paise;

use crate::{db_types::Wallet, errors::MarketError};

pub async fn fetch_wallet_for_user(user_id: i64, conn: &mut SqliteConnection) -> Result<Option<Wallet>, MarketError> {
    let wallet =
        sqlx::query_as("SELECT * FROM wallets WHERE user_id = $1").bind(user_id).fetch_optional(conn).await?;
    Ok(wallet)
}

/// Debits the user's wallet by `amount`. The update is guarded on the current balance covering the amount, so a
/// wallet that was drained since the caller last looked fails here with [`MarketError::InsufficientBalance`]
/// instead of going negative.
pub async fn debit_balance(user_id: i64, amount: Paise, conn: &mut SqliteConnection) -> Result<(), MarketError> {
    if !amount.is_positive() {
        return Err(MarketError::InvalidAmount);
    }
    let result = sqlx::query(
        "UPDATE wallets SET balance = balance - $1, updated_at = CURRENT_TIMESTAMP \
         WHERE user_id = $2 AND balance >= $1",
    )
    .bind(amount.value())
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        // Distinguish "no wallet" from "not enough money" for the caller.
        return match fetch_wallet_for_user(user_id, conn).await? {
            Some(wallet) => Err(MarketError::InsufficientBalance { required: amount, available: wallet.balance }),
            None => Err(MarketError::WalletNotFound(user_id)),
        };
    }
    Ok(())
}
