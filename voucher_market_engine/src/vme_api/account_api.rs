use vms_common::Paise;

use crate::{
    db_types::{Pagination, Transaction},
    errors::MarketError,
    traits::AccountManagement,
};

/// Read-only access to wallet balances and the transaction audit trail.
#[derive(Debug, Clone)]
pub struct AccountApi<B> {
    db: B,
}

impl<B> AccountApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub async fn balance_for_user(&self, user_id: i64) -> Result<Paise, MarketError> {
        if user_id <= 0 {
            return Err(MarketError::InvalidUserId(user_id));
        }
        let wallet = self.db.fetch_wallet(user_id).await?.ok_or(MarketError::WalletNotFound(user_id))?;
        Ok(wallet.balance)
    }

    /// The user's transaction history, newest first.
    pub async fn history_for_user(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<Transaction>, MarketError> {
        if user_id <= 0 {
            return Err(MarketError::InvalidUserId(user_id));
        }
        self.db.fetch_transactions_for_user(user_id, pagination).await
    }

    pub async fn transaction_by_id(&self, transaction_id: i64) -> Result<Transaction, MarketError> {
        self.db
            .fetch_transaction(transaction_id)
            .await?
            .ok_or(MarketError::TransactionNotFound(transaction_id))
    }
}
