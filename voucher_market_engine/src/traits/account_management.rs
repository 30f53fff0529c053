use crate::{
    db_types::{Pagination, Transaction, Wallet},
    errors::MarketError,
};

#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetches the wallet belonging to the given user. Returns `None` if the user has no wallet.
    async fn fetch_wallet(&self, user_id: i64) -> Result<Option<Wallet>, MarketError>;

    /// Fetches the user's transaction history, newest first.
    async fn fetch_transactions_for_user(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<Transaction>, MarketError>;

    /// Fetches a single transaction record by id.
    async fn fetch_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>, MarketError>;
}
