use crate::{
    db_types::{Transaction, Voucher},
    errors::MarketError,
    payment::PaymentProcessor,
    traits::{AccountManagement, AuthManagement, CatalogManagement},
};

/// The highest level of behaviour a backend must provide to power the voucher marketplace.
///
/// Besides the per-concern read contracts it inherits, a backend owns the single write path of the system: the
/// atomic purchase scope. `Wallet.balance` and `Voucher.quantity` are mutated nowhere else, and transaction
/// records are only ever created and finalized inside it.
#[allow(async_fn_in_trait)]
pub trait MarketplaceDatabase: Clone + AuthManagement + CatalogManagement + AccountManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Executes the mutating half of a purchase in one atomic unit of work:
    ///
    /// * debit the buyer's wallet by the voucher price,
    /// * insert a pending purchase transaction,
    /// * decrement the voucher's stock by one,
    /// * ask `processor` to confirm the charge,
    /// * on approval, finalize the transaction to `success` with the confirmation id and commit,
    /// * on decline, discard every mutation and return [`MarketError::PaymentProcessingFailed`].
    ///
    /// Stock and balance are re-validated under the scope, so two purchases racing past their snapshot checks
    /// cannot oversell stock or drive a balance negative; the loser fails with the corresponding domain error.
    /// A scope that is abandoned for any reason (including the returned future being dropped mid-flight) leaves
    /// no partial mutation behind; in particular, no transaction row is ever observable in the pending state.
    async fn execute_purchase(
        &self,
        user_id: i64,
        voucher: &Voucher,
        processor: &dyn PaymentProcessor,
    ) -> Result<Transaction, MarketError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), MarketError> {
        Ok(())
    }
}
