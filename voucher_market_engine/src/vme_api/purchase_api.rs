use std::fmt::Debug;

use chrono::Utc;
use log::*;

use crate::{
    availability,
    db_types::Transaction,
    errors::MarketError,
    payment::PaymentProcessor,
    traits::MarketplaceDatabase,
};

/// `PurchaseApi` orchestrates the voucher purchase flow: fail-fast validation against a snapshot of the store,
/// followed by the backend's atomic purchase scope, which re-validates under its own transaction and talks to the
/// payment processor.
///
/// The processor is injected so that callers decide which payment network (or stand-in) a purchase talks to.
pub struct PurchaseApi<B> {
    db: B,
    processor: Box<dyn PaymentProcessor>,
}

impl<B> Debug for PurchaseApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PurchaseApi")
    }
}

impl<B> PurchaseApi<B> {
    pub fn new(db: B, processor: Box<dyn PaymentProcessor>) -> Self {
        Self { db, processor }
    }
}

impl<B> PurchaseApi<B>
where B: MarketplaceDatabase
{
    /// Buys one unit of the given voucher for the given user.
    ///
    /// The preconditions are checked in a fixed order, each failing fast with its own error: the user must exist,
    /// the voucher must exist, be inside its validity window and have stock, and the user's wallet must cover the
    /// price. Only then does the atomic scope open; a failure inside it (a lost stock race, a declined payment,
    /// or a storage error) rolls every mutation back before the error reaches the caller, so a failed purchase is
    /// never partially applied.
    pub async fn buy_voucher(&self, user_id: i64, voucher_id: i64) -> Result<Transaction, MarketError> {
        if user_id <= 0 {
            return Err(MarketError::InvalidUserId(user_id));
        }
        let user = self
            .db
            .fetch_user(user_id)
            .await?
            .ok_or_else(|| MarketError::UserNotFound(user_id.to_string()))?;

        if voucher_id <= 0 {
            return Err(MarketError::InvalidVoucherId(voucher_id));
        }
        let voucher =
            self.db.fetch_voucher(voucher_id).await?.ok_or(MarketError::VoucherNotFound(voucher_id))?;
        availability::voucher_available(&voucher, Utc::now())?;

        let wallet = self.db.fetch_wallet(user_id).await?.ok_or(MarketError::WalletNotFound(user_id))?;
        availability::sufficient_balance(wallet.balance, voucher.price)?;

        debug!("🛒️ User {} is buying voucher {} ({}) for {}", user.id, voucher.id, voucher.name, voucher.price);
        let transaction = self.db.execute_purchase(user.id, &voucher, self.processor.as_ref()).await?;
        info!(
            "🛒️ Purchase complete. Transaction #{} ({}) finalized as {}",
            transaction.id, transaction.amount, transaction.payment_status
        );
        Ok(transaction)
    }
}
