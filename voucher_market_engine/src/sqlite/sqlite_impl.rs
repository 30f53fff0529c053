//! `SqliteDatabase` is a concrete implementation of a voucher marketplace backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module. The purchase scope is one SQLite transaction; everything inside it commits together or not at all.
use std::fmt::Debug;

use chrono::Utc;
use log::*;
use sqlx::SqlitePool;

use super::db::{db_url, new_pool, transactions, users, vouchers, wallets};
use crate::{
    db_types::{Pagination, PaymentStatus, Transaction, User, Voucher, VoucherSearchQuery, Wallet},
    errors::MarketError,
    payment::PaymentProcessor,
    traits::{AccountManagement, AuthManagement, CatalogManagement, MarketplaceDatabase},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl MarketplaceDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Runs the mutating steps of a purchase inside a single atomic transaction:
    /// * the wallet debit and stock decrement are guarded updates, so stock and balance are re-validated under
    ///   the scope even though the orchestrator already checked a snapshot of them,
    /// * the pending transaction row is inserted before the payment call so the processor can reference its id,
    /// * a declined payment abandons the scope; every mutation (the pending row included) is discarded.
    async fn execute_purchase(
        &self,
        user_id: i64,
        voucher: &Voucher,
        processor: &dyn PaymentProcessor,
    ) -> Result<Transaction, MarketError> {
        let mut tx = self.pool.begin().await?;
        wallets::debit_balance(user_id, voucher.price, &mut tx)
            .await
            .map_err(|e| e.with_context("debit wallet"))?;
        debug!("🗃️ Wallet for user {user_id} debited by {}", voucher.price);
        let pending = transactions::insert_pending_purchase(user_id, voucher.id, voucher.price, &mut tx)
            .await
            .map_err(|e| e.with_context("create transaction record"))?;
        debug!("🗃️ Transaction #{} recorded as pending", pending.id);
        vouchers::decrement_quantity(voucher.id, &mut tx).await.map_err(|e| e.with_context("decrement stock"))?;
        debug!("🗃️ Voucher {} stock decremented by 1", voucher.id);

        let outcome = processor.confirm(voucher.price, user_id, pending.id).await;
        if outcome.success {
            let confirmation_id = outcome.confirmation_id.ok_or_else(|| {
                MarketError::Database("the payment processor approved a charge without a confirmation id".to_string())
            })?;
            let finalized =
                transactions::finalize_transaction(pending.id, PaymentStatus::Success, Some(&confirmation_id), &mut tx)
                    .await
                    .map_err(|e| e.with_context("finalize transaction"))?;
            tx.commit().await?;
            debug!("🗃️ Purchase committed. Transaction #{} confirmed with id {confirmation_id}", finalized.id);
            Ok(finalized)
        } else {
            transactions::finalize_transaction(pending.id, PaymentStatus::Failed, None, &mut tx)
                .await
                .map_err(|e| e.with_context("finalize transaction"))?;
            // The rollback discards the pending row along with the debit and decrement, so a failed purchase
            // leaves no trace in the store.
            tx.rollback().await?;
            info!("🗃️ Payment for transaction #{} declined. All purchase mutations were rolled back", pending.id);
            Err(MarketError::PaymentProcessingFailed(outcome.message))
        }
    }

    async fn close(&mut self) -> Result<(), MarketError> {
        self.pool.close().await;
        Ok(())
    }
}

impl AuthManagement for SqliteDatabase {
    async fn authenticate_user(&self, email: &str, password: &str) -> Result<User, MarketError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_email(email, &mut conn)
            .await?
            .ok_or_else(|| MarketError::UserNotFound(email.to_string()))?;
        if user.password != password {
            debug!("🔑️ Login attempt for {email} with a bad password");
            return Err(MarketError::InvalidCredentials);
        }
        Ok(user)
    }

    async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, MarketError> {
        let mut conn = self.pool.acquire().await?;
        users::fetch_user_by_id(user_id, &mut conn).await
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn search_vouchers(&self, query: VoucherSearchQuery) -> Result<Vec<Voucher>, MarketError> {
        let mut conn = self.pool.acquire().await?;
        vouchers::search_vouchers(query, Utc::now(), &mut conn).await
    }

    async fn fetch_voucher(&self, voucher_id: i64) -> Result<Option<Voucher>, MarketError> {
        let mut conn = self.pool.acquire().await?;
        vouchers::fetch_voucher_by_id(voucher_id, &mut conn).await
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_wallet(&self, user_id: i64) -> Result<Option<Wallet>, MarketError> {
        let mut conn = self.pool.acquire().await?;
        wallets::fetch_wallet_for_user(user_id, &mut conn).await
    }

    async fn fetch_transactions_for_user(
        &self,
        user_id: i64,
        pagination: Pagination,
    ) -> Result<Vec<Transaction>, MarketError> {
        let mut conn = self.pool.acquire().await?;
        transactions::fetch_transactions_for_user(user_id, pagination, &mut conn).await
    }

    async fn fetch_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>, MarketError> {
        let mut conn = self.pool.acquire().await?;
        transactions::fetch_transaction(transaction_id, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Applies any outstanding schema migrations.
    pub async fn run_migrations(&self) -> Result<(), MarketError> {
        sqlx::migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| MarketError::Database(format!("migration failure: {e}")))?;
        info!("🗃️ Migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
