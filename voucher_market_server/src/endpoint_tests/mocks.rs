use mockall::mock;
use voucher_market_engine::{
    db_types::{Pagination, Transaction, User, Voucher, VoucherSearchQuery, Wallet},
    errors::MarketError,
    traits::{AccountManagement, AuthManagement, CatalogManagement},
};

mock! {
    pub MarketDb {}

    impl AuthManagement for MarketDb {
        async fn authenticate_user(&self, email: &str, password: &str) -> Result<User, MarketError>;
        async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, MarketError>;
    }

    impl CatalogManagement for MarketDb {
        async fn search_vouchers(&self, query: VoucherSearchQuery) -> Result<Vec<Voucher>, MarketError>;
        async fn fetch_voucher(&self, voucher_id: i64) -> Result<Option<Voucher>, MarketError>;
    }

    impl AccountManagement for MarketDb {
        async fn fetch_wallet(&self, user_id: i64) -> Result<Option<Wallet>, MarketError>;
        async fn fetch_transactions_for_user(&self, user_id: i64, pagination: Pagination) -> Result<Vec<Transaction>, MarketError>;
        async fn fetch_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>, MarketError>;
    }
}
