use crate::{
    db_types::{Voucher, VoucherSearchQuery},
    errors::MarketError,
};

#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Searches the catalog for vouchers that are currently purchasable (inside their validity window and with
    /// stock remaining), narrowed by the given filters. Results are ordered newest first.
    async fn search_vouchers(&self, query: VoucherSearchQuery) -> Result<Vec<Voucher>, MarketError>;

    /// Fetches a voucher by id, whether or not it is currently purchasable.
    async fn fetch_voucher(&self, voucher_id: i64) -> Result<Option<Voucher>, MarketError>;
}
