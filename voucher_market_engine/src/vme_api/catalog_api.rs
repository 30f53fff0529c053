use log::trace;

use crate::{
    db_types::{Voucher, VoucherSearchQuery},
    errors::MarketError,
    traits::CatalogManagement,
};

/// Read-only access to the voucher catalog.
#[derive(Debug, Clone)]
pub struct CatalogApi<B> {
    db: B,
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    /// Searches for currently purchasable vouchers. A negative price bound, or a minimum above the maximum, is
    /// rejected before the store is consulted.
    pub async fn search(&self, query: VoucherSearchQuery) -> Result<Vec<Voucher>, MarketError> {
        if let Some(min) = query.min_price {
            if min.value() < 0 {
                return Err(MarketError::InvalidPrice);
            }
        }
        if let Some(max) = query.max_price {
            if max.value() < 0 {
                return Err(MarketError::InvalidPrice);
            }
        }
        if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
            if min > max {
                return Err(MarketError::InvalidPrice);
            }
        }
        let vouchers = self.db.search_vouchers(query).await?;
        trace!("📇️ Catalog search returned {} vouchers", vouchers.len());
        Ok(vouchers)
    }

    pub async fn voucher_by_id(&self, voucher_id: i64) -> Result<Voucher, MarketError> {
        if voucher_id <= 0 {
            return Err(MarketError::InvalidVoucherId(voucher_id));
        }
        self.db.fetch_voucher(voucher_id).await?.ok_or(MarketError::VoucherNotFound(voucher_id))
    }
}
