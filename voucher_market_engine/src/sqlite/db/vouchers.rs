use chrono::{DateTime, Utc};
use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Voucher, VoucherSearchQuery},
    errors::MarketError,
};

pub async fn fetch_voucher_by_id(voucher_id: i64, conn: &mut SqliteConnection) -> Result<Option<Voucher>, MarketError> {
    let voucher = sqlx::query_as("SELECT * FROM vouchers WHERE id = $1").bind(voucher_id).fetch_optional(conn).await?;
    Ok(voucher)
}

/// Fetches vouchers that are purchasable at `now` (inside their validity window, with stock remaining), narrowed
/// by the filters in `query`. Results are ordered newest first.
pub async fn search_vouchers(
    query: VoucherSearchQuery,
    now: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Vec<Voucher>, MarketError> {
    let mut builder = QueryBuilder::new("SELECT * FROM vouchers WHERE valid_from <= ");
    builder.push_bind(now);
    builder.push(" AND valid_to >= ");
    builder.push_bind(now);
    builder.push(" AND quantity > 0");
    if let Some(category) = query.category {
        builder.push(" AND category = ");
        builder.push_bind(category);
    }
    if let Some(min_price) = query.min_price {
        builder.push(" AND price >= ");
        builder.push_bind(min_price.value());
    }
    if let Some(max_price) = query.max_price {
        builder.push(" AND price <= ");
        builder.push_bind(max_price.value());
    }
    builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
    builder.push_bind(query.pagination.limit);
    builder.push(" OFFSET ");
    builder.push_bind(query.pagination.offset);

    trace!("📇️ Executing voucher search: {}", builder.sql());
    let vouchers = builder.build_query_as::<Voucher>().fetch_all(conn).await?;
    trace!("📇️ Voucher search matched {} rows", vouchers.len());
    Ok(vouchers)
}

/// Takes one unit of stock off the voucher. The decrement is guarded, so a voucher that ran out since the caller
/// last looked fails here with [`MarketError::VoucherOutOfStock`] instead of driving the count negative.
pub async fn decrement_quantity(voucher_id: i64, conn: &mut SqliteConnection) -> Result<(), MarketError> {
    let result = sqlx::query(
        "UPDATE vouchers SET quantity = quantity - 1, updated_at = CURRENT_TIMESTAMP \
         WHERE id = $1 AND quantity > 0",
    )
    .bind(voucher_id)
    .execute(conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(MarketError::VoucherOutOfStock(voucher_id));
    }
    Ok(())
}
