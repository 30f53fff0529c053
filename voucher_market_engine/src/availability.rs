//! Snapshot checks used before a purchase is attempted.
//!
//! These are pure functions over values already read from the store, so collaborators that only need a read-only
//! answer (e.g. a UI deciding whether to enable a "buy" button) can call them without going anywhere near the
//! purchase flow. The purchase scope re-validates stock and balance under its own transaction; these checks exist
//! to fail fast with a precise error before any mutation is attempted.

use chrono::{DateTime, Utc};
use vms_common::Paise;

use crate::{db_types::Voucher, errors::MarketError};

/// Checks that the voucher is inside its validity window and has stock left at the time of the snapshot.
pub fn voucher_available(voucher: &Voucher, now: DateTime<Utc>) -> Result<(), MarketError> {
    if now < voucher.valid_from || now > voucher.valid_to {
        return Err(MarketError::VoucherExpired(voucher.id));
    }
    if voucher.quantity <= 0 {
        return Err(MarketError::VoucherOutOfStock(voucher.id));
    }
    Ok(())
}

/// Checks that a balance covers the given amount. Non-positive amounts are rejected outright.
pub fn sufficient_balance(balance: Paise, amount: Paise) -> Result<(), MarketError> {
    if !amount.is_positive() {
        return Err(MarketError::InvalidAmount);
    }
    if balance < amount {
        return Err(MarketError::InsufficientBalance { required: amount, available: balance });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use vms_common::Paise;

    use super::{sufficient_balance, voucher_available};
    use crate::{db_types::Voucher, errors::MarketError};

    fn voucher(quantity: i64, from_offset: Duration, to_offset: Duration) -> Voucher {
        let now = Utc::now();
        Voucher {
            id: 1,
            name: "Movie night".to_string(),
            description: String::new(),
            category: "entertainment".to_string(),
            price: Paise::from_rupees(40),
            quantity,
            valid_from: now + from_offset,
            valid_to: now + to_offset,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn available_voucher_passes() {
        let v = voucher(5, Duration::days(-1), Duration::days(1));
        assert!(voucher_available(&v, Utc::now()).is_ok());
    }

    #[test]
    fn not_yet_valid_is_expired() {
        let v = voucher(5, Duration::days(1), Duration::days(2));
        assert!(matches!(voucher_available(&v, Utc::now()), Err(MarketError::VoucherExpired(1))));
    }

    #[test]
    fn past_window_is_expired() {
        let v = voucher(5, Duration::days(-2), Duration::days(-1));
        assert!(matches!(voucher_available(&v, Utc::now()), Err(MarketError::VoucherExpired(1))));
    }

    #[test]
    fn zero_stock_is_out_of_stock() {
        let v = voucher(0, Duration::days(-1), Duration::days(1));
        assert!(matches!(voucher_available(&v, Utc::now()), Err(MarketError::VoucherOutOfStock(1))));
    }

    #[test]
    fn expiry_wins_over_stock() {
        // An expired, sold-out voucher reports expiry; the window check runs first.
        let v = voucher(0, Duration::days(-2), Duration::days(-1));
        assert!(matches!(voucher_available(&v, Utc::now()), Err(MarketError::VoucherExpired(1))));
    }

    #[test]
    fn balance_checks() {
        assert!(sufficient_balance(Paise::from_rupees(100), Paise::from_rupees(40)).is_ok());
        assert!(sufficient_balance(Paise::from_rupees(40), Paise::from_rupees(40)).is_ok());
        assert!(matches!(
            sufficient_balance(Paise::from_rupees(10), Paise::from_rupees(40)),
            Err(MarketError::InsufficientBalance { .. })
        ));
        assert!(matches!(sufficient_balance(Paise::from_rupees(10), Paise::from(0)), Err(MarketError::InvalidAmount)));
        assert!(matches!(
            sufficient_balance(Paise::from_rupees(10), Paise::from(-100)),
            Err(MarketError::InvalidAmount)
        ));
    }
}
