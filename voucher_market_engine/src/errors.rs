use thiserror::Error;
use vms_common::{Paise, RpcCode};

/// The closed set of failure conditions used across the marketplace engine and its collaborators.
///
/// Transport layers classify on the variant (see [`MarketError::code`]), never on the message text.
#[derive(Debug, Clone, Error)]
pub enum MarketError {
    #[error("{0} is not a valid user id")]
    InvalidUserId(i64),
    #[error("{0} is not a valid voucher id")]
    InvalidVoucherId(i64),
    #[error("The amount must be positive")]
    InvalidAmount,
    #[error("The price filter is invalid. Prices must be non-negative and min may not exceed max")]
    InvalidPrice,
    #[error("User {0} does not exist")]
    UserNotFound(String),
    #[error("Voucher {0} does not exist")]
    VoucherNotFound(i64),
    #[error("No wallet exists for user {0}")]
    WalletNotFound(i64),
    #[error("Transaction {0} does not exist")]
    TransactionNotFound(i64),
    #[error("Voucher {0} is out of stock")]
    VoucherOutOfStock(i64),
    #[error("Voucher {0} is outside its validity window")]
    VoucherExpired(i64),
    #[error("Insufficient wallet balance. The purchase needs {required}, but only {available} is available")]
    InsufficientBalance { required: Paise, available: Paise },
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Payment processing failed. {0}")]
    PaymentProcessingFailed(String),
    #[error("Internal storage error. {0}")]
    Database(String),
}

impl MarketError {
    /// Classifies this error into its RPC status code class. This is the only mapping from domain failures to
    /// transport codes; gateways map the resulting code onward without re-deriving anything from the message.
    pub fn code(&self) -> RpcCode {
        use MarketError::*;
        match self {
            InvalidUserId(_) | InvalidVoucherId(_) | InvalidAmount | InvalidPrice => RpcCode::InvalidArgument,
            UserNotFound(_) | VoucherNotFound(_) | WalletNotFound(_) | TransactionNotFound(_) => RpcCode::NotFound,
            VoucherOutOfStock(_) | VoucherExpired(_) | InsufficientBalance { .. } => RpcCode::FailedPrecondition,
            InvalidCredentials => RpcCode::Unauthenticated,
            PaymentProcessingFailed(_) | Database(_) => RpcCode::Internal,
        }
    }

    /// Prefixes storage errors with the purchase step that produced them. Domain errors pass through untouched so
    /// their classification survives the trip through the atomic scope.
    pub fn with_context(self, step: &str) -> Self {
        match self {
            MarketError::Database(msg) => MarketError::Database(format!("{step}: {msg}")),
            other => other,
        }
    }
}

impl From<sqlx::Error> for MarketError {
    fn from(e: sqlx::Error) -> Self {
        MarketError::Database(e.to_string())
    }
}

#[cfg(test)]
mod test {
    use vms_common::{Paise, RpcCode};

    use super::MarketError;

    #[test]
    fn classifier_covers_every_kind() {
        let cases = [
            (MarketError::InvalidUserId(0), RpcCode::InvalidArgument),
            (MarketError::InvalidVoucherId(-3), RpcCode::InvalidArgument),
            (MarketError::InvalidAmount, RpcCode::InvalidArgument),
            (MarketError::InvalidPrice, RpcCode::InvalidArgument),
            (MarketError::UserNotFound("7".into()), RpcCode::NotFound),
            (MarketError::VoucherNotFound(7), RpcCode::NotFound),
            (MarketError::WalletNotFound(7), RpcCode::NotFound),
            (MarketError::TransactionNotFound(7), RpcCode::NotFound),
            (MarketError::VoucherOutOfStock(7), RpcCode::FailedPrecondition),
            (MarketError::VoucherExpired(7), RpcCode::FailedPrecondition),
            (
                MarketError::InsufficientBalance { required: Paise::from(4_000), available: Paise::from(1_000) },
                RpcCode::FailedPrecondition,
            ),
            (MarketError::InvalidCredentials, RpcCode::Unauthenticated),
            (MarketError::PaymentProcessingFailed("declined".into()), RpcCode::Internal),
            (MarketError::Database("disk on fire".into()), RpcCode::Internal),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code, "{err} classified incorrectly");
        }
    }

    #[test]
    fn context_only_wraps_storage_errors() {
        let wrapped = MarketError::Database("no such table".into()).with_context("debit wallet");
        assert!(matches!(&wrapped, MarketError::Database(msg) if msg.starts_with("debit wallet: ")));
        let untouched = MarketError::VoucherOutOfStock(3).with_context("decrement stock");
        assert!(matches!(untouched, MarketError::VoucherOutOfStock(3)));
    }
}
