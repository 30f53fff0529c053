use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use voucher_market_engine::db_types::{Transaction, User, Voucher};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user as presented to callers. The stored credential never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub message: String,
}

/// Query parameters of the voucher search. Prices are rupee floats at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchVouchersParams {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

impl From<Voucher> for VoucherItem {
    fn from(voucher: Voucher) -> Self {
        Self {
            id: voucher.id,
            name: voucher.name,
            description: voucher.description,
            category: voucher.category,
            price: voucher.price.as_rupees(),
            quantity: voucher.quantity,
            valid_from: voucher.valid_from,
            valid_to: voucher.valid_to,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchVouchersResponse {
    pub vouchers: Vec<VoucherItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyVoucherRequest {
    pub user_id: i64,
    pub voucher_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_id: Option<i64>,
    pub amount: f64,
    pub transaction_type: String,
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_txn_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionRecord {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            user_id: transaction.user_id,
            voucher_id: transaction.voucher_id,
            amount: transaction.amount.as_rupees(),
            transaction_type: transaction.transaction_type.to_string(),
            payment_status: transaction.payment_status.to_string(),
            payment_txn_id: transaction.payment_txn_id,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyVoucherResponse {
    pub transaction: TransactionRecord,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub user_id: i64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTransactionsResponse {
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
