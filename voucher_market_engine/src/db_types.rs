use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use vms_common::Paise;

//--------------------------------------        User         ---------------------------------------------------------
/// A registered user. Read-only as far as the engine is concerned; registration happens elsewhere.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Stored credential. Never serialized outward; only compared during login.
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       Voucher       ---------------------------------------------------------
/// A purchasable catalog item with a fixed price, a finite stock count and an active time window.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Voucher {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Paise,
    pub quantity: i64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       Wallet        ---------------------------------------------------------
/// A per-user monetary balance. The balance is only ever debited inside the purchase scope.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub user_id: i64,
    pub balance: Paise,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------  TransactionType    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Purchase,
    Refund,
    Topup,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Purchase => write!(f, "purchase"),
            TransactionType::Refund => write!(f, "refund"),
            TransactionType::Topup => write!(f, "topup"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid transaction type: {0}")]
pub struct ConversionError(String);

impl FromStr for TransactionType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "refund" => Ok(Self::Refund),
            "topup" => Ok(Self::Topup),
            s => Err(ConversionError(format!("Invalid transaction type: {s}"))),
        }
    }
}

//--------------------------------------   PaymentStatus     ---------------------------------------------------------
/// Lifecycle state of a transaction record. The only legal moves are pending → success and pending → failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Success | PaymentStatus::Failed)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Success => write!(f, "success"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------     Transaction     ---------------------------------------------------------
/// An audit record of a purchase attempt. Immutable once its status reaches a terminal state.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub voucher_id: Option<i64>,
    pub amount: Paise,
    pub transaction_type: TransactionType,
    pub payment_status: PaymentStatus,
    pub payment_txn_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------  VoucherSearchQuery ---------------------------------------------------------
/// Filter criteria for the catalog search. Only vouchers inside their active window and with stock are returned;
/// these filters narrow that set further.
#[derive(Debug, Clone, Default)]
pub struct VoucherSearchQuery {
    pub category: Option<String>,
    pub min_price: Option<Paise>,
    pub max_price: Option<Paise>,
    pub pagination: Pagination,
}

impl VoucherSearchQuery {
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_min_price(mut self, price: Paise) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn with_max_price(mut self, price: Paise) -> Self {
        self.max_price = Some(price);
        self
    }
}

//--------------------------------------      Pagination     ---------------------------------------------------------
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

pub const DEFAULT_PAGE_SIZE: i64 = 50;

impl Default for Pagination {
    fn default() -> Self {
        Self { limit: DEFAULT_PAGE_SIZE, offset: 0 }
    }
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = offset.filter(|o| *o >= 0).unwrap_or(0);
        Self { limit, offset }
    }
}
