//! Voucher Market Engine
//!
//! The engine contains the business logic of the voucher marketplace: users authenticate, browse vouchers and buy
//! them against a wallet balance, with every purchase attempt recorded as an auditable transaction. It is
//! transport-agnostic; the RPC service and HTTP gateway live in their own crates.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should never need to
//!    access the database directly; use the public APIs instead. The exception is the data types used in the
//!    database, defined in the [`mod@db_types`] module, which are public.
//! 2. The engine's public API ([`mod@vme_api`]), most importantly the purchase orchestrator
//!    ([`PurchaseApi`]): the one place where multiple records must change consistently despite a fallible
//!    external payment dependency. Backends implement the traits in [`mod@traits`] to power these APIs.
//! 3. The payment confirmation contract ([`mod@payment`]), including the stand-in UPI network used in lieu of a
//!    real payment processor.
pub mod availability;
pub mod db_types;
pub mod errors;
pub mod payment;
mod sqlite;
pub mod traits;
mod vme_api;

pub use errors::MarketError;
pub use sqlite::SqliteDatabase;
pub use vme_api::{AccountApi, AuthApi, CatalogApi, PurchaseApi};
