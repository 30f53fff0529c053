//! The external payment confirmation contract.
//!
//! The purchase scope hands the pending charge to a [`PaymentProcessor`] and branches on the outcome. A decline is
//! a first-class result, not an error: implementations must degrade any internal problem to
//! `PaymentOutcome::declined` rather than failing the caller.

mod upi;

use async_trait::async_trait;
use vms_common::Paise;

pub use upi::{UpiSimulator, DEFAULT_SUCCESS_RATE};

/// The result of asking the payment network to confirm a charge.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub success: bool,
    /// The processor's confirmation identifier. Present if and only if the charge was approved.
    pub confirmation_id: Option<String>,
    pub message: String,
}

impl PaymentOutcome {
    pub fn approved<C: Into<String>, M: Into<String>>(confirmation_id: C, message: M) -> Self {
        Self { success: true, confirmation_id: Some(confirmation_id.into()), message: message.into() }
    }

    pub fn declined<S: Into<String>>(message: S) -> Self {
        Self { success: false, confirmation_id: None, message: message.into() }
    }
}

/// An external payment network. Outcomes are non-deterministic; callers must treat a decline as an ordinary,
/// expected result and never as a transport failure.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn confirm(&self, amount: Paise, user_id: i64, transaction_id: i64) -> PaymentOutcome;
}
