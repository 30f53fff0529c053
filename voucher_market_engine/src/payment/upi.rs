use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::*;
use rand::{thread_rng, Rng};
use vms_common::Paise;

use super::{PaymentOutcome, PaymentProcessor};

pub const DEFAULT_SUCCESS_RATE: f64 = 0.95;
const MIN_DELAY_MS: u64 = 100;
const MAX_DELAY_MS: u64 = 500;

/// A stand-in UPI payment network.
///
/// Confirms a charge after an artificial 100–499 ms round-trip, approving with probability `success_rate`.
/// Non-positive amounts are declined immediately. Internal problems never surface as errors; the worst a caller
/// can see is a decline.
#[derive(Debug, Clone)]
pub struct UpiSimulator {
    success_rate: f64,
}

impl UpiSimulator {
    /// Creates a simulator with the given approval probability. Rates outside `[0.0, 1.0]` fall back to the
    /// default; 0.0 and 1.0 are legitimate forced-decline / forced-approve configurations.
    pub fn new(success_rate: f64) -> Self {
        let success_rate = if !(0.0..=1.0).contains(&success_rate) {
            warn!("💸️ {success_rate} is not a valid success rate. Using the default, {DEFAULT_SUCCESS_RATE}");
            DEFAULT_SUCCESS_RATE
        } else {
            success_rate
        };
        Self { success_rate }
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

impl Default for UpiSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_RATE)
    }
}

#[async_trait]
impl PaymentProcessor for UpiSimulator {
    async fn confirm(&self, amount: Paise, user_id: i64, transaction_id: i64) -> PaymentOutcome {
        if !amount.is_positive() {
            debug!("💸️ Rejecting non-positive charge of {amount} for user {user_id}");
            return PaymentOutcome::declined("invalid payment amount");
        }
        // The rng handle must not live across the await, so the rolls are scoped.
        let delay_ms = { thread_rng().gen_range(MIN_DELAY_MS..MAX_DELAY_MS) };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        let approved = { thread_rng().gen::<f64>() < self.success_rate };
        if approved {
            let confirmation_id = format!("UPI_{user_id}_{transaction_id}_{}", Utc::now().timestamp());
            debug!("💸️ Charge of {amount} approved after {delay_ms}ms. Confirmation {confirmation_id}");
            PaymentOutcome::approved(confirmation_id, "payment processed successfully")
        } else {
            debug!("💸️ Charge of {amount} for user {user_id} declined after {delay_ms}ms");
            PaymentOutcome::declined("payment processing failed")
        }
    }
}

#[cfg(test)]
mod test {
    use vms_common::Paise;

    use super::{UpiSimulator, DEFAULT_SUCCESS_RATE};
    use crate::payment::PaymentProcessor;

    #[test]
    fn out_of_range_rates_fall_back_to_default() {
        assert_eq!(UpiSimulator::new(1.7).success_rate(), DEFAULT_SUCCESS_RATE);
        assert_eq!(UpiSimulator::new(-0.2).success_rate(), DEFAULT_SUCCESS_RATE);
        assert_eq!(UpiSimulator::new(0.0).success_rate(), 0.0);
        assert_eq!(UpiSimulator::new(1.0).success_rate(), 1.0);
    }

    #[tokio::test]
    async fn forced_approve_produces_a_confirmation_id() {
        let upi = UpiSimulator::new(1.0);
        let outcome = upi.confirm(Paise::from_rupees(40), 3, 17).await;
        assert!(outcome.success);
        let id = outcome.confirmation_id.expect("approved outcome must carry a confirmation id");
        assert!(id.starts_with("UPI_3_17_"), "unexpected confirmation id format: {id}");
    }

    #[tokio::test]
    async fn forced_decline_has_no_confirmation_id() {
        let upi = UpiSimulator::new(0.0);
        let outcome = upi.confirm(Paise::from_rupees(40), 3, 17).await;
        assert!(!outcome.success);
        assert!(outcome.confirmation_id.is_none());
    }

    #[tokio::test]
    async fn non_positive_amounts_are_declined_immediately() {
        let upi = UpiSimulator::new(1.0);
        let start = std::time::Instant::now();
        let outcome = upi.confirm(Paise::from(0), 3, 17).await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "invalid payment amount");
        // No artificial round-trip for a charge that never leaves the building.
        assert!(start.elapsed().as_millis() < 100);
    }
}
