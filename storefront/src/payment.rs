//! Simulated payment processing.
//!
//! No real charge ever happens. The gateway trait exists so the booking
//! flow can be exercised against deterministic success, decline, and
//! latency behavior.

use crate::types::CardForm;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Charge errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChargeError {
    /// The simulated processor declined the card
    #[error("card declined: {0}")]
    Declined(String),
}

/// Receipt for a completed simulated charge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeReceipt {
    /// Processor-issued transaction identifier
    pub transaction_id: String,
    /// Amount charged
    pub amount: u32,
}

/// Boxed future returned by gateway operations
pub type ChargeFuture = Pin<Box<dyn Future<Output = Result<ChargeReceipt, ChargeError>> + Send>>;

/// A payment processor
pub trait PaymentGateway: Send + Sync {
    /// Charge a card for `amount`
    fn charge(&self, card: CardForm, amount: u32) -> ChargeFuture;
}

/// Simulated gateway with configurable latency and outcome
pub struct SimulatedGateway {
    latency: Duration,
    decline: bool,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedGateway {
    /// Gateway that approves after a short processing delay
    #[must_use]
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(100),
            decline: false,
        }
    }

    /// Gateway that approves immediately, for tests
    #[must_use]
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            decline: false,
        }
    }

    /// Gateway that declines every charge
    #[must_use]
    pub fn declining() -> Self {
        Self {
            latency: Duration::ZERO,
            decline: true,
        }
    }
}

impl PaymentGateway for SimulatedGateway {
    fn charge(&self, card: CardForm, amount: u32) -> ChargeFuture {
        let latency = self.latency;
        let decline = self.decline;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            if decline {
                return Err(ChargeError::Declined(
                    "the card was declined by the processor".to_string(),
                ));
            }
            let digits: String = card.number.chars().filter(char::is_ascii_digit).collect();
            let last_four = &digits[digits.len().saturating_sub(4)..];
            let transaction_id = format!("txn-{}", uuid::Uuid::new_v4());
            debug!(%transaction_id, amount, card = %format!("****{last_four}"), "simulated charge approved");
            Ok(ChargeReceipt {
                transaction_id,
                amount,
            })
        })
    }
}
