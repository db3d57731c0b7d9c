//! The checkout state machine.
//!
//! ```text
//! idle ──begin (cart non-empty)──▶ processing ──delay elapsed──▶ success
//!  ▲                                                               │
//!  └───────────────────────────── dismiss ─────────────────────────┘
//! ```
//!
//! There is no payment backend and no failure branch: processing always
//! succeeds once the delay has elapsed. Time is supplied by the caller.
//!
//! The order is a copy of the cart taken when processing starts. The cart
//! stays editable meanwhile; `clear-on-success` deducts only the order.

use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;

/// Default simulated processing latency.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Checkout states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Processing { started_at: Instant },
    Success,
}

/// What happens to the cart when an order completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CartPolicy {
    /// Leave the cart untouched.
    #[default]
    Retain,
    /// Remove the ordered lines from the cart when processing reaches success.
    ClearOnSuccess,
}

impl FromStr for CartPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "clear-on-success" | "clear" => Ok(Self::ClearOnSuccess),
            other => Err(format!("expected `retain` or `clear-on-success`, got `{other}`")),
        }
    }
}

/// Reasons a checkout cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,
    #[error("checkout already in progress")]
    AlreadyProcessing,
    #[error("previous order must be dismissed first")]
    AwaitingDismissal,
}

/// Checkout machine for one shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    state: CheckoutState,
    delay: Duration,
    policy: CartPolicy,
    /// Lines being processed or just confirmed. `None` while idle.
    order: Option<Cart>,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY, CartPolicy::default())
    }
}

impl Checkout {
    #[must_use]
    pub const fn new(delay: Duration, policy: CartPolicy) -> Self {
        Self {
            state: CheckoutState::Idle,
            delay,
            policy,
            order: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn policy(&self) -> CartPolicy {
        self.policy
    }

    /// The cart as it was when checkout began.
    #[must_use]
    pub const fn order(&self) -> Option<&Cart> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self.state, CheckoutState::Processing { .. })
    }

    /// `idle → processing`.
    ///
    /// Returns the instant at which processing will be complete.
    ///
    /// # Errors
    ///
    /// Rejects an empty cart, and any call made outside the idle state.
    pub fn begin(&mut self, cart: &Cart, now: Instant) -> Result<Instant, CheckoutError> {
        match self.state {
            CheckoutState::Processing { .. } => Err(CheckoutError::AlreadyProcessing),
            CheckoutState::Success => Err(CheckoutError::AwaitingDismissal),
            CheckoutState::Idle if cart.is_empty() => Err(CheckoutError::EmptyCart),
            CheckoutState::Idle => {
                self.state = CheckoutState::Processing { started_at: now };
                self.order = Some(cart.clone());
                Ok(now + self.delay)
            }
        }
    }

    /// `processing → success` once the delay has elapsed at `now`.
    ///
    /// Applies the cart policy on the transition. Returns `true` if the
    /// transition happened on this call.
    pub fn advance(&mut self, cart: &mut Cart, now: Instant) -> bool {
        let CheckoutState::Processing { started_at } = self.state else {
            return false;
        };
        if now.saturating_duration_since(started_at) < self.delay {
            return false;
        }

        self.state = CheckoutState::Success;
        if self.policy == CartPolicy::ClearOnSuccess
            && let Some(order) = &self.order
        {
            cart.deduct(order);
        }
        true
    }

    /// `success → idle`. Any other state is left unchanged.
    pub fn dismiss(&mut self) -> bool {
        if self.state == CheckoutState::Success {
            self.state = CheckoutState::Idle;
            self.order = None;
            true
        } else {
            false
        }
    }
}
