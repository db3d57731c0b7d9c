//! Per-visitor storefront state.
//!
//! A shopper owns everything one browser session can change: the filter,
//! the cart and its drawer, the checkout machine, the assistant's latest
//! answer and the design gallery. Handlers hold the shopper's lock only
//! for synchronous updates.

use std::time::{Duration, Instant};

use ragvynn_core::{
    Cart, CartPolicy, Checkout, CheckoutError, DesignGallery, FilterState, Slot,
};

/// State of one visitor.
#[derive(Debug, Clone, Default)]
pub struct Shopper {
    pub filter: FilterState,
    pub cart: Cart,
    /// Whether the cart drawer is showing.
    pub cart_open: bool,
    pub checkout: Checkout,
    /// Last rejected checkout attempt, cleared by the next successful action.
    pub checkout_notice: Option<CheckoutError>,
    /// Latest style advice.
    pub advice: Slot<String>,
    pub gallery: DesignGallery,
    /// Pending lab generation; results land in `gallery`.
    pub design: Slot<()>,
    pub design_notice: Option<&'static str>,
}

impl Shopper {
    #[must_use]
    pub fn new(checkout_delay: Duration, cart_policy: CartPolicy) -> Self {
        Self {
            checkout: Checkout::new(checkout_delay, cart_policy),
            ..Self::default()
        }
    }

    /// Apply any time-driven transitions due at `now`.
    ///
    /// Returns `true` if checkout completed on this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.checkout.advance(&mut self.cart, now)
    }

    /// Start checkout, opening the drawer on success.
    ///
    /// # Errors
    ///
    /// Returns the rejection, which is also kept in `checkout_notice`.
    pub fn begin_checkout(&mut self, now: Instant) -> Result<Instant, CheckoutError> {
        self.tick(now);
        match self.checkout.begin(&self.cart, now) {
            Ok(done_at) => {
                self.checkout_notice = None;
                self.cart_open = true;
                Ok(done_at)
            }
            Err(e) => {
                self.checkout_notice = Some(e);
                Err(e)
            }
        }
    }

    /// Leave the success screen, closing the drawer.
    pub fn dismiss_checkout(&mut self, now: Instant) -> bool {
        self.tick(now);
        self.checkout_notice = None;
        let dismissed = self.checkout.dismiss();
        if dismissed {
            self.cart_open = false;
        }
        dismissed
    }
}

/// The current instant on the runtime clock.
///
/// Goes through tokio so paused-time tests control it.
#[must_use]
pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}
