//! Checkout workflow.
//!
//! A linear pipeline with four checkpoints, each gating the next:
//!
//! 1. [`CheckoutWorkflow::select_product`] - capture the chosen phone
//!    configuration as a persisted product
//! 2. [`CheckoutWorkflow::confirm_delivery`] - delivery address complete
//!    and terms accepted
//! 3. [`CheckoutWorkflow::submit_payment`] - payment method valid
//! 4. [`CheckoutWorkflow::place_order`] - create the order, idempotently
//!    within this workflow instance
//!
//! A workflow instance holds only screen-lifetime state; abandoning it
//! abandons the pending checkout. Re-running a fresh instance for the same
//! product is caught by the ledger's duplicate-order guard.

pub mod payment;

pub use payment::{CardDetails, PaymentError, PaymentMethod};

use thiserror::Error;

use crate::config::Config;
use crate::db::Store;
use crate::models::{Order, Product, Session};
use crate::services::catalog::{CatalogCaptureService, CatalogError};
use crate::services::orders::{OrderError, OrderLedger};

use cenphone_core::OrderStatus;

/// Errors that can occur while stepping through checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No authenticated user in the session.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// A later checkpoint was entered before product selection.
    #[error("no product has been selected")]
    ProductNotSelected,

    /// A later checkpoint was entered before delivery confirmation.
    #[error("delivery information has not been confirmed")]
    DeliveryNotConfirmed,

    /// Order placement was attempted before payment.
    #[error("payment has not been submitted")]
    PaymentNotSubmitted,

    /// A delivery address field was empty.
    #[error("missing delivery field: {0}")]
    MissingDeliveryField(&'static str),

    /// The terms checkbox was left unchecked.
    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,

    /// Payment validation failed.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Product capture failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Order creation failed.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Delivery information confirmed on the customer-info screen.
#[derive(Debug, Clone)]
pub struct DeliveryDetails {
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    /// Whether the shopper ticked the terms-and-conditions box.
    pub terms_accepted: bool,
}

impl DeliveryDetails {
    fn validate(&self) -> Result<(), CheckoutError> {
        for (value, field) in [
            (&self.street_address, "street address"),
            (&self.city, "city"),
            (&self.province, "province"),
            (&self.country, "country"),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingDeliveryField(field));
            }
        }
        if !self.terms_accepted {
            return Err(CheckoutError::TermsNotAccepted);
        }
        Ok(())
    }
}

/// One shopper's pass through checkout.
pub struct CheckoutWorkflow<'a, S> {
    catalog: CatalogCaptureService<'a, S>,
    ledger: OrderLedger<'a, S>,
    session: &'a Session,
    product: Option<Product>,
    delivery: Option<DeliveryDetails>,
    payment_submitted: bool,
    placed: Option<Order>,
}

impl<'a, S: Store> CheckoutWorkflow<'a, S> {
    /// Start a checkout for the session's current user.
    #[must_use]
    pub const fn new(store: &'a S, config: &'a Config, session: &'a Session) -> Self {
        Self {
            catalog: CatalogCaptureService::new(store),
            ledger: OrderLedger::new(store, config),
            session,
            product: None,
            delivery: None,
            payment_submitted: false,
            placed: None,
        }
    }

    /// Checkpoint 1: capture the chosen configuration as a product.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotLoggedIn`] without a session user, or a
    /// capture error from the catalog service.
    pub fn select_product(
        &mut self,
        make: &str,
        model: &str,
        color: &str,
        storage: &str,
        price_display: &str,
    ) -> Result<&Product, CheckoutError> {
        let shopper = self.session.current().ok_or(CheckoutError::NotLoggedIn)?;

        let product =
            self.catalog
                .capture_selection(make, model, color, storage, price_display, Some(shopper.id))?;

        tracing::debug!(product_id = %product.id, "checkout: product selected");
        Ok(self.product.insert(product))
    }

    /// Checkpoint 2: confirm delivery information.
    ///
    /// All four address fields must be non-empty and the terms flag set.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::ProductNotSelected`] out of order, or a
    /// validation error.
    pub fn confirm_delivery(&mut self, delivery: DeliveryDetails) -> Result<(), CheckoutError> {
        if self.product.is_none() {
            return Err(CheckoutError::ProductNotSelected);
        }
        delivery.validate()?;
        self.delivery = Some(delivery);
        tracing::debug!("checkout: delivery confirmed");
        Ok(())
    }

    /// Checkpoint 3: validate the chosen payment method.
    ///
    /// Card details are checked and dropped; nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::DeliveryNotConfirmed`] out of order, or a
    /// [`PaymentError`] for invalid card details.
    pub fn submit_payment(&mut self, method: &PaymentMethod) -> Result<(), CheckoutError> {
        if self.delivery.is_none() {
            return Err(CheckoutError::DeliveryNotConfirmed);
        }
        method.validate()?;
        self.payment_submitted = true;
        tracing::debug!(method = method.label(), "checkout: payment accepted");
        Ok(())
    }

    /// Checkpoint 4: create the order.
    ///
    /// Idempotent for the lifetime of this workflow instance: a second
    /// call returns the already-placed order instead of attempting a
    /// duplicate creation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::PaymentNotSubmitted`] out of order, or an
    /// [`OrderError`] from the ledger (including
    /// [`OrderError::DuplicateOrder`] when a previous workflow instance
    /// already ordered this product).
    pub fn place_order(&mut self) -> Result<Order, CheckoutError> {
        if let Some(order) = &self.placed {
            return Ok(order.clone());
        }

        if !self.payment_submitted {
            return Err(CheckoutError::PaymentNotSubmitted);
        }
        let shopper = self.session.current().ok_or(CheckoutError::NotLoggedIn)?;
        let product = self.product.as_ref().ok_or(CheckoutError::ProductNotSelected)?;

        let order = self.ledger.create_order(
            shopper.id,
            product.id,
            product.price.amount(),
            OrderStatus::Confirmed,
        )?;

        tracing::info!(order_id = %order.id, "checkout: order placed");
        Ok(self.placed.insert(order).clone())
    }
}
