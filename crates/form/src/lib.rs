// Rust guideline compliant 2026-02-23

//! Order form component -- the raw field values a user submits, their
//! defaults, and the numeric range checks applied before assembly.
//!
//! Entry points: [`OrderForm::default`], [`OrderForm::validate`].
//! Closed-set fields are typed, so only numeric ranges are checked here.

use domain::{CustomerSegment, Market, OrderInput, ShippingMode, TransactionType};

// ---------------------------------------------------------------------------
// FormError
// ---------------------------------------------------------------------------

/// Errors raised while validating a submitted form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// A numeric field lies outside its declared range.
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        /// Field name as shown on the form.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// A numeric field is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Field name as shown on the form.
        field: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Inclusive numeric range declared for one form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Field name as shown on the form.
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const DISCOUNT_RATE: Self = Self { field: "Discount Rate", min: 0.0, max: 1.0 };
    pub const PRODUCT_PRICE: Self = Self { field: "Product Price", min: 0.0, max: 10_000.0 };
    pub const QUANTITY: Self = Self { field: "Quantity", min: 1.0, max: 1_000.0 };
    pub const PROFIT_PER_ORDER: Self =
        Self { field: "Profit Per Order", min: -10_000.0, max: 10_000.0 };
    pub const SHIPPING_DELAY_DAYS: Self =
        Self { field: "Shipping Delay Days", min: -10.0, max: 30.0 };

    /// Check `value` against this range.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotFinite`] for NaN or infinities, otherwise
    /// [`FormError::OutOfRange`] when `value` is outside `[min, max]`.
    pub fn check(&self, value: f64) -> Result<f64, FormError> {
        if !value.is_finite() {
            return Err(FormError::NotFinite { field: self.field });
        }
        if value < self.min || value > self.max {
            return Err(FormError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// OrderForm
// ---------------------------------------------------------------------------

/// Field values as submitted, before range validation.
///
/// Missing fields fall back to the form defaults when deserialized.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderForm {
    pub transaction_type: TransactionType,
    pub customer_segment: CustomerSegment,
    pub market: Market,
    pub order_region: String,
    pub shipping_mode: ShippingMode,
    pub discount_rate: f64,
    pub product_price: f64,
    pub quantity: u32,
    pub profit_per_order: f64,
    pub shipping_delay_days: f64,
}

impl Default for OrderForm {
    /// The values a fresh form is pre-filled with.
    fn default() -> Self {
        Self {
            transaction_type: TransactionType::Debit,
            customer_segment: CustomerSegment::Consumer,
            market: Market::Us,
            order_region: "East".to_owned(),
            shipping_mode: ShippingMode::Standard,
            discount_rate: 0.1,
            product_price: 100.0,
            quantity: 1,
            profit_per_order: 10.0,
            shipping_delay_days: 0.0,
        }
    }
}

impl OrderForm {
    /// Range-check every numeric field and hand back the assembler input.
    ///
    /// Fields are checked in form order; the first violation is returned.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] naming the first field outside its [`Bounds`].
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn validate(self) -> Result<OrderInput, FormError> {
        let discount_rate = Bounds::DISCOUNT_RATE.check(self.discount_rate)?;
        let product_price = Bounds::PRODUCT_PRICE.check(self.product_price)?;
        Bounds::QUANTITY.check(f64::from(self.quantity))?;
        let profit_per_order = Bounds::PROFIT_PER_ORDER.check(self.profit_per_order)?;
        let shipping_delay_days = Bounds::SHIPPING_DELAY_DAYS.check(self.shipping_delay_days)?;
        Ok(OrderInput {
            transaction_type: self.transaction_type,
            customer_segment: self.customer_segment,
            market: self.market,
            order_region: self.order_region,
            shipping_mode: self.shipping_mode,
            discount_rate,
            product_price,
            quantity: self.quantity,
            profit_per_order,
            shipping_delay_days,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
