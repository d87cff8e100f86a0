// Rust guideline compliant 2026-02-23

//! Order attributes and the Feature Assembler.
//!
//! [`OrderInput`] carries the raw field values collected by a form;
//! [`assemble`] turns it into the fixed-schema [`FeatureRow`] the classifier
//! expects, deriving `Sales` from price and quantity.

use std::fmt;
use std::str::FromStr;

/// Error returned when a label does not belong to a closed field set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} `{value}`, expected one of: {}", .expected.join(", "))]
pub struct ParseFieldError {
    /// Human-readable field name (e.g. `"shipping mode"`).
    pub field: &'static str,
    /// The rejected input.
    pub value: String,
    /// Every accepted label, in display order.
    pub expected: &'static [&'static str],
}

/// Declares a closed enumeration whose wire and display form is its label.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Accepted labels, in display order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// The label the trained model was fitted on.
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseFieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(ParseFieldError {
                        field: $field,
                        value: s.to_owned(),
                        expected: Self::LABELS,
                    }),
                }
            }
        }
    };
}

closed_set! {
    /// Payment type of the order.
    TransactionType, "transaction type" {
        Debit => "Debit",
        Transfer => "Transfer",
        Cash => "Cash",
    }
}

closed_set! {
    /// Customer segment the order belongs to.
    CustomerSegment, "customer segment" {
        Consumer => "Consumer",
        Corporate => "Corporate",
        HomeOffice => "Home Office",
    }
}

closed_set! {
    /// Sales market.
    Market, "market" {
        Us => "US",
        Eu => "EU",
        Apac => "APAC",
    }
}

closed_set! {
    /// Shipping service level.
    ShippingMode, "shipping mode" {
        Standard => "Standard",
        SecondClass => "Second Class",
        FirstClass => "First Class",
        SameDay => "Same Day",
    }
}

/// Raw order fields as entered by the user.
///
/// Numeric values are expected to be range-checked by the caller; nothing here
/// validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderInput {
    pub transaction_type: TransactionType,
    pub customer_segment: CustomerSegment,
    pub market: Market,
    /// Free-text region name (e.g. `"East"`).
    pub order_region: String,
    pub shipping_mode: ShippingMode,
    /// Discount rate in `[0, 1]`.
    pub discount_rate: f64,
    /// Unit price, `>= 0`.
    pub product_price: f64,
    /// Item count, `>= 1`.
    pub quantity: u32,
    pub profit_per_order: f64,
    /// Positive when the order shipped late, negative when early.
    pub shipping_delay_days: f64,
}

/// One cell of a [`FeatureRow`], borrowed for encoding or export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    /// Categorical or free-text value.
    Text(&'a str),
    /// Integer-valued count.
    Integer(u32),
    /// Real-valued measurement.
    Real(f64),
}

impl FeatureValue<'_> {
    /// Numeric view of the value; `None` for text.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Integer(n) => Some(f64::from(n)),
            Self::Real(x) => Some(x),
        }
    }
}

impl fmt::Display for FeatureValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            // Debug keeps a trailing `.0` on integral floats, matching the
            // float formatting of the training tooling.
            Self::Real(x) => write!(f, "{x:?}"),
        }
    }
}

/// The fixed-schema record submitted to the classifier.
///
/// Only [`assemble`] can build one, so `sales` is always
/// `product_price * quantity`. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    transaction_type: TransactionType,
    customer_segment: CustomerSegment,
    market: Market,
    order_region: String,
    shipping_mode: ShippingMode,
    discount_rate: f64,
    product_price: f64,
    quantity: u32,
    sales: f64,
    profit_per_order: f64,
    shipping_delay_days: f64,
}

impl FeatureRow {
    /// Column names in the order the model artifact expects them.
    pub const COLUMNS: [&'static str; 11] = [
        "Type",
        "Customer Segment",
        "Market",
        "Order Region",
        "Shipping Mode",
        "Order Item Discount Rate",
        "Order Item Product Price",
        "Order Item Quantity",
        "Sales",
        "Order Profit Per Order",
        "Shipping_Delay_Days",
    ];

    /// Columns holding categorical or free-text values.
    pub const CATEGORICAL_COLUMNS: [&'static str; 5] =
        ["Type", "Customer Segment", "Market", "Order Region", "Shipping Mode"];

    /// Cell values, aligned with [`COLUMNS`](Self::COLUMNS).
    #[must_use]
    pub fn values(&self) -> [FeatureValue<'_>; 11] {
        [
            FeatureValue::Text(self.transaction_type.label()),
            FeatureValue::Text(self.customer_segment.label()),
            FeatureValue::Text(self.market.label()),
            FeatureValue::Text(&self.order_region),
            FeatureValue::Text(self.shipping_mode.label()),
            FeatureValue::Real(self.discount_rate),
            FeatureValue::Real(self.product_price),
            FeatureValue::Integer(self.quantity),
            FeatureValue::Real(self.sales),
            FeatureValue::Real(self.profit_per_order),
            FeatureValue::Real(self.shipping_delay_days),
        ]
    }

    /// Look up a single cell by column name.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<FeatureValue<'_>> {
        Self::COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.values()[i])
    }

    #[must_use]
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    #[must_use]
    pub fn customer_segment(&self) -> CustomerSegment {
        self.customer_segment
    }

    #[must_use]
    pub fn market(&self) -> Market {
        self.market
    }

    #[must_use]
    pub fn order_region(&self) -> &str {
        &self.order_region
    }

    #[must_use]
    pub fn shipping_mode(&self) -> ShippingMode {
        self.shipping_mode
    }

    #[must_use]
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    #[must_use]
    pub fn product_price(&self) -> f64 {
        self.product_price
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Derived: `product_price * quantity`.
    #[must_use]
    pub fn sales(&self) -> f64 {
        self.sales
    }

    #[must_use]
    pub fn profit_per_order(&self) -> f64 {
        self.profit_per_order
    }

    #[must_use]
    pub fn shipping_delay_days(&self) -> f64 {
        self.shipping_delay_days
    }
}

/// Build the classifier's feature row from raw order fields.
///
/// Pure and infallible; the only computed field is `sales`.
#[must_use]
pub fn assemble(input: OrderInput) -> FeatureRow {
    let sales = input.product_price * f64::from(input.quantity);
    FeatureRow {
        transaction_type: input.transaction_type,
        customer_segment: input.customer_segment,
        market: input.market,
        order_region: input.order_region,
        shipping_mode: input.shipping_mode,
        discount_rate: input.discount_rate,
        product_price: input.product_price,
        quantity: input.quantity,
        sales,
        profit_per_order: input.profit_per_order,
        shipping_delay_days: input.shipping_delay_days,
    }
}
