// Rust guideline compliant 2026-02-23

//! Lazily-loaded, process-wide model handle.

use std::fmt;

use domain::{FeatureRow, Model, ModelError};
use once_cell::sync::OnceCell;

/// Name reported before the first successful load.
const UNLOADED: &str = "unloaded";

/// `Model` adapter that loads its inner model on first use and reuses it.
///
/// The loader runs at most once per successful load; a failed load is not
/// cached, so the next call retries. After loading the handle is read-only.
pub struct ModelGateway<M, L> {
    loader: L,
    handle: OnceCell<M>,
}

impl<M, L> ModelGateway<M, L>
where
    M: Model,
    L: Fn() -> Result<M, ModelError>,
{
    /// Wrap `loader` without running it.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self { loader, handle: OnceCell::new() }
    }

    /// Return the loaded model, loading it now if this is the first call.
    ///
    /// # Errors
    ///
    /// Returns whatever the loader returns, normally `ModelError::Unavailable`.
    pub fn load(&self) -> Result<&M, ModelError> {
        self.handle.get_or_try_init(|| {
            tracing::info!("model_gateway.load: loading model artifact");
            let model = (self.loader)().inspect_err(|e| {
                tracing::error!(error = %e, "model_gateway.load.failed");
            })?;
            tracing::info!(
                model_name = model.name(),
                model_version = model.version(),
                "model_gateway.loaded"
            );
            Ok(model)
        })
    }

    /// `true` once a load has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl<M: fmt::Debug, L> fmt::Debug for ModelGateway<M, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelGateway").field("handle", &self.handle).finish_non_exhaustive()
    }
}

impl<M, L> Model for ModelGateway<M, L>
where
    M: Model,
    L: Fn() -> Result<M, ModelError>,
{
    /// Load on first use, then delegate to the inner model.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Unavailable` if loading fails, or the inner
    /// model's `ModelError::InferenceFailed`.
    async fn classify(&self, row: &FeatureRow) -> Result<i64, ModelError> {
        self.load()?.classify(row).await
    }

    /// Inner model name, or `"unloaded"` before the first load.
    fn name(&self) -> &str {
        self.handle.get().map_or(UNLOADED, |m| m.name())
    }

    /// Inner model version, or `"unloaded"` before the first load.
    fn version(&self) -> &str {
        self.handle.get().map_or(UNLOADED, |m| m.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CustomerSegment, Market, OrderInput, ShippingMode, TransactionType, assemble};
    use std::cell::Cell;

    #[derive(Debug)]
    struct FixedModel(i64);

    impl Model for FixedModel {
        async fn classify(&self, _row: &FeatureRow) -> Result<i64, ModelError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "FIXED"
        }

        fn version(&self) -> &str {
            "1"
        }
    }

    fn make_row() -> FeatureRow {
        assemble(OrderInput {
            transaction_type: TransactionType::Cash,
            customer_segment: CustomerSegment::Corporate,
            market: Market::Eu,
            order_region: "West".to_owned(),
            shipping_mode: ShippingMode::FirstClass,
            discount_rate: 0.0,
            product_price: 10.0,
            quantity: 2,
            profit_per_order: 1.0,
            shipping_delay_days: 1.0,
        })
    }

    #[tokio::test]
    async fn loads_once_across_calls() {
        let loads = Cell::new(0_u32);
        let gateway = ModelGateway::new(|| {
            loads.set(loads.get() + 1);
            Ok(FixedModel(2))
        });
        assert!(!gateway.is_loaded());
        assert_eq!(gateway.name(), "unloaded");

        for _ in 0..3 {
            assert_eq!(gateway.classify(&make_row()).await.unwrap(), 2);
        }
        assert_eq!(loads.get(), 1, "loader must run exactly once");
        assert!(gateway.is_loaded());
        assert_eq!(gateway.name(), "FIXED");
        assert_eq!(gateway.version(), "1");
    }

    #[tokio::test]
    async fn failed_load_surfaces_unavailable_and_is_retried() {
        let loads = Cell::new(0_u32);
        let gateway = ModelGateway::new(|| -> Result<FixedModel, ModelError> {
            loads.set(loads.get() + 1);
            Err(ModelError::Unavailable { reason: "no such file".to_owned() })
        });

        let err = gateway.classify(&make_row()).await.unwrap_err();
        assert!(err.is_fatal());
        assert!(gateway.load().is_err());
        assert_eq!(loads.get(), 2);
        assert!(!gateway.is_loaded());
    }
}
