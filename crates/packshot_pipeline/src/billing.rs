//! How a finished batch is charged.
//!
//! Charging happens outside the pipeline; this only names the rule so the
//! caller does not pick one by accident.

use packshot_core::BatchResult;
use serde::{Deserialize, Serialize};

/// Which count a finished batch is billed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPolicy {
    /// Charge the pack size that was requested, whatever was delivered.
    #[default]
    RequestedPackSize,
    /// Charge only the images actually produced.
    DeliveredImages,
}

impl BillingPolicy {
    /// Units to charge for `result`.
    ///
    /// An empty batch is a failed generation and is never billable.
    ///
    /// # Examples
    ///
    /// ```
    /// use packshot_core::{BatchResult, PackSize, RenderedImage};
    /// use packshot_pipeline::BillingPolicy;
    ///
    /// let result = BatchResult::new(
    ///     PackSize::Small,
    ///     vec![RenderedImage::new(0, "image/png", vec![1])],
    ///     vec![],
    /// );
    /// assert_eq!(BillingPolicy::RequestedPackSize.billable_units(&result), 5);
    /// assert_eq!(BillingPolicy::DeliveredImages.billable_units(&result), 1);
    /// ```
    pub fn billable_units(self, result: &BatchResult) -> u32 {
        if result.is_empty() {
            return 0;
        }
        match self {
            BillingPolicy::RequestedPackSize => u32::from(*result.requested()),
            BillingPolicy::DeliveredImages => result.len() as u32,
        }
    }
}
