//! Engine configuration, validation, and error types.
//!
//! [`GarageConfig`] bundles everything that was once compiled-in global
//! state (layout, rates, rounding units) into one immutable value handed
//! to [`GarageEngine::new`](crate::GarageEngine::new).

use std::error::Error;
use std::fmt;

use garage_billing::{BillingConfig, BillingConfigError};
use garage_layout::{LayoutConfig, LayoutError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`GarageConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Layout is structurally invalid.
    Layout(LayoutError),
    /// Billing rounding units are invalid.
    Billing(BillingConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::Billing(e) => write!(f, "billing: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Billing(e) => Some(e),
        }
    }
}

impl From<LayoutError> for ConfigError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<BillingConfigError> for ConfigError {
    fn from(e: BillingConfigError) -> Self {
        Self::Billing(e)
    }
}

// ── GarageConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing a [`GarageEngine`](crate::GarageEngine).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GarageConfig {
    /// Levels, rows and spaces.
    pub layout: LayoutConfig,
    /// Rates and rounding.
    pub billing: BillingConfig,
    /// Milliseconds added to the clock when stamping a checkout.
    ///
    /// Zero in production. A positive value makes every stay look longer,
    /// which lets a tester see non-trivial amounts without waiting.
    pub checkout_offset_ms: i64,
}

impl GarageConfig {
    /// Reference garage (20 handicapped, 120 small, 80 large) at reference
    /// rates.
    pub fn reference() -> Self {
        Self {
            layout: LayoutConfig::reference(),
            billing: BillingConfig::reference(),
            checkout_offset_ms: 0,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.billing.validate()?;
        Ok(())
    }
}
