//! Pricing configuration.
//!
//! The engine has no hidden constants: the risk-free rate and every rounding
//! scale come from a [`PricingConfig`]. Files may be JSON or YAML; missing
//! keys fall back to the defaults below.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RateFuturesError;
use crate::types::Rate;
use crate::RateFuturesResult;

/// Reference annual risk-free rate used for coupon discounting and carry.
pub const DEFAULT_RISK_FREE_RATE: Rate = dec!(0.03);

/// Scale of the running coupon present-value sum.
pub const DEFAULT_WORKING_SCALE: u32 = 10;

/// Scale of the time-to-maturity year fraction.
pub const DEFAULT_HORIZON_SCALE: u32 = 10;

/// Scale of theoretical price, contract value and initial margin.
pub const DEFAULT_MONETARY_SCALE: u32 = 4;

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Annual risk-free rate (decimal, 0.03 = 3%)
    pub risk_free_rate: Rate,
    /// Decimal places kept after each addition in the coupon PV sum
    pub working_scale: u32,
    /// Decimal places of the maturity horizon in years
    pub horizon_scale: u32,
    /// Decimal places of every monetary output
    pub monetary_scale: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            working_scale: DEFAULT_WORKING_SCALE,
            horizon_scale: DEFAULT_HORIZON_SCALE,
            monetary_scale: DEFAULT_MONETARY_SCALE,
        }
    }
}

impl PricingConfig {
    pub fn with_risk_free_rate(mut self, rate: Rate) -> Self {
        self.risk_free_rate = rate;
        self
    }

    pub fn validate(&self) -> RateFuturesResult<()> {
        if self.risk_free_rate <= dec!(-1) {
            return Err(RateFuturesError::InvalidInput {
                field: "risk_free_rate".into(),
                reason: "Risk-free rate must be greater than -100%".into(),
            });
        }
        for (field, scale) in [
            ("working_scale", self.working_scale),
            ("horizon_scale", self.horizon_scale),
            ("monetary_scale", self.monetary_scale),
        ] {
            if scale > MAX_SCALE {
                return Err(RateFuturesError::InvalidInput {
                    field: field.into(),
                    reason: format!("Scale {scale} exceeds the maximum of {MAX_SCALE}"),
                });
            }
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> RateFuturesResult<Self> {
        let config: PricingConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> RateFuturesResult<Self> {
        let config: PricingConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> RateFuturesResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            RateFuturesError::ConfigError(format!("Failed to read '{}': {e}", path.display()))
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw),
            Some("json") => Self::from_json_str(&raw),
            _ => Err(RateFuturesError::ConfigError(format!(
                "Unsupported config format for '{}' (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }
}

/// Ensure a rate is usable as a discounting base.
pub(crate) fn check_rate(field: &str, rate: Decimal) -> RateFuturesResult<()> {
    if rate <= dec!(-1) {
        return Err(RateFuturesError::InvalidInput {
            field: field.into(),
            reason: "Rate must be greater than -100%".into(),
        });
    }
    Ok(())
}
