//! Finance engine configuration

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Timezone};

use crate::error::FinanceError;

/// How a partially paid entry past its due date is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialPaidDisplay {
    /// Keep showing PARTIAL_PAID
    KeepPartialPaid,
    /// Show as DUE like any other late unpaid entry
    ShowAsDue,
}

impl Default for PartialPaidDisplay {
    fn default() -> Self {
        PartialPaidDisplay::KeepPartialPaid
    }
}

/// What to do with a negative outstanding balance
///
/// Outstanding values are never clamped under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// Report the negative outstanding as a credit
    SurfaceAsCredit,
    /// Report it and log a warning so the entry can be reviewed
    FlagForReview,
}

impl Default for OverpaymentPolicy {
    fn default() -> Self {
        OverpaymentPolicy::SurfaceAsCredit
    }
}

/// Finance engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    /// Currency for records that carry none
    pub default_currency: Currency,
    /// Timezone deciding what "today" is
    pub timezone: Timezone,
    /// Display of late partially paid entries
    pub partial_paid_display: PartialPaidDisplay,
    /// Handling of overpaid balances
    pub overpayment_policy: OverpaymentPolicy,
}

impl FinanceConfig {
    /// Loads configuration from `FINANCE_*` environment variables
    ///
    /// e.g. `FINANCE_DEFAULT_CURRENCY=IDR`, `FINANCE_TIMEZONE=Asia/Jakarta`,
    /// `FINANCE_PARTIAL_PAID_DISPLAY=show_as_due`.
    pub fn from_env() -> Result<Self, FinanceError> {
        Self::from_source(config::Environment::with_prefix("FINANCE"))
    }

    /// Loads configuration from any `config` source, filling in defaults
    pub fn from_source<S>(source: S) -> Result<Self, FinanceError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let loaded = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }

    /// Today's calendar date in the configured timezone
    pub fn today(&self) -> chrono::NaiveDate {
        self.timezone.today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FinanceConfig::default();
        assert_eq!(config.default_currency, Currency::IDR);
        assert_eq!(config.timezone, Timezone::default());
        assert_eq!(config.partial_paid_display, PartialPaidDisplay::KeepPartialPaid);
        assert_eq!(config.overpayment_policy, OverpaymentPolicy::SurfaceAsCredit);
    }

    #[test]
    fn test_overrides_from_source() {
        let source = config::File::from_str(
            r#"{
                "default_currency": "SGD",
                "timezone": "Asia/Jakarta",
                "partial_paid_display": "show_as_due"
            }"#,
            config::FileFormat::Json,
        );

        let config = FinanceConfig::from_source(source).unwrap();
        assert_eq!(config.default_currency, Currency::SGD);
        assert_eq!(config.timezone, jakarta());
        assert_eq!(config.partial_paid_display, PartialPaidDisplay::ShowAsDue);
        assert_eq!(config.overpayment_policy, OverpaymentPolicy::SurfaceAsCredit);
    }

    #[test]
    fn test_invalid_value_is_configuration_error() {
        let source = config::File::from_str(
            r#"{ "overpayment_policy": "ignore" }"#,
            config::FileFormat::Json,
        );

        assert!(matches!(
            FinanceConfig::from_source(source),
            Err(FinanceError::Configuration(_))
        ));
    }

    fn jakarta() -> Timezone {
        serde_json::from_str("\"Asia/Jakarta\"").unwrap()
    }
}
