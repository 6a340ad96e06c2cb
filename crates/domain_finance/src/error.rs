//! Finance domain errors

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur in the finance domain
///
/// Summaries, aging, and projections are total functions and never fail;
/// errors come from loading records, editing a schedule, or configuration.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// No installment with this number exists in the schedule
    #[error("Installment not found: {0}")]
    InstallmentNotFound(u32),

    /// No entry at this position within the installment
    #[error("Entry not found: installment {installment}, position {position}")]
    EntryNotFound {
        installment: u32,
        position: usize,
    },

    /// Two installments in one schedule share a number
    #[error("Duplicate installment number: {0}")]
    DuplicateInstallment(u32),

    /// Currency code is not one the brokerage books in
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Error bubbled up from the core kernel
    #[error(transparent)]
    Core(#[from] CoreError),
}
