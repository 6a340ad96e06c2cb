//! Entry classification
//!
//! Maps the free-text fields stored on a schedule onto the closed sets the
//! rest of the engine works with: the canonical entry type, the payment
//! status, and the business type of the policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Description label for premium collected from the client
pub const PREMIUM_FROM_CLIENT: &str = "Premium (From Client)";
/// Description label for premium remitted to the insurer
pub const PREMIUM_TO_INSURER: &str = "Premium to Insurer";
/// Description label for commission received from the insurer
pub const COMMISSION_IN: &str = "Commission In";
/// Description label for commission paid to the source of business
pub const COMMISSION_TO_SOURCE: &str = "Commission to Source";

/// The semantic purpose of a schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Premium owed by the client to the brokerage
    PremiumFromClient,
    /// Premium owed by the brokerage to the insurer
    PremiumToInsurer,
    /// Commission owed by the insurer to the brokerage
    CommissionIn,
    /// Commission owed by the brokerage to the source of business
    CommissionToSource,
    /// Any description outside the four canonical labels
    Other,
}

impl EntryType {
    /// The four canonical types, in display order
    pub const CANONICAL: [EntryType; 4] = [
        EntryType::PremiumFromClient,
        EntryType::PremiumToInsurer,
        EntryType::CommissionIn,
        EntryType::CommissionToSource,
    ];

    /// Classifies a description by exact, case-sensitive match
    pub fn classify(description: &str) -> Self {
        match description {
            PREMIUM_FROM_CLIENT => EntryType::PremiumFromClient,
            PREMIUM_TO_INSURER => EntryType::PremiumToInsurer,
            COMMISSION_IN => EntryType::CommissionIn,
            COMMISSION_TO_SOURCE => EntryType::CommissionToSource,
            _ => EntryType::Other,
        }
    }

    /// Returns the canonical description label, if any
    pub fn label(&self) -> Option<&'static str> {
        match self {
            EntryType::PremiumFromClient => Some(PREMIUM_FROM_CLIENT),
            EntryType::PremiumToInsurer => Some(PREMIUM_TO_INSURER),
            EntryType::CommissionIn => Some(COMMISSION_IN),
            EntryType::CommissionToSource => Some(COMMISSION_TO_SOURCE),
            EntryType::Other => None,
        }
    }

    /// Returns true for the four recognized types
    pub fn is_canonical(&self) -> bool {
        !matches!(self, EntryType::Other)
    }

    /// Returns the premium/commission grouping of this type
    pub fn category(&self) -> EntryCategory {
        match self {
            EntryType::PremiumFromClient | EntryType::PremiumToInsurer => EntryCategory::Premium,
            EntryType::CommissionIn | EntryType::CommissionToSource => EntryCategory::Commission,
            EntryType::Other => EntryCategory::Other,
        }
    }

    /// Stable code used for sorting and display
    pub fn code(&self) -> &'static str {
        match self {
            EntryType::PremiumFromClient => "PREMIUM_FROM_CLIENT",
            EntryType::PremiumToInsurer => "PREMIUM_TO_INSURER",
            EntryType::CommissionIn => "COMMISSION_IN",
            EntryType::CommissionToSource => "COMMISSION_TO_SOURCE",
            EntryType::Other => "OTHER",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().unwrap_or("Other"))
    }
}

/// Coarse grouping of entry types for the premium / commission report filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryCategory {
    Premium,
    Commission,
    Other,
}

/// Payment status of a schedule entry
///
/// The advisory lifecycle is `NotDue -> Due -> PartialPaid -> Paid`, with the
/// paid states reachable from anywhere. Nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    NotDue,
    Due,
    PartialPaid,
    Paid,
}

impl EntryStatus {
    /// Normalizes a stored status token, defaulting to `NotDue`
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
            Some("DUE") => EntryStatus::Due,
            Some("PARTIAL_PAID") => EntryStatus::PartialPaid,
            Some("PAID") => EntryStatus::Paid,
            _ => EntryStatus::NotDue,
        }
    }

    /// Returns the stored token
    pub fn code(&self) -> &'static str {
        match self {
            EntryStatus::NotDue => "NOT_DUE",
            EntryStatus::Due => "DUE",
            EntryStatus::PartialPaid => "PARTIAL_PAID",
            EntryStatus::Paid => "PAID",
        }
    }

    /// Only a fully paid entry counts as settled; partial payments stay open
    pub fn is_settled(&self) -> bool {
        matches!(self, EntryStatus::Paid)
    }
}

impl Default for EntryStatus {
    fn default() -> Self {
        EntryStatus::NotDue
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Whether premium flows through the brokerage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessType {
    /// Premium is collected from the client and remitted to the insurer
    Direct,
    /// The client pays the insurer directly; only commission flows here
    NonDirect,
}

impl BusinessType {
    /// Normalizes a free-text business type, defaulting to `Direct`
    ///
    /// Accepts "non direct", "non_direct", and "non-direct" in any case.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return BusinessType::Direct;
        };

        match raw.trim().to_lowercase().as_str() {
            "non direct" | "non_direct" | "non-direct" => BusinessType::NonDirect,
            _ => BusinessType::Direct,
        }
    }

    /// Returns true if premium entries belong on this business's schedules
    pub fn carries_premium(&self) -> bool {
        matches!(self, BusinessType::Direct)
    }
}

impl Default for BusinessType {
    fn default() -> Self {
        BusinessType::Direct
    }
}
