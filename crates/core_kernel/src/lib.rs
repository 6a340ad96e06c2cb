//! Core Kernel - Foundational types shared by the brokerage finance crates
//!
//! This crate provides the building blocks used by the finance engine:
//! - Money types with precise decimal arithmetic
//! - Calendar-date helpers for due dates and aging
//! - Strongly-typed identifiers for schedules, policies, and parties

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{Timezone, TemporalError, parse_calendar_date, days_between, days_between_at};
pub use identifiers::{ScheduleId, PolicyId, PartyId};
pub use error::CoreError;
