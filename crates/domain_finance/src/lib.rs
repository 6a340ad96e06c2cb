//! Finance Domain - Installment Schedules, Summaries, and Aging
//!
//! This crate turns a policy's finance schedule into the numbers a broker
//! works from: how much premium and commission is owed, how much has come in,
//! what falls due next, and how late the unpaid entries are.
//!
//! # Entry Types
//!
//! Every entry belongs to exactly one flow, classified from its description:
//! - **Premium from Client**: premium the client pays the brokerage
//! - **Premium to Insurer**: premium the brokerage forwards to the insurer
//! - **Commission In**: commission the brokerage earns
//! - **Commission to Source**: commission owed to the source of business
//!
//! # Aging
//!
//! Unpaid entries with a due date are placed into one of five buckets:
//! `not_due`, `0-30`, `31-60`, `61-90`, and `90_plus`, by whole calendar days
//! past due.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_finance::{RecordLoader, RowProjector, RowQuery, summarize};
//!
//! let schedule = RecordLoader::default().load(record)?;
//! let summary = summarize(&schedule);
//!
//! let rows = RowProjector::new(today).project(&schedule);
//! let late = RowQuery::new().with_status(EntryStatus::Due).apply(rows);
//! ```

pub mod classification;
pub mod schedule;
pub mod records;
pub mod summary;
pub mod aging;
pub mod projection;
pub mod plan;
pub mod listing;
pub mod config;
pub mod error;

pub use classification::{BusinessType, EntryCategory, EntryStatus, EntryType};
pub use schedule::{Entry, FinanceSchedule, Installment, PolicyReference};
pub use records::{EntryRecord, InstallmentRecord, RecordLoader, ScheduleRecord};
pub use summary::{summarize, summarize_many, summarize_with_policy, AmountTriple, ScheduleSummary};
pub use aging::{aging_by_currency, AgingBucket, AgingBuckets};
pub use projection::{effective_status, EntryRow, RowProjector, RowQuery, RowSortField, SortDirection};
pub use plan::{generate_installments, PaymentPlan, PlanTerms};
pub use listing::{ScheduleListQuery, ScheduleListing, ScheduleSortField};
pub use config::{FinanceConfig, OverpaymentPolicy, PartialPaidDisplay};
pub use error::FinanceError;
