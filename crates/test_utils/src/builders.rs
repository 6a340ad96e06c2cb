//! Test Data Builders
//!
//! Provides builder patterns for constructing schedules and stored records
//! with sensible defaults. Tests specify only the entries they care about.

use chrono::NaiveDate;
use core_kernel::{Currency, PolicyId};
use domain_finance::{
    BusinessType, Entry, EntryStatus, EntryType, FinanceSchedule, Installment, PolicyReference,
    ScheduleRecord,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};

/// Builder for in-memory schedules
pub struct TestScheduleBuilder {
    policy_id: PolicyId,
    currency: Currency,
    business_type: BusinessType,
    reference: PolicyReference,
    installments: Vec<Installment>,
}

impl Default for TestScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScheduleBuilder {
    /// Creates a builder for an empty direct IDR schedule
    pub fn new() -> Self {
        Self {
            policy_id: PolicyId::new(),
            currency: Currency::IDR,
            business_type: BusinessType::Direct,
            reference: PolicyReference::default(),
            installments: Vec::new(),
        }
    }

    /// Sets the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the business type
    pub fn with_business_type(mut self, business_type: BusinessType) -> Self {
        self.business_type = business_type;
        self
    }

    /// Sets the policy number
    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.reference.policy_number = Some(number.into());
        self
    }

    /// Sets the client name
    pub fn with_client(mut self, name: impl Into<String>) -> Self {
        self.reference.client_name = Some(name.into());
        self
    }

    /// Sets the insurer name
    pub fn with_insurer(mut self, name: impl Into<String>) -> Self {
        self.reference.insurer_name = Some(name.into());
        self
    }

    /// Adds a whole installment
    pub fn with_installment(mut self, installment: Installment) -> Self {
        self.installments.push(installment);
        self
    }

    /// Adds an entry to the last installment, opening installment 1 if none exists
    pub fn with_entry(mut self, entry: Entry) -> Self {
        if self.installments.is_empty() {
            self.installments.push(Installment::new(1));
        }
        if let Some(last) = self.installments.last_mut() {
            last.entries.push(entry);
        }
        self
    }

    /// Adds a canonical entry with a due date and status
    pub fn with_due(self, entry_type: EntryType, amount: Decimal, due: NaiveDate, status: EntryStatus) -> Self {
        self.with_entry(Entry::of_type(entry_type, amount).with_due_date(due).with_status(status))
    }

    /// Builds the schedule
    ///
    /// # Panics
    ///
    /// Panics if two installments share a number
    pub fn build(self) -> FinanceSchedule {
        FinanceSchedule::new(self.policy_id, self.currency, self.business_type)
            .with_reference(self.reference)
            .with_installments(self.installments)
            .expect("test schedule has duplicate installment numbers")
    }
}

/// Builder for stored schedule records, as the storage layer returns them
pub struct TestRecordBuilder {
    fields: serde_json::Map<String, Value>,
    installments: Vec<Value>,
}

impl Default for TestRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRecordBuilder {
    /// Creates a record with only a policy id
    pub fn new() -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("policy_id".to_string(), json!(PolicyId::new()));
        Self {
            fields,
            installments: Vec::new(),
        }
    }

    /// Sets any top-level field to a raw JSON value
    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Adds an installment from raw entry objects
    pub fn with_installment(mut self, number: Value, entries: Vec<Value>) -> Self {
        self.installments.push(json!({ "installment": number, "entries": entries }));
        self
    }

    /// The record as JSON
    pub fn to_json(&self) -> Value {
        let mut fields = self.fields.clone();
        fields.insert("installments".to_string(), Value::Array(self.installments.clone()));
        Value::Object(fields)
    }

    /// Deserializes the record
    ///
    /// # Panics
    ///
    /// Panics if the fields do not form a valid record
    pub fn build(self) -> ScheduleRecord {
        serde_json::from_value(self.to_json()).expect("test record does not deserialize")
    }
}
