//! Domain library for the customer registry.
//!
//! Holds the customer record, the lookup filter, the ports (id generation and
//! storage) and the error definitions. The registry itself is in-memory and
//! synchronous; adapters live under [`adapters`].

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Lowest customer id a generator may draw (inclusive).
pub const CUSTOMER_ID_MIN: u32 = 1000;
/// Highest customer id a generator may draw (inclusive).
pub const CUSTOMER_ID_MAX: u32 = 9999;

/// Cosmetic customer identifier. Never used as a lookup key and not unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerId(u32);

impl CustomerId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input data for creating a new customer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub account_number: String,
    pub sort_code: String,
    pub customer_type: String,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        account_number: impl Into<String>,
        sort_code: impl Into<String>,
        customer_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            account_number: account_number.into(),
            sort_code: sort_code.into(),
            customer_type: customer_type.into(),
        }
    }
}

/// A stored customer record.
///
/// Fields are fixed at construction; there are no setters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Customer {
    name: String,
    account_number: String,
    sort_code: String,
    customer_type: String,
    customer_id: CustomerId,
}

impl Customer {
    /// Build a customer, drawing its id from `ids`.
    ///
    /// No field is validated; any text is accepted as-is.
    pub fn new<G: CustomerIdGenerator + ?Sized>(
        name: impl Into<String>,
        account_number: impl Into<String>,
        sort_code: impl Into<String>,
        customer_type: impl Into<String>,
        ids: &G,
    ) -> Self {
        Self {
            name: name.into(),
            account_number: account_number.into(),
            sort_code: sort_code.into(),
            customer_type: customer_type.into(),
            customer_id: ids.next_id(),
        }
    }

    /// Build a customer from a [`NewCustomer`] input.
    pub fn from_input<G: CustomerIdGenerator + ?Sized>(input: NewCustomer, ids: &G) -> Self {
        Self::new(
            input.name,
            input.account_number,
            input.sort_code,
            input.customer_type,
            ids,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn sort_code(&self) -> &str {
        &self.sort_code
    }

    pub fn customer_type(&self) -> &str {
        &self.customer_type
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, Account: {}, Sort Code: {}, Type: {}",
            self.name, self.account_number, self.sort_code, self.customer_type
        )
    }
}

/// Optional equality constraints for customer lookups.
///
/// `None` means the field is not filtered on. `Some(String::new())` is a real
/// filter that only matches records whose field is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFilter {
    pub account_number: Option<String>,
    pub sort_code: Option<String>,
    pub customer_type: Option<String>,
}

impl CustomerFilter {
    /// A filter with no constraints; matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_number(mut self, value: impl Into<String>) -> Self {
        self.account_number = Some(value.into());
        self
    }

    pub fn sort_code(mut self, value: impl Into<String>) -> Self {
        self.sort_code = Some(value.into());
        self
    }

    pub fn customer_type(mut self, value: impl Into<String>) -> Self {
        self.customer_type = Some(value.into());
        self
    }

    /// True when no field is constrained.
    pub fn is_unfiltered(&self) -> bool {
        self.account_number.is_none() && self.sort_code.is_none() && self.customer_type.is_none()
    }

    /// Exact, case-sensitive match on every constrained field.
    pub fn matches(&self, customer: &Customer) -> bool {
        field_matches(self.account_number.as_deref(), customer.account_number())
            && field_matches(self.sort_code.as_deref(), customer.sort_code())
            && field_matches(self.customer_type.as_deref(), customer.customer_type())
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(wanted) => wanted == actual,
        None => true,
    }
}

/// Customer id source abstraction to make record construction testable.
pub trait CustomerIdGenerator: Send + Sync {
    fn next_id(&self) -> CustomerId;
}

/// Storage port for customer records.
///
/// Records are kept in insertion order and never removed.
pub trait CustomerRepository {
    /// Append a record. Always succeeds.
    fn add(&mut self, customer: Customer);
    /// All records matching `filter`, in insertion order.
    fn find(&self, filter: &CustomerFilter) -> Vec<&Customer>;
    /// Every stored record, in insertion order.
    fn all(&self) -> &[Customer];

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether input fields are checked before a record is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Accept any text in every field.
    #[default]
    Permissive,
    /// Reject malformed account numbers and sort codes, and empty names or types.
    Strict,
}

/// A rejected input field under [`ValidationPolicy::Strict`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("customer name must not be empty")]
    EmptyName,
    #[error("invalid account number '{0}': expected 8 digits")]
    InvalidAccountNumber(String),
    #[error("invalid sort code '{0}': expected NN-NN-NN")]
    InvalidSortCode(String),
    #[error("customer type must not be empty")]
    EmptyCustomerType,
}

/// Core domain errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("repository error: {0}")]
    Repository(String),
}

/// Return a short about/version line for the binary to print.
pub fn about() -> String {
    let pkg = env!("CARGO_PKG_NAME");
    let ver = env!("CARGO_PKG_VERSION");
    format!("{} v{} - domain library loaded", pkg, ver)
}

pub mod adapters;
pub mod id;
pub mod service;
pub mod validate;
