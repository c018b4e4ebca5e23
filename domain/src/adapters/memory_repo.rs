use crate::{Customer, CustomerFilter, CustomerRepository};

/// Simple in-memory customer store. Records are kept in insertion order and
/// never deduplicated or removed.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRepo {
    customers: Vec<Customer>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            customers: Vec::new(),
        }
    }
}

impl CustomerRepository for InMemoryRepo {
    fn add(&mut self, customer: Customer) {
        tracing::debug!(
            customer_id = %customer.customer_id(),
            account_number = customer.account_number(),
            "adding customer"
        );
        self.customers.push(customer);
    }

    fn find(&self, filter: &CustomerFilter) -> Vec<&Customer> {
        let matches: Vec<&Customer> = self
            .customers
            .iter()
            .filter(|customer| filter.matches(customer))
            .collect();
        tracing::debug!(
            ?filter,
            unfiltered = filter.is_unfiltered(),
            scanned = self.customers.len(),
            matched = matches.len(),
            "customer lookup"
        );
        matches
    }

    fn all(&self) -> &[Customer] {
        &self.customers
    }
}
