use crate::validate::validate_new_customer;
use crate::{
    CoreError, Customer, CustomerFilter, CustomerIdGenerator, CustomerRepository, NewCustomer,
    ValidationPolicy,
};

/// Application service orchestrating creation and lookup of customers.
///
/// It is generic over the repository and the id generator so tests can pin
/// ids and swap storage without touching the lookup rules.
pub struct CustomerService<R: CustomerRepository, G: CustomerIdGenerator> {
    repo: R,
    ids: G,
    policy: ValidationPolicy,
}

impl<R: CustomerRepository, G: CustomerIdGenerator> CustomerService<R, G> {
    pub fn new(repo: R, ids: G) -> Self {
        Self::with_policy(repo, ids, ValidationPolicy::Permissive)
    }

    pub fn with_policy(repo: R, ids: G, policy: ValidationPolicy) -> Self {
        Self { repo, ids, policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Build a customer with a freshly drawn id. Does not store it.
    ///
    /// Only fails under [`ValidationPolicy::Strict`].
    pub fn create_customer(&self, input: NewCustomer) -> Result<Customer, CoreError> {
        if self.policy == ValidationPolicy::Strict {
            if let Err(e) = validate_new_customer(&input) {
                tracing::warn!(error = %e, "rejected customer input");
                return Err(e.into());
            }
        }
        Ok(Customer::from_input(input, &self.ids))
    }

    /// Append a customer to the registry.
    pub fn add_customer(&mut self, customer: Customer) {
        self.repo.add(customer);
    }

    /// Create and store a customer, returning the stored record.
    pub fn register(&mut self, input: NewCustomer) -> Result<&Customer, CoreError> {
        let customer = self.create_customer(input)?;
        self.repo.add(customer);
        self.repo
            .all()
            .last()
            .ok_or_else(|| CoreError::Repository("added customer was not stored".into()))
    }

    /// All customers matching every constrained field of `filter`.
    pub fn find_customer(&self, filter: &CustomerFilter) -> Vec<&Customer> {
        self.repo.find(filter)
    }

    /// Every stored customer in insertion order.
    pub fn customers(&self) -> &[Customer] {
        self.repo.all()
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_repo::InMemoryRepo;
    use crate::id::{FixedIdGenerator, RandomIdGenerator};
    use crate::ValidationError;

    /// Accepts records but never keeps them.
    struct DiscardingRepo;

    impl CustomerRepository for DiscardingRepo {
        fn add(&mut self, _customer: Customer) {}

        fn find(&self, _filter: &CustomerFilter) -> Vec<&Customer> {
            Vec::new()
        }

        fn all(&self) -> &[Customer] {
            &[]
        }
    }

    fn reference_service() -> CustomerService<InMemoryRepo, RandomIdGenerator> {
        let mut svc = CustomerService::new(InMemoryRepo::new(), RandomIdGenerator::new());
        let a = svc
            .create_customer(NewCustomer::new("John Doe", "12345678", "12-34-56", "personal"))
            .unwrap();
        let b = svc
            .create_customer(NewCustomer::new("Jane Smith", "87654321", "65-43-21", "business"))
            .unwrap();
        svc.add_customer(a);
        svc.add_customer(b);
        svc
    }

    fn names<'a>(found: &[&'a Customer]) -> Vec<&'a str> {
        found.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn starts_empty() {
        let svc = CustomerService::new(InMemoryRepo::new(), RandomIdGenerator::new());
        assert!(svc.is_empty());
        assert_eq!(svc.len(), 0);
    }

    #[test]
    fn added_customer_can_be_found() {
        let mut svc = reference_service();
        let c = svc
            .create_customer(NewCustomer::new("Alice Johnson", "11223344", "11-22-33", "personal"))
            .unwrap();
        svc.add_customer(c);
        assert_eq!(svc.len(), 3);

        let found = svc.find_customer(&CustomerFilter::new().account_number("11223344"));
        assert_eq!(names(&found), ["Alice Johnson"]);
    }

    #[test]
    fn reference_lookups() {
        let svc = reference_service();
        let stored = svc.customers();

        let by_account = svc.find_customer(&CustomerFilter::new().account_number("12345678"));
        assert_eq!(by_account.len(), 1);
        assert!(std::ptr::eq(by_account[0], &stored[0]));

        let by_sort = svc.find_customer(&CustomerFilter::new().sort_code("65-43-21"));
        assert_eq!(by_sort.len(), 1);
        assert!(std::ptr::eq(by_sort[0], &stored[1]));

        let by_type = svc.find_customer(&CustomerFilter::new().customer_type("business"));
        assert_eq!(by_type.len(), 1);
        assert!(std::ptr::eq(by_type[0], &stored[1]));

        assert!(svc
            .find_customer(&CustomerFilter::new().account_number("99999999"))
            .is_empty());
    }

    #[test]
    fn conjunctive_lookup_across_all_fields() {
        let svc = reference_service();
        let filter = CustomerFilter::new()
            .account_number("12345678")
            .sort_code("12-34-56")
            .customer_type("personal");
        assert_eq!(names(&svc.find_customer(&filter)), ["John Doe"]);

        let mismatched = filter.customer_type("business");
        assert!(svc.find_customer(&mismatched).is_empty());
    }

    #[test]
    fn no_criteria_returns_all_customers() {
        let svc = reference_service();
        let found = svc.find_customer(&CustomerFilter::new());
        assert_eq!(names(&found), ["John Doe", "Jane Smith"]);
        for (got, stored) in found.iter().zip(svc.customers()) {
            assert!(std::ptr::eq(*got, stored));
        }
    }

    #[test]
    fn fixed_generator_pins_customer_id() {
        let mut svc = CustomerService::new(InMemoryRepo::new(), FixedIdGenerator::new(1234));
        let stored = svc
            .register(NewCustomer::new("John Doe", "12345678", "12-34-56", "personal"))
            .unwrap();
        assert_eq!(stored.customer_id().get(), 1234);
        assert_eq!(stored.name(), "John Doe");
        assert_eq!(stored.customer_type(), "personal");
    }

    #[test]
    fn duplicate_ids_are_tolerated() {
        let mut svc = CustomerService::new(InMemoryRepo::new(), FixedIdGenerator::new(1234));
        svc.register(NewCustomer::new("A", "1", "x", "personal")).unwrap();
        svc.register(NewCustomer::new("B", "2", "y", "personal")).unwrap();
        assert_eq!(svc.len(), 2);
        assert!(svc.customers().iter().all(|c| c.customer_id().get() == 1234));
    }

    #[test]
    fn permissive_policy_accepts_malformed_input() {
        let mut svc = CustomerService::new(InMemoryRepo::new(), FixedIdGenerator::new(1000));
        assert_eq!(svc.policy(), ValidationPolicy::Permissive);
        let stored = svc.register(NewCustomer::new("", "abc", "123456", "")).unwrap();
        assert_eq!(stored.sort_code(), "123456");
    }

    #[test]
    fn strict_policy_rejects_malformed_sort_code() {
        let mut svc = CustomerService::with_policy(
            InMemoryRepo::new(),
            FixedIdGenerator::new(1000),
            ValidationPolicy::Strict,
        );
        let err = svc
            .register(NewCustomer::new("John Doe", "12345678", "123456", "personal"))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::InvalidSortCode("123456".into()))
        );
        assert!(svc.is_empty());

        svc.register(NewCustomer::new("John Doe", "12345678", "12-34-56", "personal"))
            .unwrap();
        assert_eq!(svc.len(), 1);
    }

    #[test]
    fn register_reports_repository_that_drops_records() {
        let mut svc = CustomerService::new(DiscardingRepo, FixedIdGenerator::new(1234));
        let err = svc
            .register(NewCustomer::new("John Doe", "12345678", "12-34-56", "personal"))
            .unwrap_err();
        assert!(matches!(err, CoreError::Repository(_)));
        assert!(svc.is_empty());
    }
}
