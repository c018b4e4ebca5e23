//! Customer id generation strategies.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{CustomerId, CustomerIdGenerator, CUSTOMER_ID_MAX, CUSTOMER_ID_MIN};

/// Draws ids uniformly from `[CUSTOMER_ID_MIN, CUSTOMER_ID_MAX]` using the
/// thread-local RNG. Ids may repeat.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CustomerIdGenerator for RandomIdGenerator {
    fn next_id(&self) -> CustomerId {
        let id = rand::thread_rng().gen_range(CUSTOMER_ID_MIN..=CUSTOMER_ID_MAX);
        tracing::trace!(customer_id = id, "drew random customer id");
        CustomerId::new(id)
    }
}

/// Same range as [`RandomIdGenerator`], but reproducible from a seed.
#[derive(Debug)]
pub struct SeededIdGenerator {
    rng: Mutex<StdRng>,
}

impl SeededIdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CustomerIdGenerator for SeededIdGenerator {
    fn next_id(&self) -> CustomerId {
        // A panic mid-draw leaves the RNG state intact, so poisoning is harmless here.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let id = rng.gen_range(CUSTOMER_ID_MIN..=CUSTOMER_ID_MAX);
        tracing::trace!(customer_id = id, "drew seeded customer id");
        CustomerId::new(id)
    }
}

/// Always hands out the same id. Useful for deterministic tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedIdGenerator {
    id: CustomerId,
}

impl FixedIdGenerator {
    pub fn new(id: u32) -> Self {
        Self {
            id: CustomerId::new(id),
        }
    }
}

impl CustomerIdGenerator for FixedIdGenerator {
    fn next_id(&self) -> CustomerId {
        self.id
    }
}
