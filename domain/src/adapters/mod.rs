//! Storage adapters that live inside the domain crate.
//!
//! The registry only ever needs an in-memory store; other backends would
//! live in separate crates.

pub mod memory_repo;
