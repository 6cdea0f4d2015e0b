//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound `WindowHost` port.

mod in_memory_host;

pub use in_memory_host::{InMemoryWindowHost, OpenFailure};
