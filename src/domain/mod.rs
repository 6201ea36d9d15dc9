//! Domain layer - Pure business abstractions
//!
//! Trait definitions for the external collaborators, the filter/sort
//! descriptors with their contract functions, and the domain error taxonomy.
//! No Axum, no HTTP plumbing beyond an error conversion.

pub mod errors;
pub mod query;
pub mod store;

pub use errors::DomainError;
pub use query::*;
pub use store::*;
