//! `intranet-core` — domain foundation building blocks.
//!
//! Pure domain primitives shared by the access policy, the task board and the
//! portal session layer. No IO lives here.

pub mod aggregate;
pub mod error;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{TaskId, UserId};
