//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects, identifiers, and enums that form the
//! vocabulary of the relay domain.

mod identity;
mod role;
mod severity;
mod timestamp;

pub use identity::{ClientIdentity, ConnectionId};
pub use role::Role;
pub use severity::Severity;
pub use timestamp::Timestamp;
