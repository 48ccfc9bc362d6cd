//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the relay core and the outside world. Adapters implement these ports.
//!
//! - `EventTransport` - Push delivery to one connection or to all of them.

mod transport;

pub use transport::EventTransport;
