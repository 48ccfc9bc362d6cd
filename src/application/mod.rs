//! Application core - registry, routing, and the heartbeat.
//!
//! Everything in here is transport-agnostic: the registry is a plain
//! in-memory map, the router is a pure function from inbound event to
//! deliveries, and the heartbeat only talks to the transport port.

mod heartbeat;
mod registry;
mod router;

pub use heartbeat::{demo_catalog, AlertSeed, HeartbeatEmitter};
pub use registry::ConnectionRegistry;
pub use router::{dispatch, route, Delivery, DeliveryTarget};
