//! Domain layer - event vocabulary and shared primitives.

pub mod events;
pub mod foundation;
