//! Horeca Relay - Real-Time Event Relay for Restaurant Floor Operations
//!
//! This crate implements a single-process broadcast relay: staff devices
//! connect over WebSocket, register an identity and role, and receive
//! floor events (alerts, voice orders, checklist completions, incident
//! reports) fanned out to everyone or to a role-filtered subset.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
