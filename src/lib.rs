//! `ShowNet`: network status at a glance.
//!
//! A library for discovering the host's interface addresses and public
//! IP addresses, and turning them into copyable menu rows.

pub mod config;
pub mod lookup;
pub mod network;
pub mod status;
