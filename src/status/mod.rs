//! Status aggregation: turns discovery and lookup results into a menu.
//!
//! This module provides:
//! - Rendering-ready rows ([`DisplayRow`], [`MenuEntry`])
//! - Clipboard text extraction ([`extract_copy_text`])
//! - The per-refresh state machine ([`StatusBoard`], [`CyclePhase`])
//! - The coordinator task and its handle ([`StatusService`], [`StatusHandle`])
//! - The display adapter boundary ([`DisplaySink`], [`WatchSink`])

mod board;
mod row;
mod service;

pub use board::{CycleId, CyclePhase, DiscoveryOutcome, StatusBoard};
pub use row::{DISCOVERY_FAILED, DisplayRow, MenuEntry, NO_CONNECTIONS, extract_copy_text};
pub use service::{
    DisplaySink, MenuSnapshot, ServiceStopped, StatusHandle, StatusService, WatchSink,
};
