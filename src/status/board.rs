//! Refresh-cycle state machine owning the displayed menu.
//!
//! [`StatusBoard`] is plain data with no I/O. The coordinator feeds it
//! results tagged with the cycle that requested them; anything tagged
//! with an older cycle is dropped, so a slow lookup from a previous
//! refresh can never overwrite the current menu.

use std::fmt;

use serde::Serialize;

use crate::lookup::PublicAddressResult;
use crate::network::{AddressFamily, DiscoveryError, InterfaceAddress};

use super::row::{DISCOVERY_FAILED, DisplayRow, MenuEntry, NO_CONNECTIONS};

/// Identifier of one refresh cycle. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CycleId(u64);

impl CycleId {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the current cycle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// No refresh has started yet.
    Idle,
    /// The interface listing is being read.
    Discovering,
    /// Interface rows are shown; public lookups are outstanding.
    Partial,
    /// Nothing more will change until the next refresh.
    Complete,
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Discovering => write!(f, "discovering"),
            Self::Partial => write!(f, "partial"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// What the coordinator should do after a discovery result was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// The result belonged to an older cycle and was ignored.
    Stale,
    /// The menu is final; no lookups are needed.
    Settled,
    /// Placeholders were added; both public lookups should start now.
    AwaitingPublic,
}

/// Position of a public-address row and whether it has been finalized.
#[derive(Debug, Clone, Copy)]
struct Placeholder {
    index: usize,
    settled: bool,
}

/// The single owner of the displayed menu.
#[derive(Debug)]
pub struct StatusBoard {
    cycle: CycleId,
    phase: CyclePhase,
    entries: Vec<MenuEntry>,
    placeholders: [Option<Placeholder>; 2],
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    /// Creates an idle board with an empty menu.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cycle: CycleId(0),
            phase: CyclePhase::Idle,
            entries: Vec::new(),
            placeholders: [None, None],
        }
    }

    /// Returns the current cycle id.
    #[must_use]
    pub const fn cycle(&self) -> CycleId {
        self.cycle
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Returns the menu as it should be rendered now.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Starts a new cycle and returns its id.
    ///
    /// The previous menu stays visible until discovery completes, but its
    /// outstanding lookups can no longer change it.
    pub fn begin_cycle(&mut self) -> CycleId {
        self.cycle = self.cycle.next();
        self.phase = CyclePhase::Discovering;
        self.placeholders = [None, None];
        self.cycle
    }

    /// Applies the interface discovery result for `cycle`.
    pub fn apply_discovery(
        &mut self,
        cycle: CycleId,
        result: Result<Vec<InterfaceAddress>, DiscoveryError>,
    ) -> DiscoveryOutcome {
        if cycle != self.cycle || self.phase != CyclePhase::Discovering {
            return DiscoveryOutcome::Stale;
        }

        let records = match result {
            Ok(records) => records,
            Err(_) => {
                self.settle_with(DisplayRow::notice(DISCOVERY_FAILED));
                return DiscoveryOutcome::Settled;
            }
        };

        if records.is_empty() {
            self.settle_with(DisplayRow::notice(NO_CONNECTIONS));
            return DiscoveryOutcome::Settled;
        }

        let mut entries: Vec<MenuEntry> = records
            .iter()
            .map(|record| DisplayRow::interface(record).into())
            .collect();
        entries.push(MenuEntry::Separator);

        for family in AddressFamily::ALL {
            self.placeholders[slot(family)] = Some(Placeholder {
                index: entries.len(),
                settled: false,
            });
            entries.push(DisplayRow::public_loading(family).into());
        }

        self.entries = entries;
        self.phase = CyclePhase::Partial;
        DiscoveryOutcome::AwaitingPublic
    }

    /// Applies a public lookup result for `cycle`.
    ///
    /// Returns `false` when the result was ignored: it came from an older
    /// cycle, there is no placeholder for it, or that family was already
    /// finalized in this cycle.
    pub fn apply_public(&mut self, cycle: CycleId, result: &PublicAddressResult) -> bool {
        if cycle != self.cycle {
            return false;
        }

        let Some(placeholder) = self.placeholders[slot(result.family)].as_mut() else {
            return false;
        };
        if placeholder.settled {
            return false;
        }
        placeholder.settled = true;

        self.entries[placeholder.index] =
            DisplayRow::public_result(result.family, result.value.as_deref()).into();

        if self.placeholders.iter().flatten().all(|p| p.settled) {
            self.phase = CyclePhase::Complete;
        }
        true
    }

    /// Returns the clipboard text for the entry at `index`.
    ///
    /// Separators, disabled rows and out-of-range indices yield `None`.
    #[must_use]
    pub fn copy(&self, index: usize) -> Option<String> {
        self.entries
            .get(index)
            .and_then(MenuEntry::as_row)
            .and_then(DisplayRow::clipboard_text)
            .map(str::to_string)
    }

    fn settle_with(&mut self, row: DisplayRow) {
        self.entries = vec![row.into()];
        self.phase = CyclePhase::Complete;
    }
}

const fn slot(family: AddressFamily) -> usize {
    match family {
        AddressFamily::V4 => 0,
        AddressFamily::V6 => 1,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
