//! Dirty tracking over immutable snapshots
//!
//! `Tracked<T>` holds `{current, original, is_dirty}` plus two counters. The
//! dirty flag is driven by the transitions applied, never by comparing
//! `current` with `original`: setting a field to its existing value still
//! marks dirty, and bootstrap transitions never do.
//!
//! `version` counts user-intent transitions and `epoch` counts resets.
//! Bootstrap and clean transitions move neither. A [`SaveTicket`] captures
//! both counters and the snapshot handed to an external persist:
//!
//! - same epoch, same version: the save is current and clears the dirty flag
//! - same epoch, newer version: `original` becomes the saved snapshot and the
//!   store stays dirty
//! - older epoch: the state was replaced after the ticket was taken and the
//!   ticket is ignored

/// Outcome of completing a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    /// Saved snapshot is the current state; dirty flag cleared
    Clean,
    /// State changed while the save was in flight; stays dirty
    Stale {
        saved_version: u64,
        current_version: u64,
    },
    /// State was reset after the ticket was taken; nothing changed
    Superseded {
        saved_epoch: u64,
        current_epoch: u64,
    },
}

/// Snapshot handed to an external persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket<T> {
    pub epoch: u64,
    pub version: u64,
    pub snapshot: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracked<T> {
    current: T,
    original: T,
    is_dirty: bool,
    version: u64,
    epoch: u64,
}

impl<T: Default + Clone> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> Tracked<T> {
    /// Clean state with `current == original == initial`
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            original: initial.clone(),
            current: initial,
            is_dirty: false,
            version: 0,
            epoch: 0,
        }
    }

    #[must_use]
    pub const fn current(&self) -> &T {
        &self.current
    }

    #[must_use]
    pub const fn original(&self) -> &T {
        &self.original
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Number of user-intent transitions
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Number of resets
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// User-intent transition: replaces `current` and marks dirty
    #[must_use]
    pub fn mutate(&self, f: impl FnOnce(T) -> T) -> Self {
        Self {
            current: f(self.current.clone()),
            original: self.original.clone(),
            is_dirty: true,
            version: self.version.wrapping_add(1),
            epoch: self.epoch,
        }
    }

    /// Bootstrap transition: replaces `current` without touching the dirty
    /// flag or the counters
    #[must_use]
    pub fn bootstrap(&self, f: impl FnOnce(T) -> T) -> Self {
        Self {
            current: f(self.current.clone()),
            original: self.original.clone(),
            is_dirty: self.is_dirty,
            version: self.version,
            epoch: self.epoch,
        }
    }

    /// Copy `current` into `original` and clear the dirty flag
    #[must_use]
    pub fn mark_clean(&self) -> Self {
        Self {
            current: self.current.clone(),
            original: self.current.clone(),
            is_dirty: false,
            version: self.version,
            epoch: self.epoch,
        }
    }

    /// Replace both `current` and `original`; outstanding tickets are superseded
    #[must_use]
    pub fn reset(&self, state: T) -> Self {
        Self {
            original: state.clone(),
            current: state,
            is_dirty: false,
            version: self.version,
            epoch: self.epoch.wrapping_add(1),
        }
    }

    #[must_use]
    pub fn save_ticket(&self) -> SaveTicket<T> {
        SaveTicket {
            epoch: self.epoch,
            version: self.version,
            snapshot: self.current.clone(),
        }
    }

    /// Record a successful persist of `ticket.snapshot`.
    ///
    /// A ticket from before the last reset leaves the state untouched. A
    /// ticket overtaken by user edits moves `original` to the persisted
    /// snapshot and keeps the dirty flag set.
    #[must_use]
    pub fn mark_saved(&self, ticket: SaveTicket<T>) -> (Self, CleanOutcome) {
        if ticket.epoch != self.epoch {
            let outcome = CleanOutcome::Superseded {
                saved_epoch: ticket.epoch,
                current_epoch: self.epoch,
            };
            return (self.clone(), outcome);
        }
        if ticket.version == self.version {
            return (self.mark_clean(), CleanOutcome::Clean);
        }
        let outcome = CleanOutcome::Stale {
            saved_version: ticket.version,
            current_version: self.version,
        };
        (
            Self {
                current: self.current.clone(),
                original: ticket.snapshot,
                is_dirty: true,
                version: self.version,
                epoch: self.epoch,
            },
            outcome,
        )
    }
}
