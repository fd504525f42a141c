//! Config state store
//!
//! A synchronous, single-writer transition table over
//! `Tracked<ConfigPanelState>`. All mutation goes through [`ConfigStore::dispatch`];
//! the store performs no I/O. Persistence belongs to the caller:
//!
//! 1. `let ticket = store.begin_save();`
//! 2. persist `ticket.snapshot` externally
//! 3. on success, `store.complete_save(ticket)`
//!
//! Edits made while step 2 is in flight keep the store dirty. A reset while
//! step 2 is in flight makes the store ignore the ticket.

pub mod action;
pub mod list_ops;
mod reducer;

pub use action::{Action, ActionOutcome};
pub use list_ops::RemoveOutcome;
pub use reducer::reduce;

use crate::bubble::{BubbleType, BubbleValue};
use crate::config::StudioConfig;
use crate::migration;
use crate::output::{OutputSettings, OutputSettingsPatch};
use crate::resolution::{InheritedView, ResolutionContext};
use crate::state::{ConfigPanelState, SceneTypeKey, ScopeTarget};
use crate::tracking::{CleanOutcome, SaveTicket, Tracked};
use crate::{Error, Result};

/// Tracked panel state: `{current, original, is_dirty}` plus a version
pub type StoreState = Tracked<ConfigPanelState>;

/// Starter sets used by `InitializeDefault` and output defaults for new flows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub general_starter: Vec<BubbleType>,
    pub scene_type_starter: Vec<BubbleType>,
    pub scene_label: String,
    pub output_defaults: OutputSettings,
}

impl Default for StoreOptions {
    fn default() -> Self {
        let StudioConfig { starter, .. } = StudioConfig::default();
        Self {
            general_starter: starter.general,
            scene_type_starter: starter.scene_type,
            scene_label: starter.scene_label,
            output_defaults: OutputSettings::default(),
        }
    }
}

impl TryFrom<&StudioConfig> for StoreOptions {
    type Error = Error;

    fn try_from(config: &StudioConfig) -> Result<Self> {
        Ok(Self {
            general_starter: config.starter.general.clone(),
            scene_type_starter: config.starter.scene_type.clone(),
            scene_label: config.starter.scene_label.clone(),
            output_defaults: config.output.output_settings()?,
        })
    }
}

/// Handle returned by [`ConfigStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&ConfigPanelState, bool)>;

pub struct ConfigStore {
    state: StoreState,
    options: StoreOptions,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ConfigPanelState::default())
    }
}

impl ConfigStore {
    /// Clean store seeded from a caller-supplied snapshot
    #[must_use]
    pub fn new(initial: ConfigPanelState) -> Self {
        Self::with_options(initial, StoreOptions::default())
    }

    /// Clean store for a new flow, seeded with the configured output defaults
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the output config is rejected by its
    /// variants policy
    pub fn from_config(config: &StudioConfig) -> Result<Self> {
        let options = StoreOptions::try_from(config)?;
        let initial = ConfigPanelState::with_output(options.output_defaults);
        Ok(Self::with_options(initial, options))
    }

    #[must_use]
    pub fn with_options(initial: ConfigPanelState, options: StoreOptions) -> Self {
        if let Err(e) = initial.validate() {
            tracing::warn!(error = %e, "Config store seeded with a state that fails validation");
        }
        Self {
            state: StoreState::new(initial),
            options,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // READ ACCESS
    // ═══════════════════════════════════════════════════════════════════════

    #[must_use]
    pub const fn state(&self) -> &StoreState {
        &self.state
    }

    #[must_use]
    pub const fn current(&self) -> &ConfigPanelState {
        self.state.current()
    }

    #[must_use]
    pub const fn original(&self) -> &ConfigPanelState {
        self.state.original()
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.state.version()
    }

    /// Inherited display view for a target of the current state
    #[must_use]
    pub fn inherited_view(
        &self,
        target: &ScopeTarget,
        ctx: &ResolutionContext<'_>,
    ) -> Option<InheritedView> {
        self.current().inherited_view(target, ctx)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DISPATCH
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply an action and notify listeners
    pub fn dispatch(&mut self, action: Action) -> ActionOutcome {
        let (next, outcome) = reduce(&self.state, action, &self.options);
        self.state = next;
        self.notify();
        outcome
    }

    /// Append a bubble; the outcome carries its index
    pub fn add(&mut self, target: ScopeTarget, bubble: BubbleValue) -> ActionOutcome {
        self.dispatch(Action::AddBubble { target, bubble })
    }

    pub fn update(&mut self, target: ScopeTarget, index: usize, bubble: BubbleValue) -> ActionOutcome {
        self.dispatch(Action::UpdateBubble {
            target,
            index,
            bubble,
        })
    }

    /// Two-tier delete
    pub fn remove(&mut self, target: ScopeTarget, index: usize) -> ActionOutcome {
        self.dispatch(Action::RemoveBubble { target, index })
    }

    pub fn initialize_default(&mut self, target: ScopeTarget) -> ActionOutcome {
        self.dispatch(Action::InitializeDefault { target })
    }

    pub fn migrate_scene_type(&mut self, from: SceneTypeKey, to: SceneTypeKey) -> ActionOutcome {
        self.dispatch(Action::MigrateSceneType { from, to })
    }

    pub fn set_output_settings(&mut self, patch: OutputSettingsPatch) -> ActionOutcome {
        self.dispatch(Action::SetOutputSettings { patch })
    }

    /// Unconditional clean. Prefer [`Self::complete_save`] after an async persist.
    pub fn mark_clean(&mut self) -> ActionOutcome {
        tracing::info!(version = self.version(), "Marking config state clean");
        self.dispatch(Action::MarkClean)
    }

    pub fn reset_state(&mut self, state: ConfigPanelState) -> ActionOutcome {
        tracing::info!(version = self.version(), "Resetting config state");
        self.dispatch(Action::ResetState {
            state: Box::new(state),
        })
    }

    /// React to the external "active scene type changed" signal.
    ///
    /// Dispatches a migration only when `from` is unselected and something is
    /// staged under it, so plain scene selection leaves the dirty flag alone.
    pub fn on_scene_type_changed(
        &mut self,
        from: &SceneTypeKey,
        to: &SceneTypeKey,
    ) -> Option<ActionOutcome> {
        (from.is_unselected() && migration::has_staged(&self.current().scene_type_inspiration))
            .then(|| self.migrate_scene_type(from.clone(), to.clone()))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SAVE PROTOCOL
    // ═══════════════════════════════════════════════════════════════════════

    /// Capture the snapshot to persist
    #[must_use]
    pub fn begin_save(&self) -> SaveTicket<ConfigPanelState> {
        self.state.save_ticket()
    }

    /// Record a successful persist of `ticket.snapshot`
    pub fn complete_save(&mut self, ticket: SaveTicket<ConfigPanelState>) -> CleanOutcome {
        let (next, outcome) = self.state.mark_saved(ticket);
        match outcome {
            CleanOutcome::Clean => {
                tracing::info!(version = next.version(), "Saved config state is current");
            }
            CleanOutcome::Stale {
                saved_version,
                current_version,
            } => {
                tracing::warn!(
                    saved_version,
                    current_version,
                    "Config state changed during save; staying dirty"
                );
            }
            CleanOutcome::Superseded {
                saved_epoch,
                current_epoch,
            } => {
                tracing::warn!(
                    saved_epoch,
                    current_epoch,
                    "Config state was reset during save; ignoring saved snapshot"
                );
            }
        }
        self.state = next;
        self.notify();
        outcome
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LISTENERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Register a listener called with `(current, is_dirty)` after every change
    pub fn subscribe(&mut self, listener: impl Fn(&ConfigPanelState, bool) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        let (current, dirty) = (self.state.current(), self.state.is_dirty());
        self.listeners
            .iter()
            .for_each(|(_, listener)| listener(current, dirty));
    }
}
