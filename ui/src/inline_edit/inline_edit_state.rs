// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use strum_macros::{AsRefStr, Display as StrumDisplay};

use crate::InlineString;

/// Whether the field is showing its value, or an edit buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
pub enum InlineEditMode {
    #[default]
    Viewing,
    Editing,
}

/// Identifies one save issued by a blur. Ids increase with every save issued by the
/// same controller, so a larger id is always the more recent save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaveId(pub u64);

impl Display for SaveId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "save#{}", self.0) }
}

/// Result of the most recent save.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing was saved yet.
    #[default]
    Idle,
    Pending,
    Committed,
    /// The save collaborator returned an error. The message is the rendered report.
    Failed(String),
}

impl SaveStatus {
    #[must_use]
    pub fn is_pending(&self) -> bool { matches!(self, SaveStatus::Pending) }
}

/// What a background save reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Committed,
    Failed(String),
}

/// Sent from a background save task to the owner of the controller. The owner passes it
/// to [`crate::InlineEditController::apply_signal`] from its own event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineEditSignal {
    SaveSettled { save_id: SaveId, outcome: SaveOutcome },
}

/// What to do when a save settles after a newer save was already issued from the same
/// controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StaleSettlementPolicy {
    /// Any settlement clears the optimistic value, even one that belongs to a newer
    /// save. The display can briefly fall back to the committed value while the newer
    /// save is still in flight.
    #[default]
    ClearOverride,
    /// Only the settlement of the save that set the current optimistic value clears it.
    KeepNewerOverride,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InlineEditOptions {
    pub stale_settlement: StaleSettlementPolicy,
}

/// The value shown while a save is in flight, and the save it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticOverride {
    pub save_id: SaveId,
    pub value: InlineString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineEditBlurResponse {
    /// The controller was not editing, nothing happened.
    NotEditing,
    /// The buffer matched the committed value, so no save was issued.
    Unchanged,
    SaveIssued(SaveId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineEditApplyResponse {
    OverrideCleared,
    /// A newer save owns the optimistic value, and it stays on screen.
    OverrideKept,
    NoOverride,
    /// The save id was never issued by this controller, or it settled already.
    UnknownSave,
}
