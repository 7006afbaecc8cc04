// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use tokio::{runtime::Handle, sync::mpsc::Sender};

use crate::{CommonError, CommonErrorType, CommonResult, InlineEditApplyResponse,
            InlineEditBlurResponse, InlineEditMode, InlineEditOptions, InlineEditSignal,
            InlineString, InlineVec, OptimisticOverride, SaveId, SaveOutcome, SaveStatus,
            SaveValue, StaleSettlementPolicy};

/// Click to edit state machine for a single field.
///
/// The committed value is owned by someone else (a store, a document, a server). The
/// controller never holds on to it. Every method that needs it takes it as an argument,
/// and the displayed value is derived from it with [`Self::display_value`].
///
/// ```text
///              activate                       blur, buffer != committed
///   Viewing ─────────────────▶ Editing ─────────────────────────────────▶ Viewing
///      ▲                        │   ▲                                    (save issued,
///      │   blur, unchanged      │   │ change_buffer                       override set)
///      └────────────────────────┘   └──┘
/// ```
///
/// When a save settles the owner receives an [`InlineEditSignal`] on the channel passed
/// to [`Self::new`] and applies it with [`Self::apply_signal`].
pub struct InlineEditController<SV: SaveValue> {
    mode: InlineEditMode,
    buffer: InlineString,
    optimistic_override: Option<OptimisticOverride>,
    save_status: SaveStatus,
    latest_save_id: Option<SaveId>,
    next_save_id: u64,
    in_flight: InlineVec<SaveId>,
    save_value: Arc<SV>,
    signal_sender: Sender<InlineEditSignal>,
    options: InlineEditOptions,
}

impl<SV: SaveValue> Debug for InlineEditController<SV> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineEditController")
            .field("mode", &self.mode)
            .field("buffer", &self.buffer)
            .field("optimistic_override", &self.optimistic_override)
            .field("save_status", &self.save_status)
            .field("latest_save_id", &self.latest_save_id)
            .field("in_flight", &self.in_flight)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<SV: SaveValue> InlineEditController<SV> {
    pub fn new(
        save_value: SV,
        signal_sender: Sender<InlineEditSignal>,
        options: InlineEditOptions,
    ) -> Self {
        Self {
            mode: InlineEditMode::Viewing,
            buffer: InlineString::new(),
            optimistic_override: None,
            save_status: SaveStatus::Idle,
            latest_save_id: None,
            next_save_id: 0,
            in_flight: InlineVec::new(),
            save_value: Arc::new(save_value),
            signal_sender,
            options,
        }
    }

    #[must_use]
    pub fn mode(&self) -> InlineEditMode { self.mode }

    #[must_use]
    pub fn is_editing(&self) -> bool { self.mode == InlineEditMode::Editing }

    /// Only meaningful while [`InlineEditMode::Editing`].
    #[must_use]
    pub fn buffer(&self) -> &str { &self.buffer }

    #[must_use]
    pub fn save_status(&self) -> &SaveStatus { &self.save_status }

    #[must_use]
    pub fn optimistic_override(&self) -> Option<&OptimisticOverride> {
        self.optimistic_override.as_ref()
    }

    /// Number of saves issued that have not been applied with [`Self::apply_signal`] yet.
    #[must_use]
    pub fn in_flight_count(&self) -> usize { self.in_flight.len() }

    #[must_use]
    pub fn options(&self) -> InlineEditOptions { self.options }

    /// The optimistic value while a save is in flight, otherwise `committed`.
    #[must_use]
    pub fn display_value<'a>(&'a self, committed: &'a str) -> &'a str {
        match &self.optimistic_override {
            Some(it) => it.value.as_str(),
            None => committed,
        }
    }

    /// Start editing, with the buffer seeded from `committed`. Does nothing while already
    /// editing, so the buffer is not reset by a second click.
    pub fn activate(&mut self, committed: &str) {
        if self.is_editing() {
            return;
        }
        self.mode = InlineEditMode::Editing;
        self.buffer = committed.into();
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "InlineEditController::activate",
            mode = %self.mode,
            buffer = ?self.buffer
        );
    }

    /// Replace the edit buffer. Ignored while [`InlineEditMode::Viewing`].
    pub fn change_buffer(&mut self, text: &str) {
        if !self.is_editing() {
            tracing::debug!(
                message = "InlineEditController::change_buffer ignored, not editing",
                text = ?text
            );
            return;
        }
        self.buffer = text.into();
    }

    /// Stop editing. When the buffer differs from `committed` a save of the buffer is
    /// spawned on the current tokio runtime, and the buffer is displayed until the save
    /// settles.
    ///
    /// # Errors
    ///
    /// Returns [`CommonErrorType::InvalidState`] if a save is needed but there is no
    /// tokio runtime to spawn it on. The controller stays in
    /// [`InlineEditMode::Editing`] with its buffer intact, so the blur can be retried.
    pub fn blur(&mut self, committed: &str) -> CommonResult<InlineEditBlurResponse> {
        if !self.is_editing() {
            return Ok(InlineEditBlurResponse::NotEditing);
        }

        if self.buffer.as_str() == committed {
            self.mode = InlineEditMode::Viewing;
            tracing::debug!(
                message = "InlineEditController::blur, unchanged",
                mode = %self.mode
            );
            return Ok(InlineEditBlurResponse::Unchanged);
        }

        let Ok(runtime_handle) = Handle::try_current() else {
            return CommonError::new_error_result(
                CommonErrorType::InvalidState,
                "A tokio runtime is required to save an inline edit",
            );
        };

        self.mode = InlineEditMode::Viewing;

        let save_id = SaveId(self.next_save_id);
        self.next_save_id += 1;
        self.latest_save_id = Some(save_id);
        self.in_flight.push(save_id);
        self.save_status = SaveStatus::Pending;
        self.optimistic_override = Some(OptimisticOverride {
            save_id,
            value: self.buffer.clone(),
        });

        tracing::debug!(
            message = "InlineEditController::blur, save issued",
            save_id = %save_id,
            value = ?self.buffer
        );

        let save_value = Arc::clone(&self.save_value);
        let signal_sender = self.signal_sender.clone();
        let value = self.buffer.clone();
        let save_handle = runtime_handle.clone();
        runtime_handle.spawn(async move {
            // The save runs in its own task, so a panic in it still settles.
            let save_task = save_handle.spawn(async move { save_value.save(value).await });
            let outcome = match save_task.await {
                Ok(Ok(())) => SaveOutcome::Committed,
                Ok(Err(report)) => SaveOutcome::Failed(format!("{report}")),
                Err(join_error) => {
                    SaveOutcome::Failed(format!("Save task did not finish: {join_error}"))
                }
            };
            // The owner may be gone, and then nobody needs to hear about it.
            signal_sender
                .send(InlineEditSignal::SaveSettled { save_id, outcome })
                .await
                .ok();
        });

        Ok(InlineEditBlurResponse::SaveIssued(save_id))
    }

    /// Apply a signal sent by a background save. Call this from the task that owns the
    /// controller.
    pub fn apply_signal(&mut self, signal: InlineEditSignal) -> InlineEditApplyResponse {
        match signal {
            InlineEditSignal::SaveSettled { save_id, outcome } => {
                self.apply_save_settled(save_id, outcome)
            }
        }
    }

    fn apply_save_settled(
        &mut self,
        save_id: SaveId,
        outcome: SaveOutcome,
    ) -> InlineEditApplyResponse {
        let Some(index) = self.in_flight.iter().position(|it| *it == save_id) else {
            tracing::warn!(
                message = "InlineEditController::apply_signal, unknown save",
                save_id = %save_id
            );
            return InlineEditApplyResponse::UnknownSave;
        };
        self.in_flight.remove(index);

        let is_latest = self.latest_save_id == Some(save_id);

        if let SaveOutcome::Failed(error_message) = &outcome {
            tracing::warn!(
                message = "InlineEditController::apply_signal, save failed",
                save_id = %save_id,
                is_latest = is_latest,
                error = %error_message
            );
        }

        if is_latest {
            self.save_status = match outcome {
                SaveOutcome::Committed => SaveStatus::Committed,
                SaveOutcome::Failed(error_message) => SaveStatus::Failed(error_message),
            };
        }

        let response = match &self.optimistic_override {
            None => InlineEditApplyResponse::NoOverride,
            Some(it)
                if it.save_id != save_id
                    && self.options.stale_settlement
                        == StaleSettlementPolicy::KeepNewerOverride =>
            {
                InlineEditApplyResponse::OverrideKept
            }
            Some(_) => {
                self.optimistic_override = None;
                InlineEditApplyResponse::OverrideCleared
            }
        };

        tracing::debug!(
            message = "InlineEditController::apply_signal, save settled",
            save_id = %save_id,
            is_latest = is_latest,
            response = ?response,
            save_status = ?self.save_status
        );

        response
    }
}
